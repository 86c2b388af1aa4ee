//! Inbound line classification and the command table
//!
//! A line starting with `/` is a command; anything else is chat. The
//! set of commands is closed: parsing yields one `Command` variant per
//! table entry, or a `CommandError` whose text is the reply sent back
//! to the sender.

use thiserror::Error;

/// Leading character of a command line
pub const COMMAND_MARKER: char = '/';

/// `/help` reply
pub const HELP_TEXT: &str = "Available commands:
/help - Show this help message
/private <nickname> <message> - Send private message
/list - List all users in current room
/join <room> - Join or create a room
/rooms - List all active rooms";

/// One classified inbound line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Plain text for the sender's room
    Chat(String),
    /// A recognized, well-formed command
    Command(Command),
    /// A command line that cannot be executed
    Rejected(CommandError),
}

/// Commands understood by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available commands
    Help,
    /// Message one session by nickname
    Private { target: String, body: String },
    /// List nicknames in the sender's room
    List,
    /// Move to a room, creating it if needed
    Join { room: String },
    /// List rooms with their member counts
    Rooms,
}

/// Protocol and usage errors, reported to the sender only
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command. Type /help for available commands.")]
    Unknown(String),

    #[error("Usage: /private <nickname> <message>")]
    PrivateUsage,

    #[error("Usage: /join <room>")]
    JoinUsage,
}

/// Classify an inbound line
///
/// Returns None for blank lines, which are ignored.
pub fn parse_input(line: &str) -> Option<Input> {
    if line.trim().is_empty() {
        return None;
    }

    let input = match line.strip_prefix(COMMAND_MARKER) {
        Some(rest) => match Command::parse(rest) {
            Ok(command) => Input::Command(command),
            Err(e) => Input::Rejected(e),
        },
        None => Input::Chat(line.to_string()),
    };
    Some(input)
}

impl Command {
    /// Parse the text following the command marker
    ///
    /// The command name is matched case-insensitively. Arguments are
    /// whitespace separated, except the `/private` body which keeps its
    /// inner whitespace.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let (name, args) = split_token(text);

        match name.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "list" => Ok(Command::List),
            "rooms" => Ok(Command::Rooms),
            "private" => {
                let (target, body) = split_token(args);
                let body = body.trim_end();
                if target.is_empty() || body.is_empty() {
                    return Err(CommandError::PrivateUsage);
                }
                Ok(Command::Private {
                    target: target.to_string(),
                    body: body.to_string(),
                })
            }
            "join" => {
                let (room, _) = split_token(args);
                if room.is_empty() {
                    return Err(CommandError::JoinUsage);
                }
                Ok(Command::Join {
                    room: room.to_string(),
                })
            }
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

/// Split off the first whitespace-delimited token
fn split_token(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Result<Command, CommandError> {
        match parse_input(line) {
            Some(Input::Command(command)) => Ok(command),
            Some(Input::Rejected(e)) => Err(e),
            other => panic!("not a command line: {:?}", other),
        }
    }

    #[test]
    fn test_chat_is_verbatim() {
        assert_eq!(
            parse_input("  hello  there "),
            Some(Input::Chat("  hello  there ".to_string()))
        );
    }

    #[test]
    fn test_blank_lines_ignored() {
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("   "), None);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(command("/help"), Ok(Command::Help));
        assert_eq!(command("/list"), Ok(Command::List));
        assert_eq!(command("/rooms"), Ok(Command::Rooms));
        assert_eq!(command("/help extra args"), Ok(Command::Help));
    }

    #[test]
    fn test_command_names_case_insensitive() {
        assert_eq!(command("/HELP"), Ok(Command::Help));
        assert_eq!(
            command("/Join lobby"),
            Ok(Command::Join {
                room: "lobby".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            command("/frobnicate now"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(command("/"), Err(CommandError::Unknown(String::new())));
        assert_eq!(
            CommandError::Unknown("x".to_string()).to_string(),
            "Unknown command. Type /help for available commands."
        );
    }

    #[test]
    fn test_private_keeps_body_whitespace() {
        assert_eq!(
            command("/private bob  hello   world  "),
            Ok(Command::Private {
                target: "bob".to_string(),
                body: "hello   world".to_string(),
            })
        );
    }

    #[test]
    fn test_private_usage() {
        assert_eq!(command("/private"), Err(CommandError::PrivateUsage));
        assert_eq!(command("/private bob"), Err(CommandError::PrivateUsage));
        assert_eq!(command("/private bob   "), Err(CommandError::PrivateUsage));
    }

    #[test]
    fn test_join_usage() {
        assert_eq!(command("/join"), Err(CommandError::JoinUsage));
        assert_eq!(command("/join   "), Err(CommandError::JoinUsage));
        assert_eq!(
            command("/join lobby extra"),
            Ok(Command::Join {
                room: "lobby".to_string()
            })
        );
    }
}
