//! Wire texts
//!
//! Every server → client unit is a single UTF-8 text. Room traffic is
//! stamped with the server's local time as `[HH:MM:SS] body`; direct
//! replies (help, listings, errors) are sent unstamped.

use chrono::{DateTime, Local, TimeZone};

/// Sentinel asking a freshly connected client for its nickname
pub const NICK_REQUEST: &str = "NICK";

/// Sent to a new session once it is registered
pub const WELCOME: &str = "Connected to the server! Type /help for available commands.";

/// Longest accepted inbound unit, in bytes
pub const MAX_LINE_LENGTH: usize = 1024;

/// Nicknames are cut to this many characters
pub const MAX_NICKNAME_LEN: usize = 32;

/// Prefix `body` with the current local time
pub fn stamp(body: &str) -> String {
    stamp_at(&Local::now(), body)
}

/// Prefix `body` with the given time
pub fn stamp_at<Tz: TimeZone>(time: &DateTime<Tz>, body: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {}", time.format("%H:%M:%S"), body)
}

/// Turn the handshake reply into a nickname
///
/// Surrounding whitespace is dropped and the result is truncated to
/// `MAX_NICKNAME_LEN` characters. Returns None for an empty reply.
pub fn sanitize_nickname(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NICKNAME_LEN).collect())
}

pub fn joined_chat(nickname: &str) -> String {
    format!("{nickname} joined the chat!")
}

pub fn left_chat(nickname: &str) -> String {
    format!("{nickname} left the chat!")
}

pub fn joined_room(nickname: &str) -> String {
    format!("{nickname} joined the room")
}

pub fn left_room(nickname: &str) -> String {
    format!("{nickname} left the room")
}

/// A chat line as seen by the whole room
pub fn chat(nickname: &str, text: &str) -> String {
    format!("{nickname}: {text}")
}

pub fn private_from(sender: &str, body: &str) -> String {
    format!("(Private from {sender}): {body}")
}

pub fn private_to(target: &str, body: &str) -> String {
    format!("(Private to {target}): {body}")
}

pub fn user_not_found(nickname: &str) -> String {
    format!("User {nickname} not found.")
}

/// `/list` reply
pub fn user_list<'a>(room: &str, nicknames: impl IntoIterator<Item = &'a str>) -> String {
    let names: Vec<&str> = nicknames.into_iter().collect();
    format!("Users in {room}: {}", names.join(", "))
}

/// `/rooms` reply
pub fn room_list<'a>(rooms: impl IntoIterator<Item = (&'a str, usize)>) -> String {
    let entries: Vec<String> = rooms
        .into_iter()
        .map(|(name, count)| format!("{name} ({count} users)"))
        .collect();
    format!("Active rooms: {}", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_stamp_format() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        assert_eq!(stamp_at(&time, "hi"), "[09:05:07] hi");
    }

    #[test]
    fn test_stamp_uses_local_clock() {
        let line = stamp("hello");
        let bytes = line.as_bytes();

        assert_eq!(line.len(), "[00:00:00] hello".len());
        assert_eq!(bytes[0], b'[');
        assert_eq!(bytes[3], b':');
        assert_eq!(bytes[6], b':');
        assert!(line.ends_with("] hello"));
    }

    #[test]
    fn test_sanitize_nickname() {
        assert_eq!(sanitize_nickname("  alice \r"), Some("alice".to_string()));
        assert_eq!(sanitize_nickname("   "), None);
        assert_eq!(sanitize_nickname(""), None);

        let long = "x".repeat(MAX_NICKNAME_LEN + 10);
        assert_eq!(
            sanitize_nickname(&long).unwrap().chars().count(),
            MAX_NICKNAME_LEN
        );
    }

    #[test]
    fn test_listings() {
        assert_eq!(
            user_list("general", ["alice", "bob"]),
            "Users in general: alice, bob"
        );
        assert_eq!(
            room_list([("general", 2), ("lobby", 0)]),
            "Active rooms: general (2 users), lobby (0 users)"
        );
    }
}
