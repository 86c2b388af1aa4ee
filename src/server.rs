//! ChatServer Actor implementation
//!
//! The central actor that owns all shared state: the session index and
//! the room directory. Connection handlers never touch that state; they
//! send `ServerCommand`s and the actor applies them one at a time, so
//! every membership change is atomic with respect to every broadcast.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandError, Input, HELP_TEXT};
use crate::message;
use crate::room::RoomDirectory;
use crate::session::Session;
use crate::types::{RoomName, SessionId};

/// Commands sent from connection handlers to the ChatServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// Handshake finished, register the session
    Connect {
        session_id: SessionId,
        nickname: String,
        sender: mpsc::Sender<String>,
    },
    /// A classified line from the session
    Input {
        session_id: SessionId,
        input: Input,
    },
    /// The connection ended
    Disconnect { session_id: SessionId },
}

/// The main ChatServer actor
///
/// Invariant: every session's `room` names a room in the directory, and
/// the session is a member of that room and of no other.
pub struct ChatServer {
    /// All active sessions, in connection order
    sessions: BTreeMap<SessionId, Session>,
    /// Room name -> members
    rooms: RoomDirectory,
    /// Command receiver channel
    receiver: mpsc::Receiver<ServerCommand>,
}

impl ChatServer {
    /// Create a new ChatServer with the given command receiver
    pub fn new(receiver: mpsc::Receiver<ServerCommand>) -> Self {
        Self {
            sessions: BTreeMap::new(),
            rooms: RoomDirectory::new(),
            receiver,
        }
    }

    /// Run the ChatServer event loop
    ///
    /// Continuously receives and processes commands until all senders are dropped.
    pub async fn run(mut self) {
        info!("ChatServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("ChatServer shutting down");
    }

    /// Process a single command
    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Connect {
                session_id,
                nickname,
                sender,
            } => {
                self.handle_connect(session_id, nickname, sender);
            }
            ServerCommand::Input { session_id, input } => {
                self.handle_input(session_id, input);
            }
            ServerCommand::Disconnect { session_id } => {
                self.remove_session(session_id);
            }
        }
    }

    /// Register a session in the default room and greet it
    fn handle_connect(
        &mut self,
        session_id: SessionId,
        nickname: String,
        sender: mpsc::Sender<String>,
    ) {
        info!("Session {} connected as '{}'", session_id, nickname);

        let session = Session::new(session_id, nickname.clone(), sender);
        let room = session.room.clone();
        self.rooms.ensure(&room).add_member(session_id);
        self.sessions.insert(session_id, session);

        self.broadcast(&room, &message::joined_chat(&nickname), None);
        self.reply(session_id, message::WELCOME.to_string());

        debug!(
            "Total sessions: {}, Total rooms: {}",
            self.sessions.len(),
            self.rooms.len()
        );
    }

    fn handle_input(&mut self, session_id: SessionId, input: Input) {
        // Lines can still arrive from a session that was just removed
        let Some(session) = self.sessions.get(&session_id) else {
            return;
        };

        match input {
            Input::Chat(text) => {
                debug!("Chat from {} in {}", session_id, session.room);
                let room = session.room.clone();
                let line = message::chat(&session.nickname, &text);
                self.broadcast(&room, &line, None);
            }
            Input::Command(command) => self.handle_user_command(session_id, command),
            Input::Rejected(error) => self.handle_rejected(session_id, error),
        }
    }

    fn handle_user_command(&mut self, session_id: SessionId, command: Command) {
        debug!("Session {} issued {:?}", session_id, command);

        match command {
            Command::Help => self.reply(session_id, HELP_TEXT.to_string()),
            Command::Private { target, body } => {
                self.handle_private(session_id, &target, &body);
            }
            Command::List => self.handle_list(session_id),
            Command::Join { room } => self.join(session_id, RoomName(room)),
            Command::Rooms => self.handle_rooms(session_id),
        }
    }

    fn handle_rejected(&mut self, session_id: SessionId, error: CommandError) {
        if let CommandError::Unknown(name) = &error {
            debug!("Session {} sent unknown command '{}'", session_id, name);
        }
        self.reply(session_id, error.to_string());
    }

    /// Deliver a private message to the first session with the nickname
    fn handle_private(&mut self, session_id: SessionId, target: &str, body: &str) {
        let Some(sender_nick) = self.nickname(session_id) else {
            return;
        };

        let target_id = self
            .sessions
            .values()
            .find(|s| s.nickname == target)
            .map(|s| s.id);

        let delivered = match target_id {
            Some(target_id) => {
                let line = message::stamp(&message::private_from(&sender_nick, body));
                self.deliver(target_id, line)
            }
            None => false,
        };

        if delivered {
            let echo = message::stamp(&message::private_to(target, body));
            self.reply(session_id, echo);
        } else {
            self.reply(session_id, message::user_not_found(target));
        }
    }

    /// Nicknames of everyone in the sender's room
    fn handle_list(&mut self, session_id: SessionId) {
        let Some(session) = self.sessions.get(&session_id) else {
            return;
        };

        let room = session.room.clone();
        let members = self.rooms.members_of(&room);
        let nicknames = members
            .iter()
            .filter_map(|id| self.sessions.get(id))
            .map(|s| s.nickname.as_str());
        let line = message::user_list(room.as_str(), nicknames);

        self.reply(session_id, line);
    }

    /// Every known room with its member count
    fn handle_rooms(&mut self, session_id: SessionId) {
        let line = message::room_list(
            self.rooms
                .iter()
                .map(|room| (room.name.as_str(), room.member_count())),
        );
        self.reply(session_id, line);
    }

    /// Move a session to `new_room`, creating the room if needed
    ///
    /// Joining the current room is allowed and still announces a leave
    /// and a join.
    fn join(&mut self, session_id: SessionId, new_room: RoomName) {
        let Some(session) = self.sessions.get_mut(&session_id) else {
            return;
        };

        let old_room = std::mem::replace(&mut session.room, new_room.clone());
        let nickname = session.nickname.clone();
        self.rooms.move_member(session_id, &old_room, &new_room);

        info!(
            "Session {} moved from {} to {}",
            session_id, old_room, new_room
        );

        self.broadcast(&old_room, &message::left_room(&nickname), None);
        self.broadcast(&new_room, &message::joined_room(&nickname), None);
    }

    /// Stamp `body` and deliver it to every member of `room`
    ///
    /// Recipients whose delivery fails are removed once the whole
    /// member snapshot has been served.
    fn broadcast(&mut self, room: &RoomName, body: &str, exclude: Option<SessionId>) {
        let line = message::stamp(body);
        let mut failed = Vec::new();

        for member in self.rooms.members_of(room) {
            if Some(member) == exclude {
                continue;
            }
            let Some(session) = self.sessions.get(&member) else {
                continue;
            };
            if let Err(e) = session.deliver(line.clone()) {
                warn!("Delivery to {} failed: {}", member, e);
                failed.push(member);
            }
        }

        for member in failed {
            self.remove_session(member);
        }
    }

    /// Send an unaddressed line to one session
    fn reply(&mut self, session_id: SessionId, line: String) {
        self.deliver(session_id, line);
    }

    /// Send a line to one session, removing it if delivery fails
    ///
    /// Returns whether the line was queued.
    fn deliver(&mut self, session_id: SessionId, line: String) -> bool {
        let Some(session) = self.sessions.get(&session_id) else {
            return false;
        };

        match session.deliver(line) {
            Ok(()) => true,
            Err(e) => {
                warn!("Delivery to {} failed: {}", session_id, e);
                self.remove_session(session_id);
                false
            }
        }
    }

    /// Drop a session from every index and announce the departure
    ///
    /// Safe to call repeatedly; only the first call has any effect.
    fn remove_session(&mut self, session_id: SessionId) {
        let Some(session) = self.sessions.remove(&session_id) else {
            return;
        };

        info!(
            "Session {} ('{}') left from {}",
            session_id, session.nickname, session.room
        );

        self.rooms.remove_member(&session.room, session_id);
        self.broadcast(&session.room, &message::left_chat(&session.nickname), None);

        debug!(
            "Total sessions: {}, Total rooms: {}",
            self.sessions.len(),
            self.rooms.len()
        );
    }

    fn nickname(&self, session_id: SessionId) -> Option<String> {
        self.sessions.get(&session_id).map(|s| s.nickname.clone())
    }
}
