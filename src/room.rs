//! Room and room directory definitions
//!
//! A room is a name plus the set of sessions currently in it. The
//! directory maps names to rooms; the default room exists from the
//! start and no room is ever removed.

use std::collections::{BTreeSet, HashMap};

use crate::types::{RoomName, SessionId};

/// Chat room
///
/// Holds member ids only; the sessions themselves live in the
/// server's session index.
#[derive(Debug)]
pub struct Room {
    /// Room name
    pub name: RoomName,
    /// Sessions currently in the room
    members: BTreeSet<SessionId>,
}

impl Room {
    /// Create an empty room
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            members: BTreeSet::new(),
        }
    }

    /// Add a session. Returns false if it was already a member.
    pub fn add_member(&mut self, session_id: SessionId) -> bool {
        self.members.insert(session_id)
    }

    /// Remove a session. Returns false if it was not a member.
    pub fn remove_member(&mut self, session_id: SessionId) -> bool {
        self.members.remove(&session_id)
    }

    /// Check if a session is in this room
    pub fn contains(&self, session_id: SessionId) -> bool {
        self.members.contains(&session_id)
    }

    /// Member ids in connection order
    pub fn members(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.members.iter().copied()
    }

    /// Get the number of members in the room
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Room name → room
///
/// Rooms are kept in creation order; since none is ever removed, a
/// room's position in `rooms` never changes.
#[derive(Debug)]
pub struct RoomDirectory {
    rooms: Vec<Room>,
    /// Room name -> position in `rooms`
    index: HashMap<RoomName, usize>,
}

impl RoomDirectory {
    /// Create a directory holding only the (empty) default room
    pub fn new() -> Self {
        let mut directory = Self {
            rooms: Vec::new(),
            index: HashMap::new(),
        };
        directory.ensure(&RoomName::default_room());
        directory
    }

    /// Get a room, creating it empty if the name is new
    pub fn ensure(&mut self, name: &RoomName) -> &mut Room {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.rooms.push(Room::new(name.clone()));
                let position = self.rooms.len() - 1;
                self.index.insert(name.clone(), position);
                position
            }
        };
        &mut self.rooms[position]
    }

    pub fn get(&self, name: &RoomName) -> Option<&Room> {
        self.index.get(name).map(|&position| &self.rooms[position])
    }

    /// Remove a session from a room's member set (no-op if absent)
    pub fn remove_member(&mut self, name: &RoomName, session_id: SessionId) {
        if let Some(&position) = self.index.get(name) {
            self.rooms[position].remove_member(session_id);
        }
    }

    /// Move a session from one room to another, creating the target
    ///
    /// Moving into the room the session is already in leaves it a member.
    pub fn move_member(&mut self, session_id: SessionId, from: &RoomName, to: &RoomName) {
        let target = self.ensure(to);
        target.add_member(session_id);
        if from != to {
            self.remove_member(from, session_id);
        }
    }

    /// Snapshot of the member ids of a room (empty for unknown rooms)
    pub fn members_of(&self, name: &RoomName) -> Vec<SessionId> {
        self.get(name)
            .map(|room| room.members().collect())
            .unwrap_or_default()
    }

    /// All rooms in creation order, default room first
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Number of known rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}
