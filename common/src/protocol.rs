//! JSON frames exchanged over the WebSocket endpoint.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::games::GameSnapshot;
use crate::player::PlayerStats;
use crate::{SessionId, Username};

/// Read-only view of a live match, as handed to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub session_id: SessionId,
    pub players: [Username; 2],
    pub game: GameSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    Concluded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Register { username: String },
    Queue { username: String },
    Move { username: String, row: usize, col: usize },
    State { username: String },
    ListUsers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    AlreadyExists,
    Unregistered,
    AlreadyQueued,
    AlreadyInSession,
    NoActiveSession,
    InvalidMove,
    NotAParticipant,
    PolicyRejected,
    MalformedMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Registered { username: Username },
    Queued,
    Paired { snapshot: MatchSnapshot },
    MoveApplied { snapshot: MatchSnapshot },
    GameState { status: MatchStatus, snapshot: MatchSnapshot },
    Cleared,
    Users { users: BTreeMap<Username, PlayerStats> },
    Error { code: ErrorCode, message: String },
}
