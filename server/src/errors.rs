use common::ErrorCode;
use common::games::InvalidMoveReason;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("username is already registered")]
    AlreadyExists,
    #[error("username is not registered")]
    Unregistered,
    #[error("player is already waiting for a match")]
    AlreadyQueued,
    #[error("player is already in a match")]
    AlreadyInSession,
    #[error("player has no active match")]
    NoActiveSession,
    #[error("invalid move: {0}")]
    InvalidMove(InvalidMoveReason),
    #[error("player is not a participant of this match")]
    NotAParticipant,
}

impl From<InvalidMoveReason> for MatchError {
    fn from(reason: InvalidMoveReason) -> Self {
        MatchError::InvalidMove(reason)
    }
}

impl MatchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MatchError::AlreadyExists => ErrorCode::AlreadyExists,
            MatchError::Unregistered => ErrorCode::Unregistered,
            MatchError::AlreadyQueued => ErrorCode::AlreadyQueued,
            MatchError::AlreadyInSession => ErrorCode::AlreadyInSession,
            MatchError::NoActiveSession => ErrorCode::NoActiveSession,
            MatchError::InvalidMove(_) => ErrorCode::InvalidMove,
            MatchError::NotAParticipant => ErrorCode::NotAParticipant,
        }
    }
}
