use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Username;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidMoveReason {
    #[error("game is already over")]
    GameOver,
    #[error("not your turn")]
    NotYourTurn,
    #[error("cell is already marked")]
    CellOccupied,
    #[error("position out of bounds")]
    OutOfRange,
    #[error("player is not in this game")]
    NotAParticipant,
}

/// Capabilities every two-player turn-based game provides.
pub trait Game {
    type Move;
    type Snapshot;

    /// Explains why `mv` cannot be applied right now.
    fn check_move(&self, mv: &Self::Move) -> Result<(), InvalidMoveReason>;

    fn validate_move(&self, mv: &Self::Move) -> bool {
        self.check_move(mv).is_ok()
    }

    /// Applies a move that passes `check_move`. Anything else is refused
    /// without touching the state.
    fn apply_move(&mut self, mv: &Self::Move) -> Result<(), InvalidMoveReason>;

    fn is_terminal(&self) -> bool;

    /// The winning participant, `None` while in progress or on a draw.
    fn winner(&self) -> Option<&Username>;

    fn snapshot(&self) -> Self::Snapshot;
}
