pub mod config;
pub mod games;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod player;
pub mod protocol;

pub use identifiers::*;
pub use player::PlayerStats;
pub use protocol::{ClientMessage, ErrorCode, MatchSnapshot, MatchStatus, ServerMessage};
