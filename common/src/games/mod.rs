pub mod grid;
pub mod traits;

use serde::{Deserialize, Serialize};

use crate::Username;
use grid::{GridGame, GridMove, GridSnapshot};
pub use traits::{Game, InvalidMoveReason};

/// Game variants a match can be played as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    #[serde(rename = "tictactoe")]
    Grid,
}

impl GameKind {
    /// Picks the variant for a freshly paired match. With a single
    /// playable variant this is always `Grid`.
    pub fn select_for(_players: &[Username; 2]) -> GameKind {
        GameKind::Grid
    }

    pub fn create(self, players: [Username; 2]) -> GameInstance {
        match self {
            GameKind::Grid => GameInstance::Grid(GridGame::new(players)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum GameInstance {
    Grid(GridGame),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameMove {
    #[serde(rename = "tictactoe")]
    Grid(GridMove),
}

impl GameMove {
    pub fn username(&self) -> &Username {
        match self {
            GameMove::Grid(mv) => &mv.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameSnapshot {
    #[serde(rename = "tictactoe")]
    Grid(GridSnapshot),
}

impl GameInstance {
    pub fn kind(&self) -> GameKind {
        match self {
            GameInstance::Grid(_) => GameKind::Grid,
        }
    }
}

impl Game for GameInstance {
    type Move = GameMove;
    type Snapshot = GameSnapshot;

    fn check_move(&self, mv: &GameMove) -> Result<(), InvalidMoveReason> {
        match (self, mv) {
            (GameInstance::Grid(game), GameMove::Grid(mv)) => game.check_move(mv),
        }
    }

    fn apply_move(&mut self, mv: &GameMove) -> Result<(), InvalidMoveReason> {
        match (self, mv) {
            (GameInstance::Grid(game), GameMove::Grid(mv)) => game.apply_move(mv),
        }
    }

    fn is_terminal(&self) -> bool {
        match self {
            GameInstance::Grid(game) => game.is_terminal(),
        }
    }

    fn winner(&self) -> Option<&Username> {
        match self {
            GameInstance::Grid(game) => game.winner(),
        }
    }

    fn snapshot(&self) -> GameSnapshot {
        match self {
            GameInstance::Grid(game) => GameSnapshot::Grid(game.snapshot()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid::Position;

    #[test]
    fn test_selected_kind_creates_grid_game() {
        let players = [Username::new("alice"), Username::new("bob")];
        let kind = GameKind::select_for(&players);
        assert_eq!(kind, GameKind::Grid);
        let game = kind.create(players);
        assert_eq!(game.kind(), GameKind::Grid);
        assert!(!game.is_terminal());
    }

    #[test]
    fn test_instance_dispatches_moves() {
        let mut game = GameKind::Grid.create([Username::new("alice"), Username::new("bob")]);
        let mv = GameMove::Grid(GridMove::new(Username::new("alice"), Position::try_new(2, 2).unwrap()));
        assert!(game.validate_move(&mv));
        game.apply_move(&mv).unwrap();
        let GameSnapshot::Grid(snapshot) = game.snapshot();
        assert_eq!(snapshot.board[2][2], grid::Mark::X);
    }

    #[test]
    fn test_move_wire_format() {
        let json = r#"{"type":"tictactoe","username":"bob","position":{"row":1,"col":2}}"#;
        let mv: GameMove = serde_json::from_str(json).unwrap();
        assert_eq!(mv.username(), &Username::new("bob"));
    }

    #[test]
    fn test_off_grid_position_does_not_deserialize() {
        let json = r#"{"type":"tictactoe","username":"bob","position":{"row":3,"col":0}}"#;
        assert!(serde_json::from_str::<GameMove>(json).is_err());
    }
}
