mod game_state;
mod types;
mod win_detector;

pub use game_state::{GridGame, GridMove, GridSnapshot};
pub use types::{Board, GameStatus, Mark, Position, WinningLine, GRID_SIZE};
pub use win_detector::{check_win, check_win_with_line, is_board_full};
