use serde::{Deserialize, Serialize};

use crate::Username;
use crate::games::traits::{Game, InvalidMoveReason};
use super::types::{Board, GameStatus, Mark, Position, WinningLine, GRID_SIZE};
use super::win_detector::{check_win_with_line, is_board_full};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMove {
    pub username: Username,
    pub position: Position,
}

impl GridMove {
    pub fn new(username: Username, position: Position) -> Self {
        Self { username, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub board: Board,
    pub turn: Mark,
    pub status: GameStatus,
    pub player_x: Username,
    pub player_o: Username,
    pub winner: Option<Username>,
    pub last_move: Option<Position>,
    pub winning_line: Option<WinningLine>,
}

/// Single 3x3 board. X belongs to the first player and always opens.
#[derive(Debug, Clone)]
pub struct GridGame {
    board: Board,
    player_x: Username,
    player_o: Username,
    turn: Mark,
    status: GameStatus,
    last_move: Option<Position>,
    winning_line: Option<WinningLine>,
}

impl GridGame {
    pub fn new(players: [Username; 2]) -> Self {
        let [player_x, player_o] = players;
        Self {
            board: [[Mark::Empty; GRID_SIZE]; GRID_SIZE],
            player_x,
            player_o,
            turn: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
            winning_line: None,
        }
    }

    pub fn mark_of(&self, username: &Username) -> Option<Mark> {
        if username == &self.player_x {
            Some(Mark::X)
        } else if username == &self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn player_with(&self, mark: Mark) -> Option<&Username> {
        match mark {
            Mark::X => Some(&self.player_x),
            Mark::O => Some(&self.player_o),
            Mark::Empty => None,
        }
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, position: Position) -> Mark {
        self.board[position.row()][position.col()]
    }

    fn recompute_status(&mut self) {
        // A line completed by the ninth move is a win, not a draw.
        if let Some(line) = check_win_with_line(&self.board) {
            self.status = GameStatus::won_by(line.mark).unwrap_or(GameStatus::InProgress);
            self.winning_line = Some(line);
            return;
        }

        if is_board_full(&self.board) {
            self.status = GameStatus::Draw;
        }
    }
}

impl Game for GridGame {
    type Move = GridMove;
    type Snapshot = GridSnapshot;

    fn check_move(&self, mv: &GridMove) -> Result<(), InvalidMoveReason> {
        if self.status.is_terminal() {
            return Err(InvalidMoveReason::GameOver);
        }

        let mark = self
            .mark_of(&mv.username)
            .ok_or(InvalidMoveReason::NotAParticipant)?;

        if mark != self.turn {
            return Err(InvalidMoveReason::NotYourTurn);
        }

        if self.cell(mv.position) != Mark::Empty {
            return Err(InvalidMoveReason::CellOccupied);
        }

        Ok(())
    }

    fn apply_move(&mut self, mv: &GridMove) -> Result<(), InvalidMoveReason> {
        self.check_move(mv)?;

        self.board[mv.position.row()][mv.position.col()] = self.turn;
        self.last_move = Some(mv.position);

        self.recompute_status();

        if self.status == GameStatus::InProgress
            && let Some(next) = self.turn.opponent()
        {
            self.turn = next;
        }

        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn winner(&self) -> Option<&Username> {
        self.status
            .winning_mark()
            .and_then(|mark| self.player_with(mark))
    }

    fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            board: self.board,
            turn: self.turn,
            status: self.status,
            player_x: self.player_x.clone(),
            player_o: self.player_o.clone(),
            winner: self.winner().cloned(),
            last_move: self.last_move,
            winning_line: self.winning_line,
        }
    }
}
