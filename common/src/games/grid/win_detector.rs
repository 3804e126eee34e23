use super::types::{Board, Mark, Position, WinningLine, GRID_SIZE};

// Row step, column step: horizontal, vertical, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

/// Finds a full line of one non-empty mark anywhere on the grid.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let mark = board[row][col];
            if mark == Mark::Empty {
                continue;
            }

            for &(row_step, col_step) in &DIRECTIONS {
                if let Some(end) = line_end(row, col, row_step, col_step)
                    && line_is_filled(board, row, col, row_step, col_step, mark)
                {
                    let start = Position::try_new(row, col)?;
                    return Some(WinningLine::new(mark, start, end));
                }
            }
        }
    }

    None
}

pub fn is_board_full(board: &Board) -> bool {
    board
        .iter()
        .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
}

fn step(row: usize, col: usize, row_step: isize, col_step: isize, distance: isize) -> Option<(usize, usize)> {
    let r = row as isize + row_step * distance;
    let c = col as isize + col_step * distance;
    if r < 0 || c < 0 {
        return None;
    }
    Some((r as usize, c as usize))
}

fn line_end(row: usize, col: usize, row_step: isize, col_step: isize) -> Option<Position> {
    let (r, c) = step(row, col, row_step, col_step, GRID_SIZE as isize - 1)?;
    Position::try_new(r, c)
}

fn line_is_filled(board: &Board, row: usize, col: usize, row_step: isize, col_step: isize, mark: Mark) -> bool {
    (1..GRID_SIZE as isize).all(|distance| {
        step(row, col, row_step, col_step, distance)
            .is_some_and(|(r, c)| r < GRID_SIZE && c < GRID_SIZE && board[r][c] == mark)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_win(&[[E; GRID_SIZE]; GRID_SIZE]), None);
    }

    #[test]
    fn test_row_win() {
        let board = [[E, E, E], [O, O, O], [X, X, E]];
        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, O);
        assert_eq!(line.start, Position::try_new(1, 0).unwrap());
        assert_eq!(line.end, Position::try_new(1, 2).unwrap());
    }

    #[test]
    fn test_column_win() {
        let board = [[X, O, E], [X, O, E], [X, E, E]];
        assert_eq!(check_win(&board), Some(X));
    }

    #[test]
    fn test_main_diagonal_win() {
        let board = [[O, X, X], [E, O, X], [E, E, O]];
        assert_eq!(check_win(&board), Some(O));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = [[O, O, X], [E, X, E], [X, E, E]];
        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, X);
        assert_eq!(line.start, Position::try_new(0, 2).unwrap());
        assert_eq!(line.end, Position::try_new(2, 0).unwrap());
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        let board = [[X, X, E], [O, O, E], [E, E, E]];
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_full_board_without_line() {
        let board = [[X, O, X], [X, O, O], [O, X, X]];
        assert_eq!(check_win(&board), None);
        assert!(is_board_full(&board));
    }
}
