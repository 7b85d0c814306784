use std::fmt;

use super::error::MoveError;
use super::types::{GameStatus, Mark, WinningLine};
use super::win_detector::check_win_with_line;

pub const CELL_COUNT: usize = 9;
pub const CENTER: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_marks(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    /// Panics on an index past the board, like slice indexing.
    pub fn get(&self, index: usize) -> Mark {
        self.cells[index]
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn apply_move(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        if index >= CELL_COUNT {
            return Err(MoveError::OutOfBounds(index));
        }
        if mark == Mark::Empty {
            return Err(MoveError::EmptyMark);
        }
        if self.cells[index] != Mark::Empty {
            return Err(MoveError::Occupied(index));
        }

        self.cells[index] = mark;
        Ok(())
    }

    // Search backtracking only; skips validation.
    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(3).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    index < CELL_COUNT && board.get(index) == Mark::Empty
}

pub fn evaluate_terminal(board: &Board) -> GameStatus {
    if let Some(status) = check_win_with_line(board).and_then(|line| GameStatus::won_by(line.mark)) {
        return status;
    }

    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

pub fn winning_line(board: &Board) -> Option<WinningLine> {
    check_win_with_line(board)
}
