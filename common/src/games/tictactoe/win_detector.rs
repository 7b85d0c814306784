use super::board::Board;
use super::types::{Mark, WinningLine};

pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

/// First line, in table order, holding three equal non-empty marks.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&cells| {
        let [a, b, c] = cells.map(|index| board.get(index));
        if a != Mark::Empty && a == b && b == c {
            Some(WinningLine::new(a, cells))
        } else {
            None
        }
    })
}
