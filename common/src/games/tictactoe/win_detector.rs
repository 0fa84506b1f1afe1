use super::types::{BOARD_SIZE, Cell, Position, WinningLine};

type Line = [Position; BOARD_SIZE];

/// Rows, then columns, then the descending and ascending diagonals.
const LINES: [Line; 8] = [
    [Position::at(0, 0), Position::at(0, 1), Position::at(0, 2)],
    [Position::at(1, 0), Position::at(1, 1), Position::at(1, 2)],
    [Position::at(2, 0), Position::at(2, 1), Position::at(2, 2)],
    [Position::at(0, 0), Position::at(1, 0), Position::at(2, 0)],
    [Position::at(0, 1), Position::at(1, 1), Position::at(2, 1)],
    [Position::at(0, 2), Position::at(1, 2), Position::at(2, 2)],
    [Position::at(0, 0), Position::at(1, 1), Position::at(2, 2)],
    [Position::at(2, 0), Position::at(1, 1), Position::at(0, 2)],
];

pub fn check_win_with_line(cells: &[[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Option<WinningLine> {
    LINES.iter().find_map(|line| {
        let [first, middle, last] = *line;
        let owner = cells[first.row][first.col].owner()?;
        let complete = cells[middle.row][middle.col] == cells[first.row][first.col]
            && cells[last.row][last.col] == cells[first.row][first.col];
        complete.then(|| WinningLine::new(owner, first, last))
    })
}
