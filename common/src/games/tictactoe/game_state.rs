use std::fmt;
use std::str::FromStr;

use super::error::{ParseBoardError, TicTacToeError};
use super::types::{BOARD_SIZE, CELL_COUNT, Cell, Outcome, Player, Position, WinningLine};
use super::win_detector::check_win_with_line;

/// 3x3 grid plus a running count of marked cells.
///
/// Cells only ever go from `Empty` to a player's mark; a new game starts
/// from a fresh `GameState`. The type is `Copy`, so search branches work on
/// independent snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GameState {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    occupied_count: usize,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_cell(&mut self, pos: Position, player: Player) -> Result<(), TicTacToeError> {
        if !self.is_cell_empty(pos) {
            return Err(TicTacToeError::IllegalMove {
                row: pos.row,
                col: pos.col,
            });
        }

        self.cells[pos.row][pos.col] = Cell::from(player);
        self.occupied_count += 1;
        Ok(())
    }

    /// Out-of-board positions are never empty.
    pub fn is_cell_empty(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Empty)
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied_count
    }

    /// Empty cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_cell_empty(pos)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count == CELL_COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count == 0
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.cells)
    }

    pub fn terminal_outcome(&self) -> Outcome {
        self.terminal_outcome_with_line().0
    }

    pub fn terminal_outcome_with_line(&self) -> (Outcome, Option<WinningLine>) {
        if let Some(line) = self.winning_line() {
            return (Outcome::won_by(line.player), Some(line));
        }

        if self.is_full() {
            (Outcome::Draw, None)
        } else {
            (Outcome::InProgress, None)
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Reads nine cells in row-major order: `X` for player one, `O` for player
/// two, `.`, `-` or `_` for empty. Whitespace and `/` separators are skipped.
impl FromStr for GameState {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '/')
            .collect();

        if symbols.len() != CELL_COUNT {
            return Err(ParseBoardError::WrongCellCount { got: symbols.len() });
        }

        let mut state = GameState::new();
        for (index, (ch, pos)) in symbols.iter().zip(Position::all()).enumerate() {
            let player = match ch.to_ascii_uppercase() {
                'X' => Player::One,
                'O' => Player::Two,
                '.' | '-' | '_' => continue,
                _ => {
                    return Err(ParseBoardError::InvalidCharacter {
                        character: *ch,
                        index,
                    });
                }
            };
            state.cells[pos.row][pos.col] = Cell::from(player);
            state.occupied_count += 1;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn count_marked(state: &GameState) -> usize {
        state
            .cells()
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new();
        assert!(state.is_empty());
        assert!(!state.is_full());
        assert_eq!(state.legal_moves().len(), 9);
        assert_eq!(state.terminal_outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_counts_track_marks() {
        let mut state = GameState::new();
        let mut player = Player::One;
        for (n, position) in Position::all().enumerate() {
            assert_eq!(state.occupied_count(), n);
            assert_eq!(state.is_empty(), n == 0);
            assert!(!state.is_full());
            state.mark_cell(position, player).unwrap();
            player = player.opponent();
            assert_eq!(state.occupied_count(), count_marked(&state));
            assert_eq!(state.legal_moves().len() + state.occupied_count(), 9);
        }
        assert_eq!(state.occupied_count(), 9);
        assert!(state.is_full());
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_marking_occupied_cell_is_illegal() {
        let mut state = GameState::new();
        state.mark_cell(pos(1, 1), Player::One).unwrap();
        let before = state;

        let result = state.mark_cell(pos(1, 1), Player::Two);

        assert_eq!(result, Err(TicTacToeError::IllegalMove { row: 1, col: 1 }));
        assert_eq!(state, before);
        assert_eq!(state.cell(pos(1, 1)), Some(Cell::PlayerOne));
    }

    #[test]
    fn test_out_of_range_position_is_rejected() {
        assert_eq!(
            Position::new(3, 0),
            Err(TicTacToeError::IllegalMove { row: 3, col: 0 })
        );
    }

    #[test]
    fn test_legal_moves_are_row_major() {
        let mut state = GameState::new();
        state.mark_cell(pos(0, 1), Player::One).unwrap();
        state.mark_cell(pos(2, 0), Player::Two).unwrap();
        assert_eq!(
            state.legal_moves(),
            vec![pos(0, 0), pos(0, 2), pos(1, 0), pos(1, 1), pos(1, 2), pos(2, 1), pos(2, 2)]
        );
    }

    #[test]
    fn test_top_row_win_reports_line() {
        let mut state = GameState::new();
        state.mark_cell(pos(0, 0), Player::One).unwrap();
        state.mark_cell(pos(0, 1), Player::One).unwrap();
        assert_eq!(state.terminal_outcome(), Outcome::InProgress);
        state.mark_cell(pos(0, 2), Player::One).unwrap();

        let (outcome, line) = state.terminal_outcome_with_line();
        assert_eq!(outcome, Outcome::PlayerOneWon);
        assert_eq!(line, Some(WinningLine::new(Player::One, pos(0, 0), pos(0, 2))));
    }

    #[test]
    fn test_drawn_layout_is_draw_only_when_full() {
        // X O X
        // X O O
        // O X X
        let moves = [
            (pos(0, 0), Player::One),
            (pos(0, 1), Player::Two),
            (pos(0, 2), Player::One),
            (pos(1, 1), Player::Two),
            (pos(1, 0), Player::One),
            (pos(2, 0), Player::Two),
            (pos(2, 1), Player::One),
            (pos(1, 2), Player::Two),
        ];
        let mut state = GameState::new();
        for (position, player) in moves {
            state.mark_cell(position, player).unwrap();
            assert_eq!(state.terminal_outcome(), Outcome::InProgress);
        }
        assert_eq!(state.occupied_count(), 8);

        state.mark_cell(pos(2, 2), Player::One).unwrap();
        assert_eq!(state.terminal_outcome_with_line(), (Outcome::Draw, None));
    }

    #[test]
    fn test_win_on_full_board_is_not_a_draw() {
        let state: GameState = "XOX/OXO/OXX".parse().unwrap();
        assert!(state.is_full());
        assert_eq!(state.terminal_outcome(), Outcome::PlayerOneWon);
    }

    #[test]
    fn test_parse_and_display() {
        let state: GameState = "x.o / -O- / __X".parse().unwrap();
        assert_eq!(state.occupied_count(), 4);
        assert_eq!(state.cell(pos(0, 0)), Some(Cell::PlayerOne));
        assert_eq!(state.cell(pos(1, 1)), Some(Cell::PlayerTwo));
        assert_eq!(state.to_string(), "X.O\n.O.\n..X");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XO".parse::<GameState>(),
            Err(ParseBoardError::WrongCellCount { got: 2 })
        );
        assert_eq!(
            "XO?......".parse::<GameState>(),
            Err(ParseBoardError::InvalidCharacter {
                character: '?',
                index: 2
            })
        );
    }
}
