mod error;
mod game_state;
mod session;
mod types;
mod win_detector;

pub mod bot_controller;

pub use bot_controller::{Evaluation, SearchConfig, SearchLevel, choose_move, describe_choice};
pub use error::{ParseBoardError, TicTacToeError};
pub use game_state::GameState;
pub use session::{GameMode, TicTacToeSession};
pub use types::{BOARD_SIZE, CELL_COUNT, Cell, Outcome, Player, Position, WinningLine};
pub use win_detector::check_win_with_line;
