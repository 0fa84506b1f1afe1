use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::error::TicTacToeError;
use super::game_state::GameState;
use super::types::{Outcome, Player, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLevel {
    Random,
    #[default]
    Optimal,
}

impl fmt::Display for SearchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchLevel::Random => write!(f, "random"),
            SearchLevel::Optimal => write!(f, "optimal"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub level: SearchLevel,
    /// Mark placed on the minimizing plies of the search.
    pub ai_marks_as: Player,
}

impl SearchConfig {
    pub fn new(level: SearchLevel, ai_marks_as: Player) -> Self {
        Self { level, ai_marks_as }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(SearchLevel::Optimal, Player::Two)
    }
}

/// Score attached to a chosen move, from player one's point of view:
/// +1 player one wins, -1 player two wins, 0 draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// The random strategy does not evaluate anything.
    Unscored,
    Score(i32),
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Unscored => write!(f, "random"),
            Evaluation::Score(score) => write!(f, "{}", score),
        }
    }
}

pub fn describe_choice(pos: Position, eval: Evaluation) -> String {
    format!("AI has chosen to mark the square in pos {} with an eval of {}", pos, eval)
}

pub fn choose_move(
    state: &GameState,
    config: &SearchConfig,
    rng: &mut SessionRng,
) -> Result<(Position, Evaluation), TicTacToeError> {
    match config.level {
        SearchLevel::Random => calculate_random_move(state, rng),
        SearchLevel::Optimal => calculate_minimax_move(state, config.ai_marks_as),
    }
}

fn calculate_random_move(
    state: &GameState,
    rng: &mut SessionRng,
) -> Result<(Position, Evaluation), TicTacToeError> {
    let available_moves = state.legal_moves();
    let pos = rng
        .choose(&available_moves)
        .copied()
        .ok_or(TicTacToeError::NoLegalMoves)?;
    Ok((pos, Evaluation::Unscored))
}

/// The root is always a minimizing ply, whoever is actually to move.
fn calculate_minimax_move(
    state: &GameState,
    ai_player: Player,
) -> Result<(Position, Evaluation), TicTacToeError> {
    if state.is_full() {
        return Err(TicTacToeError::NoLegalMoves);
    }

    let (score, best_move) = minimax(state, false, ai_player)?;
    let pos = best_move.ok_or(TicTacToeError::NoLegalMoves)?;
    Ok((pos, Evaluation::Score(score)))
}

/// Full-depth search without pruning beyond the +1 cutoff.
///
/// The maximizing side always marks as player one and starts from a best
/// score of 0, keeping the first strictly better move; a node whose children
/// are all 0 or -1 therefore reports 0 and no move. The minimizing side marks
/// as `ai_player`, starts from 1 and accepts `<=`, so the last of equally
/// good moves wins.
fn minimax(
    state: &GameState,
    is_maximizing: bool,
    ai_player: Player,
) -> Result<(i32, Option<Position>), TicTacToeError> {
    match state.terminal_outcome() {
        Outcome::PlayerOneWon => return Ok((1, None)),
        Outcome::PlayerTwoWon => return Ok((-1, None)),
        Outcome::Draw => return Ok((0, None)),
        Outcome::InProgress => {}
    }

    let mut best_move = None;

    if is_maximizing {
        let mut max_eval = 0;
        for pos in state.legal_moves() {
            let mut child = *state;
            child.mark_cell(pos, Player::One)?;
            let (eval, _) = minimax(&child, false, ai_player)?;

            if eval > max_eval {
                max_eval = eval;
                best_move = Some(pos);
                if max_eval == 1 {
                    break;
                }
            }
        }
        Ok((max_eval, best_move))
    } else {
        let mut min_eval = 1;
        for pos in state.legal_moves() {
            let mut child = *state;
            child.mark_cell(pos, ai_player)?;
            let (eval, _) = minimax(&child, true, ai_player)?;

            if eval <= min_eval {
                min_eval = eval;
                best_move = Some(pos);
            }
        }
        Ok((min_eval, best_move))
    }
}
