use std::error::Error;
use std::fmt;

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    choose_move, describe_choice, Evaluation, GameState, Outcome, Position, SearchConfig,
    WinningLine,
};

pub struct AnalysisReport {
    pub state: GameState,
    pub outcome: Outcome,
    pub winning_line: Option<WinningLine>,
    pub choice: Option<(Position, Evaluation)>,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.state)?;
        write!(f, "outcome: {}", self.outcome)?;
        if let Some(line) = self.winning_line {
            write!(f, "\nwinning line: {}", line)?;
        }
        if let Some((pos, eval)) = self.choice {
            write!(f, "\n{}", describe_choice(pos, eval))?;
        }
        Ok(())
    }
}

/// Finished games are reported as they are; otherwise the search picks a move.
pub fn analyze_board(
    board: &str,
    search: &SearchConfig,
    rng: &mut SessionRng,
) -> Result<AnalysisReport, Box<dyn Error>> {
    let state: GameState = board.parse()?;
    let (outcome, winning_line) = state.terminal_outcome_with_line();

    let choice = if outcome.is_terminal() {
        None
    } else {
        Some(choose_move(&state, search, rng)?)
    };

    Ok(AnalysisReport {
        state,
        outcome,
        winning_line,
        choice,
    })
}
