use std::fmt;

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    GameMode, Outcome, SearchConfig, SearchLevel, TicTacToeError, TicTacToeSession,
};
use tictactoe_common::log;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSummary {
    pub player_one_wins: u32,
    pub player_two_wins: u32,
    pub draws: u32,
}

impl SimulationSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerOneWon => self.player_one_wins += 1,
            Outcome::PlayerTwoWon => self.player_two_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    pub fn games(&self) -> u32 {
        self.player_one_wins + self.player_two_wins + self.draws
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games: {}, player one wins: {}, player two wins: {}, draws: {}",
            self.games(),
            self.player_one_wins,
            self.player_two_wins,
            self.draws
        )
    }
}

/// The computer plays per `search`; its opponent picks uniformly at random.
pub fn run_simulation(
    games: u32,
    search: SearchConfig,
    rng: SessionRng,
) -> Result<SimulationSummary, TicTacToeError> {
    log!(
        "Simulating {} games, AI {} as {}, seed {}",
        games,
        search.level,
        search.ai_marks_as,
        rng.seed()
    );

    let opponent = SearchConfig::new(SearchLevel::Random, search.ai_marks_as.opponent());
    let mut session = TicTacToeSession::new(search, GameMode::Ai, rng);
    let mut summary = SimulationSummary::default();

    for _ in 0..games {
        session.reset();
        while session.is_running() {
            if session.play_ai_turn()?.is_none() {
                session.play_opponent_turn(&opponent)?;
            }
        }
        summary.record(session.outcome().0);
    }

    Ok(summary)
}
