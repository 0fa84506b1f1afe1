use crate::games::SessionRng;
use crate::log;
use super::bot_controller::{Evaluation, SearchConfig, SearchLevel, choose_move, describe_choice};
use super::error::TicTacToeError;
use super::game_state::GameState;
use super::types::{Outcome, Player, Position, WinningLine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    Pvp,
    #[default]
    Ai,
}

impl GameMode {
    pub fn toggled(self) -> Self {
        match self {
            GameMode::Pvp => GameMode::Ai,
            GameMode::Ai => GameMode::Pvp,
        }
    }
}

/// One game at a time: turn order, mode and the computer opponent.
pub struct TicTacToeSession {
    state: GameState,
    search: SearchConfig,
    current_player: Player,
    mode: GameMode,
    running: bool,
    rng: SessionRng,
}

impl TicTacToeSession {
    pub fn new(search: SearchConfig, mode: GameMode, rng: SessionRng) -> Self {
        Self {
            state: GameState::new(),
            search,
            current_player: Player::One,
            mode,
            running: true,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> (Outcome, Option<WinningLine>) {
        self.state.terminal_outcome_with_line()
    }

    /// Marks for the player to move and passes the turn. Ignored once the
    /// game has stopped.
    pub fn make_move(&mut self, pos: Position) -> Result<(), TicTacToeError> {
        if !self.running {
            return Ok(());
        }

        self.state.mark_cell(pos, self.current_player)?;
        self.next_turn();

        if self.is_over() {
            self.running = false;
            let (outcome, line) = self.outcome();
            match line {
                Some(line) => log!("Game over: {} ({})", outcome, line),
                None => log!("Game over: {}", outcome),
            }
        }
        Ok(())
    }

    pub fn next_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    pub fn change_game_mode(&mut self) {
        self.mode = self.mode.toggled();
        log!("Game mode switched to {:?}", self.mode);
    }

    pub fn set_level(&mut self, level: SearchLevel) {
        self.search.level = level;
        log!("AI level set to {}", level);
    }

    /// Fresh board with player one to move; mode, level and RNG carry over.
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.current_player = Player::One;
        self.running = true;
    }

    pub fn is_over(&self) -> bool {
        self.state.terminal_outcome().is_terminal()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.mode == GameMode::Ai && self.running && self.current_player == self.search.ai_marks_as
    }

    /// Lets the computer move when it is its turn; `None` otherwise.
    pub fn play_ai_turn(&mut self) -> Result<Option<(Position, Evaluation)>, TicTacToeError> {
        if !self.is_ai_turn() {
            return Ok(None);
        }

        let (pos, eval) = choose_move(&self.state, &self.search, &mut self.rng)?;
        log!("{}", describe_choice(pos, eval));
        self.make_move(pos)?;
        Ok(Some((pos, eval)))
    }

    /// Moves for whoever is not the computer, using `opponent` as its strategy.
    pub fn play_opponent_turn(
        &mut self,
        opponent: &SearchConfig,
    ) -> Result<Option<(Position, Evaluation)>, TicTacToeError> {
        if !self.running || self.is_ai_turn() {
            return Ok(None);
        }

        let (pos, eval) = choose_move(&self.state, opponent, &mut self.rng)?;
        self.make_move(pos)?;
        Ok(Some((pos, eval)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Cell;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn random_opponent() -> SearchConfig {
        SearchConfig::new(SearchLevel::Random, Player::One)
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = TicTacToeSession::new(SearchConfig::default(), GameMode::Pvp, SessionRng::new(1));
        assert_eq!(session.current_player(), Player::One);

        session.make_move(pos(0, 0)).unwrap();
        assert_eq!(session.current_player(), Player::Two);
        session.make_move(pos(1, 1)).unwrap();

        assert_eq!(session.state().cell(pos(0, 0)), Some(Cell::PlayerOne));
        assert_eq!(session.state().cell(pos(1, 1)), Some(Cell::PlayerTwo));
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn test_occupied_cell_keeps_turn() {
        let mut session = TicTacToeSession::new(SearchConfig::default(), GameMode::Pvp, SessionRng::new(1));
        session.make_move(pos(0, 0)).unwrap();

        assert!(session.make_move(pos(0, 0)).is_err());
        assert_eq!(session.current_player(), Player::Two);
    }

    #[test]
    fn test_game_stops_after_win() {
        let mut session = TicTacToeSession::new(SearchConfig::default(), GameMode::Pvp, SessionRng::new(1));
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            session.make_move(pos(row, col)).unwrap();
        }

        assert!(session.is_over());
        assert!(!session.is_running());
        assert_eq!(session.outcome().0, Outcome::PlayerOneWon);

        session.make_move(pos(2, 2)).unwrap();
        assert!(session.state().is_cell_empty(pos(2, 2)));
    }

    #[test]
    fn test_ai_moves_only_on_its_turn() {
        let mut session = TicTacToeSession::new(SearchConfig::default(), GameMode::Ai, SessionRng::new(3));
        assert!(!session.is_ai_turn());
        assert_eq!(session.play_ai_turn().unwrap(), None);

        session.make_move(pos(1, 1)).unwrap();
        assert!(session.is_ai_turn());
        let (chosen, eval) = session.play_ai_turn().unwrap().unwrap();

        assert!(matches!(eval, Evaluation::Score(_)));
        assert_eq!(session.state().occupied_count(), 2);
        assert!(!session.state().is_cell_empty(chosen));
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn test_pvp_mode_never_plays_for_ai() {
        let mut session = TicTacToeSession::new(SearchConfig::default(), GameMode::Ai, SessionRng::new(3));
        session.change_game_mode();
        assert_eq!(session.mode(), GameMode::Pvp);

        session.make_move(pos(0, 0)).unwrap();
        assert_eq!(session.play_ai_turn().unwrap(), None);

        session.change_game_mode();
        assert_eq!(session.mode(), GameMode::Ai);
    }

    #[test]
    fn test_reset_keeps_settings() {
        let mut session = TicTacToeSession::new(SearchConfig::default(), GameMode::Pvp, SessionRng::new(9));
        session.set_level(SearchLevel::Random);
        session.make_move(pos(0, 0)).unwrap();

        session.reset();

        assert!(session.state().is_empty());
        assert!(session.is_running());
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.mode(), GameMode::Pvp);
        assert_eq!(session.search().level, SearchLevel::Random);
    }

    #[test]
    fn test_optimal_ai_never_loses_to_random_play() {
        for seed in 0..12 {
            let mut session = TicTacToeSession::new(SearchConfig::default(), GameMode::Ai, SessionRng::new(seed));
            while session.is_running() {
                if session.play_ai_turn().unwrap().is_none() {
                    session.play_opponent_turn(&random_opponent()).unwrap();
                }
            }
            assert_ne!(session.outcome().0, Outcome::PlayerOneWon, "lost with seed {}", seed);
        }
    }
}
