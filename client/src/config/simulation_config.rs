use serde::{Deserialize, Serialize};
use tictactoe_common::config::Validate;

pub const MAX_SIMULATED_GAMES: u32 = 100_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SimulationConfig {
    pub games: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.games == 0 || self.games > MAX_SIMULATED_GAMES {
            return Err(format!(
                "simulation games must be between 1 and {}",
                MAX_SIMULATED_GAMES
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
        }
    }
}
