mod config;
mod simulation_config;

pub use config::{get_config_manager, Config};
pub use simulation_config::{SimulationConfig, MAX_SIMULATED_GAMES};
