mod analyze;
mod config;
mod simulation;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{SearchConfig, SearchLevel};
use tictactoe_common::{log, logger};

use analyze::analyze_board;
use config::{get_config_manager, Config, MAX_SIMULATED_GAMES};
use simulation::run_simulation;

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Config file; defaults to tictactoe_client_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the outcome of a board, or the move the AI would pick on it.
    Analyze {
        /// Nine cells, row-major: X, O and . (for example "X.O/.O./..X").
        board: String,
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play the AI against a random opponent and tally the results.
    Simulate {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SIMULATED_GAMES as i64))]
        games: Option<u32>,
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective config as YAML.
    Config {
        /// Store the default config at the config path.
        #[arg(long)]
        write_default: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Random,
    Optimal,
}

impl From<LevelArg> for SearchLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Random => SearchLevel::Random,
            LevelArg::Optimal => SearchLevel::Optimal,
        }
    }
}

fn search_with_level(search: SearchConfig, level: Option<LevelArg>) -> SearchConfig {
    match level {
        Some(level) => SearchConfig {
            level: level.into(),
            ..search
        },
        None => search,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(args.config.as_deref());
    log!("Using config {}", config_manager.file_path().display());

    match args.command {
        Command::Analyze { board, level, seed } => {
            let config = config_manager.get_config()?;
            let search = search_with_level(config.search, level);
            let mut rng = SessionRng::from_optional_seed(seed);
            let report = analyze_board(&board, &search, &mut rng)?;
            println!("{}", report);
        }
        Command::Simulate { games, level, seed } => {
            let config = config_manager.get_config()?;
            let search = search_with_level(config.search, level);
            let games = games.unwrap_or(config.simulation.games);
            let rng = SessionRng::from_optional_seed(seed.or(config.simulation.seed));
            let summary = run_simulation(games, search, rng)?;
            println!("{}", summary);
        }
        Command::Config { write_default } => {
            let shown = if write_default {
                let default_config = Config::default();
                config_manager.set_config(&default_config)?;
                log!("Default config written to {}", config_manager.file_path().display());
                default_config
            } else {
                config_manager.get_config()?
            };
            print!("{}", config_manager.to_yaml(&shown)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tictactoe_common::games::tictactoe::Player;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_level_flag_overrides_config() {
        let search = SearchConfig::new(SearchLevel::Optimal, Player::Two);

        assert_eq!(search_with_level(search, None), search);
        assert_eq!(
            search_with_level(search, Some(LevelArg::Random)),
            SearchConfig::new(SearchLevel::Random, Player::Two)
        );
    }

    #[test]
    fn test_simulate_rejects_zero_games() {
        assert!(Args::try_parse_from(["tictactoe_client", "simulate", "--games", "0"]).is_err());
        assert!(Args::try_parse_from(["tictactoe_client", "simulate", "--games", "3"]).is_ok());
    }
}
