use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::games::tictactoe::SearchConfig;

use super::SimulationConfig;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Uses `path` when given, otherwise the file next to the executable.
pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    let path = path.map_or_else(get_config_path, Path::to_path_buf);
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.simulation.validate()?;
        Ok(())
    }
}
