use common::config::{
    ConfigContentProvider, ConfigManager, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};
use common::tictactoe::{Difficulty, GameMode, Scoreboard};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "xo_config.yaml";
const MAX_MOVE_DELAY_MS: u64 = 5_000;

pub type ClientConfigManager<P = FileContentConfigProvider> =
    ConfigManager<P, Config, YamlConfigSerializer>;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(path: Option<&str>) -> ClientConfigManager {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub last_mode: Option<GameMode>,
    pub difficulty: Difficulty,
    pub move_delay_ms: u64,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub scoreboard: Option<Scoreboard>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.move_delay_ms > MAX_MOVE_DELAY_MS {
            return Err(format!(
                "move_delay_ms must not exceed {}, got {}",
                MAX_MOVE_DELAY_MS, self.move_delay_ms
            ));
        }
        if let Some(ref log_file) = self.log_file
            && log_file.trim().is_empty()
        {
            return Err("log_file must not be blank".to_string());
        }
        if let Some(ref scoreboard) = self.scoreboard
            && (scoreboard.x_name.trim().is_empty() || scoreboard.o_name.trim().is_empty())
        {
            return Err("saved player names must not be blank".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_mode: None,
            difficulty: Difficulty::Optimal,
            move_delay_ms: 500,
            log_file: None,
            scoreboard: None,
        }
    }
}

pub fn save_scoreboard<P: ConfigContentProvider>(
    manager: &ClientConfigManager<P>,
    scoreboard: Option<Scoreboard>,
) -> Result<(), String> {
    manager
        .update_config(|config| config.scoreboard = scoreboard)
        .map(|_| ())
}
