mod config;

pub use config::{ClientConfigManager, Config, get_config_manager, save_scoreboard};
