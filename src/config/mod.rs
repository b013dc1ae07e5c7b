pub mod range_types;

use crate::game_logic::errors::{GauntletError, GauntletResult};
use crate::resources::GameConfig;
use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("gauntlet");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

pub fn load_config() -> GameConfig {
    if let Some(config_path) = get_config_path() {
        match fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
                Ok(config) => return config,
                Err(e) => warn!("Ignoring malformed config at {}: {e}", config_path.display()),
            },
            Err(_) => debug!("No config at {}, using defaults", config_path.display()),
        }
    }
    GameConfig::default()
}

pub fn save_config(config: &GameConfig) -> GauntletResult<()> {
    let config_path = get_config_path().ok_or(GauntletError::ConfigDirNotFound)?;
    let contents = toml::to_string_pretty(config)?;
    fs::write(config_path, contents)?;
    Ok(())
}
