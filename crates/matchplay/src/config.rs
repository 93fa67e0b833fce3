//! Optional `matchplay.toml` configuration.
//!
//! Every field is optional; anything absent falls back to the engine's
//! defaults. Example:
//!
//! ```toml
//! seed = 42
//! cache_capacity = 100000
//!
//! [difficulty]
//! profiles = [
//!   { max_depth = 2, time_limit_ms = 400 },
//!   { max_depth = 3, time_limit_ms = 900 },
//!   { max_depth = 4, time_limit_ms = 1800 },
//!   { max_depth = 5, time_limit_ms = 3500 },
//!   { max_depth = 6, time_limit_ms = 6000 },
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;

use minimax_engine::{DifficultyTable, SessionConfig};

pub const CONFIG_FILE: &str = "matchplay.toml";

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub seed: Option<u64>,
    pub cache_capacity: Option<usize>,
    pub difficulty: Option<DifficultyTable>,
}

impl FileConfig {
    /// Loads the config file if present; a missing file is the default
    /// config, a malformed one is reported and ignored.
    pub fn load(path: &Path) -> FileConfig {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return FileConfig::default(),
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: ignoring malformed {}: {e}", path.display());
                FileConfig::default()
            }
        }
    }

    /// Engine session config with this file's overrides applied.
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::default();
        if let Some(capacity) = self.cache_capacity {
            config.cache_capacity = capacity;
        }
        if let Some(table) = &self.difficulty {
            config.difficulty_table = table.clone();
        }
        config.seed = self.seed;
        config
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
