use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::errors::LedgerError;
use crate::storage::json_backend::write_atomic;
use crate::utils::{ensure_dir, paths};

/// Application configuration handed to the external currency-formatting
/// collaborator. The engine itself only ever produces integer amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "vi-VN".into(),
            currency: "VND".into(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    /// Loads the stored configuration, defaulting when none exists yet.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }
}
