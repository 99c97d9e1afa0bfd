use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".ledger_core";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.ledger_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LEDGER_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the configuration file inside a base directory.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
