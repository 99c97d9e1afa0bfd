pub mod paths;

use std::path::Path;
use std::sync::Once;

use crate::errors::LedgerError;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("ledger_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Creates the directory (and parents) when it does not exist yet.
pub fn ensure_dir(path: &Path) -> Result<(), LedgerError> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
