pub mod json_backend;
pub mod snapshot;

use crate::errors::LedgerError;
use crate::ledger::{Budget, RecurringRule, Transaction};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence collaborators.
///
/// Each pair operates on the full collection (replace-whole-collection
/// semantics, not incremental writes), matching the snapshot-based
/// read/write pattern the stores expose. Retry on I/O failure is the
/// implementor's concern; nothing in the engine retries.
pub trait Persistence: Send + Sync {
    fn load_transactions(&self) -> Result<Vec<Transaction>>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;
    fn load_budgets(&self) -> Result<Vec<Budget>>;
    fn save_budgets(&self, budgets: &[Budget]) -> Result<()>;
    fn load_recurring(&self) -> Result<Vec<RecurringRule>>;
    fn save_recurring(&self, rules: &[RecurringRule]) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use snapshot::{Snapshot, SNAPSHOT_SCHEMA_VERSION};
