use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    ledger::{Budget, RecurringRule, Transaction},
    utils::{ensure_dir, paths},
};

use super::{Persistence, Result};

const TRANSACTIONS_FILE: &str = "transactions.json";
const BUDGETS_FILE: &str = "budgets.json";
const RECURRING_FILE: &str = "recurring.json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed persistence: one pretty-printed JSON document per collection
/// under a base directory. Writes stage to a `.tmp` sibling then rename, so
/// a crash mid-write never corrupts the previous snapshot. Missing files
/// load as empty collections.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(paths::app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.root.join(file);
        let json = serde_json::to_string_pretty(items)?;
        write_atomic(&path, &json)?;
        tracing::debug!(file, count = items.len(), "collection saved");
        Ok(())
    }
}

impl Persistence for JsonStorage {
    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        self.load_collection(TRANSACTIONS_FILE)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.save_collection(TRANSACTIONS_FILE, transactions)
    }

    fn load_budgets(&self) -> Result<Vec<Budget>> {
        self.load_collection(BUDGETS_FILE)
    }

    fn save_budgets(&self, budgets: &[Budget]) -> Result<()> {
        self.save_collection(BUDGETS_FILE, budgets)
    }

    fn load_recurring(&self) -> Result<Vec<RecurringRule>> {
        self.load_collection(RECURRING_FILE)
    }

    fn save_recurring(&self, rules: &[RecurringRule]) -> Result<()> {
        self.save_collection(RECURRING_FILE, rules)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
