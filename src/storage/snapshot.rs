use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::ledger::{Budget, BudgetRegistry, LedgerStore, RecurringRule, RecurringRuleSet, Transaction};

use super::Result;

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serializable backup document covering all three stores.
///
/// Every collection field defaults when missing, and serde skips unknown
/// fields, so documents from older or newer minor revisions import cleanly.
/// Restore is atomic-fail: a document that does not validate leaves every
/// store exactly as it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "Snapshot::schema_version_default")]
    pub schema_version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
}

impl Snapshot {
    pub fn capture(
        ledger: &LedgerStore,
        budgets: &BudgetRegistry,
        rules: &RecurringRuleSet,
    ) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            transactions: ledger.snapshot(),
            budgets: budgets.snapshot(),
            recurring: rules.snapshot(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(data)?;
        if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "snapshot schema version {} is newer than supported version {}",
                snapshot.schema_version, SNAPSHOT_SCHEMA_VERSION
            )));
        }
        Ok(snapshot)
    }

    /// Replaces the content of all three stores with this snapshot.
    ///
    /// Staged onto fresh stores first; the live stores are only swapped
    /// after every collection validated, so a bad document touches nothing.
    pub fn restore(
        self,
        ledger: &mut LedgerStore,
        budgets: &mut BudgetRegistry,
        rules: &mut RecurringRuleSet,
    ) -> Result<()> {
        if self.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "snapshot schema version {} is newer than supported version {}",
                self.schema_version, SNAPSHOT_SCHEMA_VERSION
            )));
        }

        let mut staged_ledger = LedgerStore::new();
        staged_ledger.replace_all(self.transactions)?;
        let mut staged_budgets = BudgetRegistry::new();
        staged_budgets.replace_all(self.budgets);
        let mut staged_rules = RecurringRuleSet::new();
        staged_rules.replace_all(self.recurring)?;

        *ledger = staged_ledger;
        *budgets = staged_budgets;
        *rules = staged_rules;
        tracing::info!(
            transactions = ledger.len(),
            budgets = budgets.len(),
            rules = rules.len(),
            "snapshot restored"
        );
        Ok(())
    }

    fn schema_version_default() -> u32 {
        SNAPSHOT_SCHEMA_VERSION
    }
}
