use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// A spending ceiling for a specific category within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Upsert key; at most one budget per category. Need not match any
    /// transaction category; unmatched budgets simply show zero spend.
    pub category: String,
    /// Smallest currency unit, same as transaction amounts.
    pub limit: i64,
    pub period: BudgetPeriod,
}

impl Budget {
    pub fn new(
        category: impl Into<String>,
        limit: i64,
        period: BudgetPeriod,
    ) -> Result<Self, LedgerError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(LedgerError::Validation(
                "budget category must not be blank".into(),
            ));
        }
        if limit <= 0 {
            return Err(LedgerError::Validation(format!(
                "budget limit must be positive, got {limit}"
            )));
        }
        Ok(Self {
            category,
            limit,
            period,
        })
    }

    pub fn monthly(category: impl Into<String>, limit: i64) -> Result<Self, LedgerError> {
        Self::new(category, limit, BudgetPeriod::Monthly)
    }
}

/// Enumeration of budgeting periods. Only `Monthly` is meaningfully
/// interpreted today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
}

/// Per-category budgets, keyed by category. Upserting an existing category
/// overwrites its budget in place.
#[derive(Debug, Clone, Default)]
pub struct BudgetRegistry {
    budgets: Vec<Budget>,
}

impl BudgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing budget with the same category, else appends.
    pub fn upsert(&mut self, budget: Budget) {
        tracing::debug!(category = %budget.category, limit = budget.limit, "budget upsert");
        match self
            .budgets
            .iter_mut()
            .find(|existing| existing.category == budget.category)
        {
            Some(existing) => *existing = budget,
            None => self.budgets.push(budget),
        }
    }

    /// Removes by category. Unknown categories are a no-op returning false.
    pub fn remove(&mut self, category: &str) -> bool {
        match self
            .budgets
            .iter()
            .position(|budget| budget.category == category)
        {
            Some(index) => {
                self.budgets.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.category == category)
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Point-in-time copy for computing outside a lock.
    pub fn snapshot(&self) -> Vec<Budget> {
        self.budgets.clone()
    }

    /// Replaces the whole collection. Later entries for a repeated category
    /// win, matching upsert semantics.
    pub fn replace_all(&mut self, budgets: Vec<Budget>) {
        self.budgets.clear();
        for budget in budgets {
            self.upsert(budget);
        }
    }
}
