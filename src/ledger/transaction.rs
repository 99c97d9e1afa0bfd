use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Stable identity of a stored transaction. Assigned by the ledger store
/// from a monotonic sequence, never reused within one ledger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// An immutable fact of money movement. Corrections are modeled as
/// delete + add; there is no in-place update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub category: String,
    /// Smallest currency unit (whole VND upstream). Never negative.
    pub amount: i64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation-time flag that triggers a companion recurring rule;
    /// not a live link back to the ledger.
    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    pub fn from_draft(id: TransactionId, draft: TransactionDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            category: draft.category,
            amount: draft.amount,
            date: draft.date,
            description: draft.description,
            is_recurring: draft.is_recurring,
        }
    }
}

/// Boundary type for entries that have not been assigned an id yet.
///
/// Construction through [`TransactionDraft::new`] validates the fields the
/// engine assumes valid everywhere else: a non-negative amount and a
/// non-blank category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: i64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: i64,
        date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        let category = category.into();
        if amount < 0 {
            return Err(LedgerError::Validation(format!(
                "transaction amount must not be negative, got {amount}"
            )));
        }
        if category.trim().is_empty() {
            return Err(LedgerError::Validation(
                "transaction category must not be blank".into(),
            ));
        }
        Ok(Self {
            kind,
            category,
            amount,
            date,
            description: None,
            is_recurring: false,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }
}

/// Category suggestions surfaced by dashboards. Never enforced; any
/// free-form label is accepted.
pub fn recommended_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &["Đóng góp thành viên", "Tài trợ", "Biểu diễn", "Khác"],
        TransactionKind::Expense => &[
            "Cơ sở vật chất",
            "Trang phục",
            "Tài liệu",
            "Liên hoan",
            "Thiết bị",
            "Khác",
        ],
    }
}
