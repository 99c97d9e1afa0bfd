//! Ledger domain models, stores, scheduling, and derived views.

pub mod budget;
pub mod period;
pub mod recurring;
pub mod store;
pub mod summary;
pub mod transaction;

pub use budget::{Budget, BudgetPeriod, BudgetRegistry};
pub use period::Period;
pub use recurring::{
    due_obligations, Frequency, ObligationProposal, RecurringRule, RecurringRuleSet, RuleId,
};
pub use store::LedgerStore;
pub use summary::{
    category_breakdown, filter_by_period, running_balance, totals, utilization, BalancePoint,
    CategorySpend, Totals, Utilization, BALANCE_WINDOW,
};
pub use transaction::{
    recommended_categories, Transaction, TransactionDraft, TransactionId, TransactionKind,
};
