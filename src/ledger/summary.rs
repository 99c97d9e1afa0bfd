//! Derived, read-only views over ledger snapshots.
//!
//! Every function here is pure and recomputes from the slice it is given.
//! There is no cached state to invalidate, so callers recompute after any
//! mutation.

use chrono::NaiveDate;
use serde::Serialize;

use super::budget::Budget;
use super::period::Period;
use super::transaction::{Transaction, TransactionKind};

/// Trailing window the dashboard's balance chart shows.
pub const BALANCE_WINDOW: usize = 10;

/// Whole-ledger income/expense/balance totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => totals.income += tx.amount,
            TransactionKind::Expense => totals.expense += tx.amount,
        }
    }
    totals.balance = totals.income - totals.expense;
    totals
}

/// Expense total of one category, paired with its budget limit (0 when no
/// budget matches).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub spent: i64,
    pub limit: i64,
}

/// Expense transactions grouped by category, largest spender first. Ties
/// keep first-encounter order, which displays assume.
pub fn category_breakdown(transactions: &[Transaction], budgets: &[Budget]) -> Vec<CategorySpend> {
    let mut breakdown: Vec<CategorySpend> = Vec::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
    {
        match breakdown
            .iter_mut()
            .find(|entry| entry.category == tx.category)
        {
            Some(entry) => entry.spent += tx.amount,
            None => breakdown.push(CategorySpend {
                category: tx.category.clone(),
                spent: tx.amount,
                limit: 0,
            }),
        }
    }
    for entry in &mut breakdown {
        if let Some(budget) = budgets.iter().find(|b| b.category == entry.category) {
            entry.limit = budget.limit;
        }
    }
    // Vec::sort_by is stable, so equal spends keep first-encounter order.
    breakdown.sort_by(|a, b| b.spent.cmp(&a.spent));
    breakdown
}

/// Cumulative balance after one transaction in date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: i64,
}

/// Chronological cumulative-balance series, truncated to the trailing
/// `window` points.
///
/// This is a cumulative scan, not a per-day aggregate: two same-day
/// transactions produce two points, in their original ledger order (the
/// sort is stable).
pub fn running_balance(transactions: &[Transaction], window: usize) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.date);

    let mut balance = 0i64;
    let mut series = Vec::with_capacity(ordered.len());
    for tx in ordered {
        match tx.kind {
            TransactionKind::Income => balance += tx.amount,
            TransactionKind::Expense => balance -= tx.amount,
        }
        series.push(BalancePoint {
            date: tx.date,
            balance,
        });
    }
    if series.len() > window {
        series.drain(..series.len() - window);
    }
    series
}

/// Spent-to-limit ratio for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Utilization {
    /// Display percentage, capped at 100.
    pub percent: u32,
    /// Computed from the raw values, never from the capped percent.
    pub is_over: bool,
}

/// Budget utilization. Without a positive limit there is no ceiling to
/// exceed: percent 0, not over.
pub fn utilization(spent: i64, limit: i64) -> Utilization {
    if limit <= 0 {
        return Utilization {
            percent: 0,
            is_over: false,
        };
    }
    let capped = spent.clamp(0, limit);
    let percent = ((capped as i128 * 100) / limit as i128) as u32;
    Utilization {
        percent,
        is_over: spent > limit,
    }
}

/// The transactions dated inside `period`, in ledger order. The dashboard
/// applies this before totals/breakdown for its "this month" views.
pub fn filter_by_period(transactions: &[Transaction], period: Period) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| period.contains(tx.date))
        .cloned()
        .collect()
}
