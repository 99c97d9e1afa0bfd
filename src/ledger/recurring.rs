use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

use super::period::Period;
use super::transaction::{Transaction, TransactionDraft, TransactionKind};

/// Identifier of a recurring rule.
pub type RuleId = Uuid;

/// Cadence of a recurring obligation. Only `Monthly` is meaningfully
/// interpreted today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
}

/// Template for a periodically-due obligation. Not itself a ledger entry:
/// materialization appends detached transactions and stamps
/// `last_materialized`, never the economic fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub id: RuleId,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: Frequency,
    /// Day each period on which the obligation falls due, 1..=31. In months
    /// shorter than this the due day clamps to the month's last day.
    pub day_of_month: u32,
    /// Most recent period this rule was turned into a ledger entry for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_materialized: Option<Period>,
}

impl RecurringRule {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: i64,
        day_of_month: u32,
    ) -> Result<Self, LedgerError> {
        let category = category.into();
        if amount < 0 {
            return Err(LedgerError::Validation(format!(
                "recurring amount must not be negative, got {amount}"
            )));
        }
        if category.trim().is_empty() {
            return Err(LedgerError::Validation(
                "recurring category must not be blank".into(),
            ));
        }
        if !(1..=31).contains(&day_of_month) {
            return Err(LedgerError::Validation(format!(
                "day of month must be in 1..=31, got {day_of_month}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            category,
            amount,
            description: None,
            frequency: Frequency::Monthly,
            day_of_month,
            last_materialized: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Derives the companion rule for a transaction saved with
    /// `is_recurring = true`. The due day is the transaction's day of month.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: transaction.kind,
            category: transaction.category.clone(),
            amount: transaction.amount,
            description: transaction.description.clone(),
            frequency: Frequency::Monthly,
            day_of_month: transaction.date.day(),
            last_materialized: Some(Period::from_date(transaction.date)),
        }
    }

    pub fn is_materialized_for(&self, period: Period) -> bool {
        self.last_materialized == Some(period)
    }

    /// The date this rule falls due within `period`, clamped to month length.
    pub fn due_date(&self, period: Period) -> NaiveDate {
        period.day(self.day_of_month)
    }
}

/// The set of recurring-obligation templates, independent of the ledger
/// until materialized.
#[derive(Debug, Clone, Default)]
pub struct RecurringRuleSet {
    rules: Vec<RecurringRule>,
}

impl RecurringRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Duplicate ids are a data-integrity error.
    pub fn add(&mut self, rule: RecurringRule) -> Result<RuleId, LedgerError> {
        if self.get(rule.id).is_some() {
            return Err(LedgerError::DuplicateRule(rule.id));
        }
        let id = rule.id;
        tracing::debug!(%id, category = %rule.category, "recurring rule add");
        self.rules.push(rule);
        Ok(id)
    }

    /// Removes by id. Unknown ids are a no-op returning false.
    pub fn remove(&mut self, id: RuleId) -> bool {
        match self.rules.iter().position(|rule| rule.id == id) {
            Some(index) => {
                self.rules.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: RuleId) -> Option<&RecurringRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn rules(&self) -> &[RecurringRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Point-in-time copy for computing outside a lock.
    pub fn snapshot(&self) -> Vec<RecurringRule> {
        self.rules.clone()
    }

    /// Stamps the rule as materialized for `period`. False for unknown ids.
    pub fn mark_materialized(&mut self, id: RuleId, period: Period) -> bool {
        match self.rules.iter_mut().find(|rule| rule.id == id) {
            Some(rule) => {
                rule.last_materialized = Some(period);
                true
            }
            None => false,
        }
    }

    /// Replaces the whole collection, rejecting duplicate ids within the
    /// incoming set and leaving the store untouched on error.
    pub fn replace_all(&mut self, rules: Vec<RecurringRule>) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id) {
                return Err(LedgerError::DuplicateRule(rule.id));
            }
        }
        self.rules = rules;
        Ok(())
    }
}

/// A due obligation proposed for confirmation. The draft is detached from
/// the rule and carries `is_recurring = false`, so confirming it never
/// spawns a second rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObligationProposal {
    pub rule_id: RuleId,
    pub draft: TransactionDraft,
}

/// Determines which rules are due at `reference` and proposes ledger entries
/// for the caller to confirm. Performs no insertion itself.
///
/// A monthly rule is due when the reference date has reached the rule's
/// (clamped) due day and the rule has not been materialized for the
/// reference period, judged by `last_materialized`. For rules whose stamp is
/// unset, a match-by-fields scan of the period's transactions acts as the
/// fallback guard.
///
/// Confirmation order is transaction first, rule stamp second:
/// `LedgerStore::add(proposal.draft)`, then
/// `RecurringRuleSet::mark_materialized(proposal.rule_id, period)`.
pub fn due_obligations(
    rules: &[RecurringRule],
    transactions: &[Transaction],
    reference: NaiveDate,
) -> Vec<ObligationProposal> {
    let period = Period::from_date(reference);
    let mut proposals = Vec::new();

    for rule in rules {
        let due_date = rule.due_date(period);
        if reference < due_date {
            continue;
        }
        if rule.is_materialized_for(period) {
            continue;
        }
        if rule.last_materialized.is_none()
            && transactions
                .iter()
                .any(|tx| period.contains(tx.date) && matches_rule(tx, rule))
        {
            continue;
        }
        proposals.push(ObligationProposal {
            rule_id: rule.id,
            draft: TransactionDraft {
                kind: rule.kind,
                category: rule.category.clone(),
                amount: rule.amount,
                date: due_date,
                description: rule.description.clone(),
                is_recurring: false,
            },
        });
    }

    proposals
}

fn matches_rule(transaction: &Transaction, rule: &RecurringRule) -> bool {
    transaction.kind == rule.kind
        && transaction.amount == rule.amount
        && transaction.category == rule.category
        && transaction.description == rule.description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::store::LedgerStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn facility_rule() -> RecurringRule {
        RecurringRule::new(TransactionKind::Expense, "Cơ sở vật chất", 200_000, 15)
            .expect("valid rule")
    }

    #[test]
    fn proposes_due_rule_once_per_period() {
        let mut rules = RecurringRuleSet::new();
        let rule_id = rules.add(facility_rule()).unwrap();
        let mut ledger = LedgerStore::new();
        let reference = date(2024, 2, 20);

        let proposals = due_obligations(rules.rules(), ledger.transactions(), reference);
        assert_eq!(proposals.len(), 1);
        let proposal = &proposals[0];
        assert_eq!(proposal.rule_id, rule_id);
        assert_eq!(proposal.draft.date, date(2024, 2, 15));
        assert_eq!(proposal.draft.amount, 200_000);
        assert!(!proposal.draft.is_recurring);

        // Confirm: transaction first, stamp second.
        ledger.add(proposal.draft.clone());
        rules.mark_materialized(proposal.rule_id, Period::from_date(reference));

        let again = due_obligations(rules.rules(), ledger.transactions(), reference);
        assert!(again.is_empty(), "must not re-propose within the period");
    }

    #[test]
    fn not_due_before_day_of_month() {
        let rules = [facility_rule()];
        let proposals = due_obligations(&rules, &[], date(2024, 2, 14));
        assert!(proposals.is_empty());
    }

    #[test]
    fn due_again_next_period() {
        let mut rule = facility_rule();
        rule.last_materialized = Some(Period::new(2024, 2).unwrap());
        let proposals = due_obligations(&[rule], &[], date(2024, 3, 15));
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].draft.date, date(2024, 3, 15));
    }

    #[test]
    fn day_31_rule_clamps_to_short_month() {
        let rule = RecurringRule::new(TransactionKind::Expense, "Thiết bị", 50_000, 31).unwrap();
        let proposals = due_obligations(&[rule], &[], date(2024, 2, 29));
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].draft.date, date(2024, 2, 29));
    }

    #[test]
    fn unstamped_rule_deduplicates_by_matching_fields() {
        let rule = facility_rule();
        let mut ledger = LedgerStore::new();
        let draft = TransactionDraft::new(
            TransactionKind::Expense,
            "Cơ sở vật chất",
            200_000,
            date(2024, 2, 15),
        )
        .unwrap();
        ledger.add(draft);

        let proposals = due_obligations(&[rule], ledger.transactions(), date(2024, 2, 20));
        assert!(proposals.is_empty(), "matching ledger entry must suppress");
    }

    #[test]
    fn stamped_rules_ignore_field_collisions() {
        // Two distinct rules with identical fields stay unambiguous once
        // one of them is stamped.
        let mut first = facility_rule();
        first.last_materialized = Some(Period::new(2024, 1).unwrap());
        let mut second = facility_rule();
        second.last_materialized = Some(Period::new(2024, 2).unwrap());

        let rules = [first, second];
        let proposals = due_obligations(&rules, &[], date(2024, 2, 20));
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].rule_id, rules[0].id);
    }

    #[test]
    fn companion_rule_tracks_transaction_fields() {
        let mut ledger = LedgerStore::new();
        let draft = TransactionDraft::new(
            TransactionKind::Expense,
            "Trang phục",
            300_000,
            date(2024, 1, 12),
        )
        .unwrap()
        .with_description("Đồng phục mới")
        .recurring();
        let id = ledger.add(draft);
        let saved = ledger.get(id).unwrap();
        assert!(saved.is_recurring);

        let rule = RecurringRule::from_transaction(saved);
        assert_eq!(rule.kind, TransactionKind::Expense);
        assert_eq!(rule.category, "Trang phục");
        assert_eq!(rule.amount, 300_000);
        assert_eq!(rule.description.as_deref(), Some("Đồng phục mới"));
        assert_eq!(rule.day_of_month, 12);
        // The originating month counts as materialized.
        assert!(rule.is_materialized_for(Period::new(2024, 1).unwrap()));
    }

    #[test]
    fn rule_set_add_rejects_duplicate_id() {
        let mut rules = RecurringRuleSet::new();
        let rule = facility_rule();
        let dup = rule.clone();
        rules.add(rule).unwrap();
        let err = rules.add(dup).expect_err("duplicate rule id must fail");
        assert!(matches!(err, LedgerError::DuplicateRule(_)), "got {err:?}");
    }

    #[test]
    fn mark_materialized_unknown_id_is_false() {
        let mut rules = RecurringRuleSet::new();
        assert!(!rules.mark_materialized(Uuid::new_v4(), Period::new(2024, 2).unwrap()));
    }

    #[test]
    fn rule_validation_bounds_day_of_month() {
        assert!(RecurringRule::new(TransactionKind::Expense, "Khác", 1, 0).is_err());
        assert!(RecurringRule::new(TransactionKind::Expense, "Khác", 1, 32).is_err());
        assert!(RecurringRule::new(TransactionKind::Expense, "Khác", -1, 15).is_err());
    }
}
