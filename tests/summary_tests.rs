use chrono::NaiveDate;
use ledger_core::ledger::{
    category_breakdown, running_balance, totals, utilization, Budget, LedgerStore,
    TransactionDraft, TransactionKind, BALANCE_WINDOW,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(kind: TransactionKind, category: &str, amount: i64, date: NaiveDate) -> TransactionDraft {
    TransactionDraft::new(kind, category, amount, date).expect("valid draft")
}

#[test]
fn dashboard_scenario_totals_and_breakdown() {
    let mut store = LedgerStore::new();
    store.add(entry(
        TransactionKind::Income,
        "Đóng góp thành viên",
        1_000_000,
        date(2024, 1, 5),
    ));
    store.add(
        entry(TransactionKind::Expense, "Liên hoan", 300_000, date(2024, 1, 10))
            .with_description("Liên hoan"),
    );

    let totals = totals(store.transactions());
    assert_eq!(totals.income, 1_000_000);
    assert_eq!(totals.expense, 300_000);
    assert_eq!(totals.balance, 700_000);

    let breakdown = category_breakdown(store.transactions(), &[]);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].category, "Liên hoan");
    assert_eq!(breakdown[0].spent, 300_000);
}

#[test]
fn balance_identity_holds_for_any_ledger() {
    let mut store = LedgerStore::new();
    let amounts = [125_000, 40_000, 999_999, 0, 310_500];
    for (idx, amount) in amounts.into_iter().enumerate() {
        let kind = if idx % 2 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        store.add(entry(kind, "Khác", amount, date(2024, 3, idx as u32 + 1)));
    }

    let result = totals(store.transactions());
    assert_eq!(result.balance, result.income - result.expense);
}

#[test]
fn breakdown_is_sorted_descending_by_spent() {
    let mut store = LedgerStore::new();
    store.add(entry(TransactionKind::Expense, "Tài liệu", 120_000, date(2024, 1, 2)));
    store.add(entry(TransactionKind::Expense, "Trang phục", 800_000, date(2024, 1, 3)));
    store.add(entry(TransactionKind::Expense, "Thiết bị", 450_000, date(2024, 1, 4)));
    store.add(entry(TransactionKind::Expense, "Tài liệu", 90_000, date(2024, 1, 5)));

    let budgets = [Budget::monthly("Thiết bị", 500_000).unwrap()];
    let breakdown = category_breakdown(store.transactions(), &budgets);
    for pair in breakdown.windows(2) {
        assert!(pair[0].spent >= pair[1].spent, "not sorted: {breakdown:?}");
    }
    let equipment = breakdown
        .iter()
        .find(|entry| entry.category == "Thiết bị")
        .unwrap();
    assert_eq!(equipment.limit, 500_000);
}

#[test]
fn series_length_is_min_of_window_and_ledger() {
    let mut store = LedgerStore::new();
    for day in 1..=15 {
        store.add(entry(TransactionKind::Income, "Tài trợ", 10_000, date(2024, 1, day)));
    }

    assert_eq!(
        running_balance(store.transactions(), BALANCE_WINDOW).len(),
        BALANCE_WINDOW
    );
    assert_eq!(running_balance(store.transactions(), 100).len(), 15);
    assert_eq!(running_balance(&[], BALANCE_WINDOW).len(), 0);
}

#[test]
fn unwindowed_series_ends_at_the_ledger_balance() {
    let mut store = LedgerStore::new();
    store.add(entry(TransactionKind::Income, "Tài trợ", 2_000_000, date(2024, 2, 1)));
    store.add(entry(TransactionKind::Expense, "Liên hoan", 450_000, date(2024, 2, 10)));
    store.add(entry(TransactionKind::Expense, "Thiết bị", 50_000, date(2024, 2, 10)));

    let series = running_balance(store.transactions(), usize::MAX);
    assert_eq!(
        series.last().unwrap().balance,
        totals(store.transactions()).balance
    );
}

#[test]
fn same_date_entries_keep_insertion_order() {
    let mut store = LedgerStore::new();
    let day = date(2024, 2, 10);
    store.add(entry(TransactionKind::Income, "Tài trợ", 100_000, day));
    store.add(entry(TransactionKind::Expense, "Liên hoan", 30_000, day));
    store.add(entry(TransactionKind::Income, "Biểu diễn", 5_000, day));

    let series = running_balance(store.transactions(), BALANCE_WINDOW);
    let balances: Vec<i64> = series.iter().map(|point| point.balance).collect();
    assert_eq!(balances, vec![100_000, 70_000, 75_000]);
}

#[test]
fn utilization_spec_vectors() {
    let over = utilization(1_500_000, 1_000_000);
    assert_eq!(over.percent, 100);
    assert!(over.is_over);

    let unbudgeted = utilization(500_000, 0);
    assert_eq!(unbudgeted.percent, 0);
    assert!(!unbudgeted.is_over);
}
