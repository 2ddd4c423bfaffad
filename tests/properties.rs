//! Properties of the filter and aggregation pipeline

use chrono::{Days, NaiveDate, Utc};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use spendboard::models::{Currency, Expense, ExpenseId, Money};
use spendboard::reports::{aggregate, scale_to_max, ExpenseSummary, GroupBy};
use spendboard::services::filter::{filter_expenses, DateWindow, FilterCriteria};
use spendboard::services::{DeleteOutcome, ExpenseService};
use spendboard::storage::Storage;

const CATEGORIES: [&str; 4] = ["Food", "Office", "Transportation", "Marketing"];
const ACCOUNTS: [&str; 3] = ["Petty Cash", "Company Bank Account", "Personal Debit Card"];

/// (day offset, price in cents, category index, account index)
type Seed = (u8, u32, u8, u8);

fn build(seeds: &[Seed]) -> Vec<Expense> {
    let first_day = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
    seeds
        .iter()
        .enumerate()
        .map(|(i, &(day, cents, category, account))| Expense {
            id: ExpenseId::new(i.to_string()),
            date: first_day + Days::new(u64::from(day % 60)),
            price: Money::from_cents(i64::from(cents % 1_000_000)),
            currency: Currency::Eur,
            expense_type: "Business".into(),
            category: CATEGORIES[category as usize % CATEGORIES.len()].into(),
            subcategory: String::new(),
            account: ACCOUNTS[account as usize % ACCOUNTS.len()].into(),
            created_by: "Jane Smith".into(),
            description: None,
            created_at: Utc::now(),
        })
        .collect()
}

fn december() -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

#[quickcheck]
fn grouping_preserves_total(seeds: Vec<Seed>) -> bool {
    let expenses = build(&seeds);
    let total: Money = expenses.iter().map(|e| e.price).sum();

    [GroupBy::Category, GroupBy::Account].into_iter().all(|group_by| {
        let rows = aggregate(&expenses, group_by);
        let grouped: Money = rows.iter().map(|r| r.total).sum();
        let counted: usize = rows.iter().map(|r| r.count).sum();
        grouped == total && counted == expenses.len()
    })
}

#[quickcheck]
fn groups_are_sorted_by_total(seeds: Vec<Seed>) -> bool {
    let expenses = build(&seeds);
    let rows = aggregate(&expenses, GroupBy::Category);
    rows.windows(2).all(|pair| pair[0].total >= pair[1].total)
}

#[quickcheck]
fn shares_are_fractions_of_the_largest(seeds: Vec<Seed>) -> bool {
    let expenses = build(&seeds);
    let rows = aggregate(&expenses, GroupBy::Account);
    let scaled = scale_to_max(&rows);

    scaled.len() == rows.len() && scaled.iter().all(|s| (0.0..=1.0).contains(&s.share))
}

#[quickcheck]
fn window_only_filter_selects_exactly_the_window(seeds: Vec<Seed>) -> bool {
    let expenses = build(&seeds);
    let window = december();

    let filtered = filter_expenses(&expenses, &FilterCriteria::new(window));
    let expected: Vec<&Expense> = expenses
        .iter()
        .filter(|e| window.start <= e.date && e.date <= window.end)
        .collect();

    filtered == expected
}

#[quickcheck]
fn category_filter_is_a_subset(seeds: Vec<Seed>, pick: u8) -> bool {
    let expenses = build(&seeds);
    let category = CATEGORIES[pick as usize % CATEGORIES.len()];

    let all = filter_expenses(&expenses, &FilterCriteria::new(december()));
    let narrowed = filter_expenses(&expenses, &FilterCriteria::new(december()).category(category));

    narrowed.iter().all(|e| e.category == category && all.contains(e))
        && narrowed.len() == all.iter().filter(|e| e.category == category).count()
}

#[quickcheck]
fn average_is_total_over_count(seeds: Vec<Seed>) -> bool {
    let expenses = build(&seeds);
    let summary = ExpenseSummary::from_expenses(&expenses);

    if summary.count == 0 {
        return summary.total.is_zero() && summary.average.is_zero();
    }

    let n = summary.count as i64;
    let error = (summary.average.cents() * n - summary.total.cents()).abs();
    error * 2 <= n
}

#[quickcheck]
fn deleting_an_existing_id_removes_exactly_it(seeds: Vec<Seed>, pick: usize) -> TestResult {
    if seeds.is_empty() {
        return TestResult::discard();
    }

    let mut storage = Storage::with_expenses(build(&seeds)).unwrap();
    let before = storage.expenses.len();
    let id = ExpenseId::new((pick % before).to_string());

    let outcome = ExpenseService::new(&mut storage)
        .delete(&id, |_| true)
        .unwrap();

    TestResult::from_bool(
        outcome.is_deleted()
            && storage.expenses.len() == before - 1
            && !storage.expenses.contains(&id),
    )
}

#[quickcheck]
fn deleting_an_absent_id_changes_nothing(seeds: Vec<Seed>) -> bool {
    let expenses = build(&seeds);
    let mut storage = Storage::with_expenses(expenses.clone()).unwrap();

    let outcome = ExpenseService::new(&mut storage)
        .delete(&ExpenseId::new("absent"), |_| true)
        .unwrap();

    outcome == DeleteOutcome::NotFound && storage.expenses.all() == expenses.as_slice()
}
