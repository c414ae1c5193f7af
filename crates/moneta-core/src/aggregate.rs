//! Aggregation engine
//!
//! Turns flat transaction/goal lists into the filtered, sorted, and summed
//! views each screen needs. Everything here is pure and deterministic: no
//! I/O, and empty input always yields empty or zero-valued output.

use chrono::{Datelike, NaiveDate};

use crate::models::{MonthlySummary, SavingsGoal, Transaction, TransactionType};

/// Fixed palette for category chart slices, cycled by first-seen order
pub const CHART_PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

/// One slice of the category breakdown chart
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    pub color: &'static str,
}

/// True when both dates fall in the same calendar month and year
pub fn in_same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// All transactions of the requested kind, in input order
pub fn filter_by_type(transactions: &[Transaction], kind: TransactionType) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .cloned()
        .collect()
}

/// Transactions dated in the same calendar month as `reference`
pub fn filter_current_month(transactions: &[Transaction], reference: NaiveDate) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| in_same_month(t.date, reference))
        .cloned()
        .collect()
}

/// Goals whose target date falls in the same calendar month as `reference`
pub fn goals_due_in_month(goals: &[SavingsGoal], reference: NaiveDate) -> Vec<SavingsGoal> {
    goals
        .iter()
        .filter(|g| in_same_month(g.target_date, reference))
        .cloned()
        .collect()
}

/// Arithmetic sum of transaction amounts; 0.0 for empty input
pub fn sum_amounts(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

/// Ordering key for transaction lists
///
/// Raw keys come from the sort picker as `date`, `amount`, or
/// `category_<Name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Most recent first
    Date,
    /// Highest first
    Amount,
    /// Only the named category, most recent first
    Category(String),
}

impl SortKey {
    /// Parse a raw picker key; `None` for anything unrecognized
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            other => other
                .strip_prefix("category_")
                .filter(|name| !name.is_empty())
                .map(|name| Self::Category(name.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Amount => write!(f, "amount"),
            Self::Category(name) => write!(f, "category_{}", name),
        }
    }
}

/// Stable ordering by the given key
///
/// `Category` drops transactions of other categories before ordering the
/// remainder by date descending.
pub fn sort_transactions(transactions: &[Transaction], key: &SortKey) -> Vec<Transaction> {
    let mut sorted: Vec<Transaction> = match key {
        SortKey::Category(name) => transactions
            .iter()
            .filter(|t| t.category == *name)
            .cloned()
            .collect(),
        _ => transactions.to_vec(),
    };

    match key {
        SortKey::Date | SortKey::Category(_) => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Amount => sorted.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    sorted
}

/// Sort by a raw picker key, keeping input order for unknown keys
pub fn sort_by_raw_key(transactions: &[Transaction], raw: &str) -> Vec<Transaction> {
    match SortKey::parse(raw) {
        Some(key) => sort_transactions(transactions, &key),
        None => transactions.to_vec(),
    }
}

/// Goals ordered by target date, earliest first
pub fn sort_goals(goals: &[SavingsGoal]) -> Vec<SavingsGoal> {
    let mut sorted = goals.to_vec();
    sorted.sort_by(|a, b| a.target_date.cmp(&b.target_date));
    sorted
}

/// Group expenses by category, summing per category, with a deterministic
/// palette color assigned by first-seen category order
pub fn category_slices(expenses: &[Transaction]) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();

    for expense in expenses {
        match slices.iter_mut().find(|s| s.category == expense.category) {
            Some(slice) => slice.amount += expense.amount,
            None => {
                let color = CHART_PALETTE[slices.len() % CHART_PALETTE.len()];
                slices.push(CategorySlice {
                    category: expense.category.clone(),
                    amount: expense.amount,
                    color,
                });
            }
        }
    }

    slices
}

/// Current-month summary over the fetched transaction and goal sets
///
/// Savings counts goals due in the reference month only.
pub fn monthly_summary(
    transactions: &[Transaction],
    goals: &[SavingsGoal],
    reference: NaiveDate,
) -> MonthlySummary {
    let current = filter_current_month(transactions, reference);

    let income = sum_amounts(&filter_by_type(&current, TransactionType::Income));
    let expenses = sum_amounts(&filter_by_type(&current, TransactionType::Expense));
    let savings = goals_due_in_month(goals, reference)
        .iter()
        .map(|g| g.current_amount)
        .sum();

    MonthlySummary {
        income,
        expenses,
        balance: income - expenses,
        savings,
    }
}
