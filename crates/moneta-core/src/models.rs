//! Domain models for Moneta

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The fixed category option set for this kind, as offered by the entry
    /// forms. Free-form labels outside this set are still accepted on read.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &INCOME_CATEGORIES,
            Self::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expense categories offered by the add-expense form
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transportation",
    "Housing",
    "Entertainment",
    "Shopping",
    "Utilities",
    "Healthcare",
    "Other",
];

/// Income categories offered by the add-income form
pub const INCOME_CATEGORIES: [&str; 3] = ["Salary", "Investments", "Other"];

/// A single income or expense record
///
/// Immutable once fetched; identity is `id`. Instances only exist after wire
/// validation (see `api::types`), so `amount` is always a non-negative finite
/// number and `date` a valid calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    /// Display label: the optional name, falling back to the category
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.category)
    }
}

/// A savings goal with a funding target and deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
}

impl SavingsGoal {
    /// Funding progress in [0.0, 1.0]
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount).clamp(0.0, 1.0)
    }
}

/// Current-month totals derived from the in-memory transaction and goal sets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income: f64,
    pub expenses: f64,
    /// income - expenses
    pub balance: f64,
    /// Sum of `current_amount` over goals due this month
    pub savings: f64,
}

/// Authenticated user profile, as returned by login/register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// One point of a daily accumulated-expense series (week and month views)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyExpensePoint {
    pub date: NaiveDate,
    pub accumulated_expense: f64,
}

/// One point of a monthly accumulated-expense series (year view)
///
/// `month` is 1-based (1 = January), as the backend sends it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpensePoint {
    pub month: u32,
    pub accumulated_expense: f64,
}

/// Accumulated-expense series for the three projection granularities,
/// as returned by `GET expense-predictions/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpensePredictions {
    #[serde(default)]
    pub this_week_expense: Vec<DailyExpensePoint>,
    #[serde(default)]
    pub this_month_expense: Vec<DailyExpensePoint>,
    #[serde(default)]
    pub this_year_expense: Vec<MonthlyExpensePoint>,
}

/// Response of `GET ai-suggestions/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suggestions {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn transaction_type_round_trip() {
        assert_eq!(TransactionType::from_str("expense").unwrap(), TransactionType::Expense);
        assert_eq!(TransactionType::from_str("Income").unwrap(), TransactionType::Income);
        assert_eq!(TransactionType::Expense.to_string(), "expense");
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn transaction_type_serde_is_lowercase() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, "\"income\"");
        let back: TransactionType = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(back, TransactionType::Expense);
    }

    #[test]
    fn goal_progress_is_clamped() {
        let mut goal = SavingsGoal {
            id: 1,
            name: "Vacation".into(),
            target_amount: 200.0,
            current_amount: 50.0,
            target_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        };
        assert!((goal.progress() - 0.25).abs() < f64::EPSILON);

        // Server does not enforce current <= target
        goal.current_amount = 500.0;
        assert_eq!(goal.progress(), 1.0);

        goal.target_amount = 0.0;
        assert_eq!(goal.progress(), 0.0);
    }

    #[test]
    fn transaction_label_falls_back_to_category() {
        let tx = Transaction {
            id: 1,
            name: None,
            kind: TransactionType::Expense,
            amount: 12.0,
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
        };
        assert_eq!(tx.label(), "Food");
    }
}
