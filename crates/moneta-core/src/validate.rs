//! Pre-network input validation for the entry forms
//!
//! Every check here runs before a request is issued; a failure surfaces as
//! `Error::Validation` with the message the form shows, and nothing is sent.

use chrono::NaiveDate;

use crate::api::{SavingsGoalPayload, TransactionPayload};
use crate::error::{Error, Result};
use crate::models::TransactionType;

/// Unvalidated transaction form input
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub name: Option<String>,
    pub kind: TransactionType,
    /// Raw text-field content
    pub amount: String,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Validate into an outgoing payload
    pub fn validate(&self) -> Result<TransactionPayload> {
        let field = match self.kind {
            TransactionType::Income => "source",
            TransactionType::Expense => "category",
        };
        if self.amount.trim().is_empty() || self.category.trim().is_empty() {
            return Err(Error::Validation(format!(
                "Please enter an amount and select a {}",
                field
            )));
        }

        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| Error::Validation("Please enter a valid amount".to_string()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::Validation("Please enter a valid amount".to_string()));
        }

        Ok(TransactionPayload {
            name: self.name.clone().filter(|n| !n.trim().is_empty()),
            kind: self.kind,
            amount: format!("{:.2}", amount),
            category: self.category.clone(),
            date: self.date,
        })
    }
}

/// Unvalidated savings-goal form input
#[derive(Debug, Clone)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: String,
    /// Optional; empty means starting from zero
    pub current_amount: String,
    pub target_date: NaiveDate,
}

impl GoalDraft {
    /// Validate into an outgoing payload; `today` anchors the date check
    pub fn validate(&self, today: NaiveDate) -> Result<SavingsGoalPayload> {
        if self.name.trim().is_empty() || self.target_amount.trim().is_empty() {
            return Err(Error::Validation(
                "Please enter a name and target amount".to_string(),
            ));
        }

        let target: f64 = self
            .target_amount
            .trim()
            .parse()
            .map_err(|_| Error::Validation("Please enter a valid target amount".to_string()))?;
        if !target.is_finite() || target <= 0.0 {
            return Err(Error::Validation(
                "Please enter a valid target amount".to_string(),
            ));
        }

        let current: f64 = if self.current_amount.trim().is_empty() {
            0.0
        } else {
            let value: f64 = self.current_amount.trim().parse().map_err(|_| {
                Error::Validation("Please enter a valid current amount".to_string())
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Validation(
                    "Please enter a valid current amount".to_string(),
                ));
            }
            value
        };

        if current > target {
            return Err(Error::Validation(
                "Current amount cannot be greater than target amount".to_string(),
            ));
        }

        if self.target_date < today {
            return Err(Error::Validation(
                "Target date cannot be before today".to_string(),
            ));
        }

        Ok(SavingsGoalPayload {
            name: self.name.trim().to_string(),
            target_amount: format!("{:.2}", target),
            current_amount: format!("{:.2}", current),
            target_date: self.target_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: &str, category: &str) -> TransactionDraft {
        TransactionDraft {
            name: None,
            kind: TransactionType::Expense,
            amount: amount.to_string(),
            category: category.to_string(),
            date: "2026-03-04".parse().unwrap(),
        }
    }

    fn goal(name: &str, target: &str, current: &str, date: &str) -> GoalDraft {
        GoalDraft {
            name: name.to_string(),
            target_amount: target.to_string(),
            current_amount: current.to_string(),
            target_date: date.parse().unwrap(),
        }
    }

    #[test]
    fn valid_transaction_formats_two_decimals() {
        let payload = draft("12.5", "Food").validate().unwrap();
        assert_eq!(payload.amount, "12.50");
        assert_eq!(payload.category, "Food");
    }

    #[test]
    fn missing_amount_or_category_is_rejected() {
        assert!(draft("", "Food").validate().is_err());
        assert!(draft("12.5", "").validate().is_err());
    }

    #[test]
    fn income_message_says_source() {
        let mut d = draft("", "");
        d.kind = TransactionType::Income;
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn non_positive_or_garbage_amounts_are_rejected() {
        assert!(draft("0", "Food").validate().is_err());
        assert!(draft("-5", "Food").validate().is_err());
        assert!(draft("abc", "Food").validate().is_err());
        assert!(draft("NaN", "Food").validate().is_err());
    }

    #[test]
    fn goal_checks_run_in_form_order() {
        let today: NaiveDate = "2026-03-04".parse().unwrap();

        assert!(goal("", "100", "", "2026-06-01").validate(today).is_err());
        assert!(goal("Trip", "0", "", "2026-06-01").validate(today).is_err());
        assert!(goal("Trip", "100", "-1", "2026-06-01").validate(today).is_err());

        let err = goal("Trip", "100", "150", "2026-06-01")
            .validate(today)
            .unwrap_err();
        assert!(err.to_string().contains("greater than target"));

        let err = goal("Trip", "100", "50", "2026-03-03")
            .validate(today)
            .unwrap_err();
        assert!(err.to_string().contains("before today"));
    }

    #[test]
    fn empty_current_amount_starts_at_zero() {
        let today: NaiveDate = "2026-03-04".parse().unwrap();
        let payload = goal("Trip", "100", "", "2026-06-01").validate(today).unwrap();
        assert_eq!(payload.current_amount, "0.00");
        assert_eq!(payload.target_amount, "100.00");
    }
}
