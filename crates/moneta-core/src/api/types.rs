//! Wire types for the backend REST API
//!
//! The backend transmits amounts as decimal strings or numbers and dates as
//! `YYYY-MM-DD` strings. Collections are deserialized leniently into raw
//! records and validated one by one, so a single malformed record is dropped
//! (and counted) instead of failing the whole fetch or propagating NaN into
//! aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{SavingsGoal, Transaction, TransactionType, User};

/// An amount field as sent on the wire: number or decimal-formatted string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Parse to a finite, non-negative number
    pub fn parse(&self) -> Result<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidData(format!("Unparsable amount: {:?}", s)))?,
        };

        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidData(format!("Invalid amount: {}", value)));
        }
        Ok(value)
    }
}

fn parse_wire_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| Error::InvalidData(format!("Unparsable date: {:?}", raw)))
}

/// A transaction as received, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: RawAmount,
    pub category: String,
    pub date: String,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = Error;

    fn try_from(raw: RawTransaction) -> Result<Self> {
        let kind: TransactionType = raw.kind.parse().map_err(Error::InvalidData)?;
        Ok(Transaction {
            id: raw.id,
            name: raw.name.filter(|n| !n.is_empty()),
            kind,
            amount: raw.amount.parse()?,
            category: raw.category,
            date: parse_wire_date(&raw.date)?,
        })
    }
}

/// A savings goal as received, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawSavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: RawAmount,
    pub current_amount: RawAmount,
    pub target_date: String,
}

impl TryFrom<RawSavingsGoal> for SavingsGoal {
    type Error = Error;

    fn try_from(raw: RawSavingsGoal) -> Result<Self> {
        Ok(SavingsGoal {
            id: raw.id,
            name: raw.name,
            target_amount: raw.target_amount.parse()?,
            current_amount: raw.current_amount.parse()?,
            target_date: parse_wire_date(&raw.target_date)?,
        })
    }
}

/// A validated collection fetch, with the count of records that failed
/// validation and were excluded
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub dropped: usize,
}

/// Validate raw records one by one, logging and counting rejects
pub fn validate_records<R, T>(raw: Vec<R>, resource: &str) -> Fetched<T>
where
    T: TryFrom<R, Error = Error>,
{
    let total = raw.len();
    let mut records = Vec::with_capacity(total);
    for record in raw {
        match T::try_from(record) {
            Ok(value) => records.push(value),
            Err(e) => warn!(resource, error = %e, "Dropping malformed record"),
        }
    }

    let dropped = total - records.len();
    if dropped > 0 {
        warn!(resource, dropped, "Excluded malformed records from fetch");
    }
    Fetched { records, dropped }
}

/// Body of `POST login/`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST login/`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl LoginResponse {
    pub fn into_parts(self) -> (String, User) {
        let user = User {
            id: self.user_id,
            username: self.username,
            email: self.email,
        };
        (self.token, user)
    }
}

/// Body of `POST register/`
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST register/`
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: User,
}

/// Outgoing transaction body for create/update
///
/// Amounts go out as two-decimal strings, which is what the backend's
/// decimal fields expect from the entry forms.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Outgoing savings-goal body for create/update
#[derive(Debug, Clone, Serialize)]
pub struct SavingsGoalPayload {
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let from_json = |j: &str| serde_json::from_str::<RawAmount>(j).unwrap();
        assert_eq!(from_json("12.5").parse().unwrap(), 12.5);
        assert_eq!(from_json("\"12.50\"").parse().unwrap(), 12.5);
        assert_eq!(from_json("\" 7 \"").parse().unwrap(), 7.0);
        assert!(from_json("\"twelve\"").parse().is_err());
        assert!(from_json("-3.0").parse().is_err());
    }

    #[test]
    fn raw_transaction_validates_into_domain() {
        let raw: RawTransaction = serde_json::from_str(
            r#"{"id": 7, "name": "Lunch", "type": "expense", "amount": "12.50",
                "category": "Food", "date": "2026-03-04"}"#,
        )
        .unwrap();
        let tx = Transaction::try_from(raw).unwrap();

        assert_eq!(tx.id, 7);
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.amount, 12.5);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
    }

    #[test]
    fn malformed_records_are_dropped_and_counted() {
        let raw: Vec<RawTransaction> = serde_json::from_str(
            r#"[
                {"id": 1, "type": "expense", "amount": 5, "category": "Food", "date": "2026-03-04"},
                {"id": 2, "type": "expense", "amount": 5, "category": "Food", "date": "not-a-date"},
                {"id": 3, "type": "windfall", "amount": 5, "category": "Food", "date": "2026-03-04"},
                {"id": 4, "type": "income", "amount": "oops", "category": "Salary", "date": "2026-03-04"}
            ]"#,
        )
        .unwrap();

        let fetched: Fetched<Transaction> = validate_records(raw, "transactions");
        assert_eq!(fetched.records.len(), 1);
        assert_eq!(fetched.dropped, 3);
        assert_eq!(fetched.records[0].id, 1);
    }

    #[test]
    fn empty_wire_name_becomes_none() {
        let raw: RawTransaction = serde_json::from_str(
            r#"{"id": 1, "name": "", "type": "expense", "amount": 5,
                "category": "Food", "date": "2026-03-04"}"#,
        )
        .unwrap();
        assert_eq!(Transaction::try_from(raw).unwrap().name, None);
    }

    #[test]
    fn payload_serializes_type_field() {
        let payload = TransactionPayload {
            name: None,
            kind: TransactionType::Expense,
            amount: "12.50".into(),
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2026-03-04");
        assert!(json.get("name").is_none());
    }
}
