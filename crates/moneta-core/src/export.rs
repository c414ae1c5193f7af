//! CSV export of fetched transaction lists

use std::io;

use crate::error::Result;
use crate::models::Transaction;

/// Write transactions as CSV with a header row
///
/// Columns: `id,date,type,category,name,amount`. Amounts are written with
/// two decimals; a missing name is an empty field.
pub fn write_transactions_csv<W: io::Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["id", "date", "type", "category", "name", "amount"])?;

    for tx in transactions {
        csv_writer.write_record([
            tx.id.to_string(),
            tx.date.format("%Y-%m-%d").to_string(),
            tx.kind.to_string(),
            tx.category.clone(),
            tx.name.clone().unwrap_or_default(),
            format!("{:.2}", tx.amount),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    #[test]
    fn export_writes_header_and_rows() {
        let transactions = vec![
            Transaction {
                id: 1,
                name: Some("Lunch".into()),
                kind: TransactionType::Expense,
                amount: 12.5,
                category: "Food".into(),
                date: "2026-03-04".parse().unwrap(),
            },
            Transaction {
                id: 2,
                name: None,
                kind: TransactionType::Income,
                amount: 3000.0,
                category: "Salary".into(),
                date: "2026-03-01".parse().unwrap(),
            },
        ];

        let mut out = Vec::new();
        write_transactions_csv(&mut out, &transactions).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "id,date,type,category,name,amount");
        assert_eq!(lines.next().unwrap(), "1,2026-03-04,expense,Food,Lunch,12.50");
        assert_eq!(lines.next().unwrap(), "2,2026-03-01,income,Salary,,3000.00");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_list_is_just_the_header() {
        let mut out = Vec::new();
        write_transactions_csv(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
