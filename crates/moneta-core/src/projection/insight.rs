//! Natural-language insight derived from a projection series

use chrono::{Datelike, NaiveDate};

use crate::format::format_currency;

use super::series::{days_in_month, ExpenseSeries};
use super::Period;

/// One-sentence spending insight for the analytics screen
///
/// Produces the completed-period statement once the period has fully elapsed
/// (Sunday, last day of month, December), otherwise the projected statement
/// with both the additional and total amounts.
pub fn spending_insight(series: Option<&ExpenseSeries>, period: Period, today: NaiveDate) -> String {
    let series = match series {
        Some(s) if !s.data.is_empty() => s,
        _ => return "No expense data available.".to_string(),
    };

    let predicted_total = format_currency(series.projected_total);
    let additional = format_currency(series.additional_spending);

    match period {
        Period::Week => {
            let is_end_of_week = today.weekday().num_days_from_monday() == 6;
            if is_end_of_week {
                format!("Your total spending for this week is {}.", predicted_total)
            } else {
                format!(
                    "Based on your spending history, you are predicted to spend an additional {} by the end of the week ({} total).",
                    additional, predicted_total
                )
            }
        }
        Period::Year => {
            let is_end_of_year = today.month() == 12;
            if is_end_of_year {
                format!("Your total spending for this year is {}.", predicted_total)
            } else {
                format!(
                    "Based on your spending pattern, you are predicted to spend an additional {} by the end of the year ({} total).",
                    additional, predicted_total
                )
            }
        }
        Period::Month => {
            let is_last_day = today.day() == days_in_month(today);
            if is_last_day {
                format!("Your total spending for this month is {}.", predicted_total)
            } else {
                format!(
                    "Based on your spending pattern, we predict that you'll spend an additional {} by the end of the month ({} total).",
                    additional, predicted_total
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(historical: f64, projected: f64, len: usize) -> ExpenseSeries {
        ExpenseSeries {
            labels: (0..len).map(|i| i.to_string()).collect(),
            data: vec![0.0; len],
            actual_data_count: len / 2,
            projected_total: projected,
            historical_total: historical,
            additional_spending: projected - historical,
        }
    }

    #[test]
    fn no_data_sentence() {
        let today = "2026-03-15".parse().unwrap();
        assert_eq!(
            spending_insight(None, Period::Month, today),
            "No expense data available."
        );
    }

    #[test]
    fn completed_month_uses_total_template() {
        // 2026-03-31 is the last day of March
        let today = "2026-03-31".parse().unwrap();
        let s = series(120.0, 120.0, 31);
        let text = spending_insight(Some(&s), Period::Month, today);
        assert_eq!(text, "Your total spending for this month is $120.00.");
    }

    #[test]
    fn mid_month_uses_projected_template() {
        let today = "2026-03-15".parse().unwrap();
        let s = series(74.5, 120.0, 31);
        let text = spending_insight(Some(&s), Period::Month, today);
        assert!(text.contains("$45.50"));
        assert!(text.contains("$120.00 total"));
        assert!(text.starts_with("Based on your spending pattern, we predict"));
    }

    #[test]
    fn sunday_completes_the_week() {
        // 2026-01-11 is a Sunday
        let today = "2026-01-11".parse().unwrap();
        let s = series(80.0, 80.0, 7);
        assert_eq!(
            spending_insight(Some(&s), Period::Week, today),
            "Your total spending for this week is $80.00."
        );

        // Saturday still projects
        let saturday = "2026-01-10".parse().unwrap();
        let text = spending_insight(Some(&s), Period::Week, saturday);
        assert!(text.contains("by the end of the week"));
    }

    #[test]
    fn december_completes_the_year() {
        let today = "2026-12-05".parse().unwrap();
        let s = series(900.0, 1100.0, 12);
        assert_eq!(
            spending_insight(Some(&s), Period::Year, today),
            "Your total spending for this year is $1,100.00."
        );

        let november = "2026-11-05".parse().unwrap();
        let text = spending_insight(Some(&s), Period::Year, november);
        assert!(text.contains("additional $200.00 by the end of the year"));
    }
}
