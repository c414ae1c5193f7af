//! Series construction for the three projection granularities
//!
//! The backend sends accumulated expense per day (week and month views) or
//! per month (year view), covering both recorded and model-extrapolated
//! periods. Construction places each record into a fixed-size slot array for
//! the granularity and marks how many slots have elapsed as of "today".

use chrono::{Datelike, NaiveDate};

use crate::format::MONTH_ABBREVS;
use crate::models::{DailyExpensePoint, ExpensePredictions, MonthlyExpensePoint};

use super::Period;

/// Weekday labels, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Labeled accumulated-expense series split into actual and projected segments
///
/// Invariants: `labels.len() == data.len()` and
/// `actual_data_count <= labels.len()`. An empty backend series never reaches
/// this type; builders return `None` instead of a zero-filled series.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    /// Index boundary between historical and projected entries
    pub actual_data_count: usize,
    /// Accumulated value at the final period of the granularity
    pub projected_total: f64,
    /// Accumulated value at the current period
    pub historical_total: f64,
    /// projected_total - historical_total
    pub additional_spending: f64,
}

/// Number of days in the calendar month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

fn finish(labels: Vec<String>, data: Vec<f64>, actual_data_count: usize) -> ExpenseSeries {
    let historical_total = actual_data_count
        .checked_sub(1)
        .and_then(|i| data.get(i))
        .copied()
        .unwrap_or(0.0);
    let projected_total = data.last().copied().unwrap_or(0.0);

    ExpenseSeries {
        labels,
        data,
        actual_data_count,
        projected_total,
        historical_total,
        additional_spending: projected_total - historical_total,
    }
}

/// Weekly series: seven weekday slots, Monday first
///
/// Duplicate slots take the last record; values are cumulative totals, so
/// summing would double-count.
fn build_week_series(points: &[DailyExpensePoint], today: NaiveDate) -> Option<ExpenseSeries> {
    if points.is_empty() {
        return None;
    }

    let mut data = vec![0.0; 7];
    for point in points {
        let slot = point.date.weekday().num_days_from_monday() as usize;
        data[slot] = point.accumulated_expense;
    }

    let labels = WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect();
    let elapsed = today.weekday().num_days_from_monday() as usize + 1;
    Some(finish(labels, data, elapsed))
}

/// Monthly series: one slot per day of the current calendar month
fn build_month_series(points: &[DailyExpensePoint], today: NaiveDate) -> Option<ExpenseSeries> {
    if points.is_empty() {
        return None;
    }

    let day_count = days_in_month(today) as usize;
    let mut data = vec![0.0; day_count];
    for point in points {
        let day = point.date.day() as usize;
        if (1..=day_count).contains(&day) {
            data[day - 1] = point.accumulated_expense;
        }
    }

    let labels = (1..=day_count).map(|d| d.to_string()).collect();
    Some(finish(labels, data, today.day() as usize))
}

/// Yearly series: twelve month slots, abbreviated labels
fn build_year_series(points: &[MonthlyExpensePoint], today: NaiveDate) -> Option<ExpenseSeries> {
    if points.is_empty() {
        return None;
    }

    let mut data = vec![0.0; 12];
    for point in points {
        let month = point.month as usize;
        if (1..=12).contains(&month) {
            data[month - 1] = point.accumulated_expense;
        }
    }

    let labels = MONTH_ABBREVS.iter().map(|l| l.to_string()).collect();
    Some(finish(labels, data, today.month() as usize))
}

/// Build the series for a granularity, or `None` when the backend sent no
/// data for it (distinct from an all-zero series)
pub fn build_series(
    predictions: &ExpensePredictions,
    period: Period,
    today: NaiveDate,
) -> Option<ExpenseSeries> {
    match period {
        Period::Week => build_week_series(&predictions.this_week_expense, today),
        Period::Month => build_month_series(&predictions.this_month_expense, today),
        Period::Year => build_year_series(&predictions.this_year_expense, today),
    }
}
