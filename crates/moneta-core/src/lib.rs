//! Moneta Core Library
//!
//! Shared functionality for the Moneta personal finance client:
//! - Domain models for transactions, savings goals, and summaries
//! - Aggregation engine (type/month filters, sorting, category slices)
//! - Projection engine (actual/projected series, insight text, chart geometry)
//! - Typed REST client for the backend API
//! - Per-resource stores with request sequencing and recoverable errors
//! - Session persistence and client configuration
//! - Form validation and CSV export

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
pub mod projection;
pub mod session;
pub mod store;
pub mod validate;

/// Test utilities including the mock backend API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{
    category_slices, filter_by_type, filter_current_month, monthly_summary, sort_by_raw_key,
    sort_goals, sort_transactions, sum_amounts, CategorySlice, SortKey, CHART_PALETTE,
};
pub use api::{ApiClient, Fetched, SavingsGoalPayload, TransactionPayload};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use format::{format_currency, format_currency_opt};
pub use models::{
    ExpensePredictions, MonthlySummary, SavingsGoal, Suggestions, Transaction, TransactionType,
    User,
};
pub use projection::{
    build_series, spending_insight, ChartLayout, ExpenseSeries, Insets, Period,
};
pub use session::{AuthSession, SessionStore};
pub use store::{AnalyticsStore, GoalStore, TransactionStore};
pub use validate::{GoalDraft, TransactionDraft};
