//! Remote data access for the backend REST API

mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{Fetched, SavingsGoalPayload, TransactionPayload};
