//! Per-resource fetch state
//!
//! Each screen owns a store for the collections it renders: the fetched
//! data, a loading flag, and a recoverable error. Refreshes are sequenced
//! with a monotonic request ticket so that when triggers overlap, only the
//! response matching the latest issued request is applied — a stale response
//! can neither overwrite newer data nor clear the newer request's loading
//! flag. Read failures keep previously loaded data; write failures leave
//! local state untouched, and confirmed writes apply the server's response.

use tracing::warn;

use crate::api::{ApiClient, SavingsGoalPayload, TransactionPayload};
use crate::error::{Error, Result};
use crate::models::{ExpensePredictions, SavingsGoal, Suggestions, Transaction};

/// Ticket identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Generic fetch state with latest-request-wins sequencing
#[derive(Debug, Default)]
pub struct ResourceStore<T> {
    data: T,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl<T> ResourceStore<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Issue a request ticket: raises the loading flag and clears the error
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        RequestTicket(self.issued)
    }

    /// Settle a request. Applies only when `ticket` is the latest issued
    /// one; stale settlements are dropped entirely. Returns whether the
    /// result was applied.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<T>) -> bool {
        if ticket.0 != self.issued {
            warn!(
                stale = ticket.0,
                latest = self.issued,
                "Dropping stale response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => self.data = data,
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }
}

/// Store behind the transaction screens (expenses, income, dashboard)
#[derive(Debug, Default)]
pub struct TransactionStore {
    state: ResourceStore<Vec<Transaction>>,
    dropped: usize,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Malformed records excluded from the last successful fetch
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Re-fetch the full collection. A failure records the error and keeps
    /// the previously loaded list.
    pub async fn refresh(&mut self, api: &ApiClient) {
        let ticket = self.state.begin();
        match api.list_transactions().await {
            Ok(fetched) => {
                if self.state.settle(ticket, Ok(fetched.records)) {
                    self.dropped = fetched.dropped;
                }
            }
            Err(e) => {
                self.state.settle(ticket, Err(e));
            }
        }
    }

    /// Create on the server, then append the confirmed record
    pub async fn add(&mut self, api: &ApiClient, payload: &TransactionPayload) -> Result<Transaction> {
        let created = api.create_transaction(payload).await?;
        self.state.data_mut().push(created.clone());
        Ok(created)
    }

    /// Update on the server, then replace the confirmed record in place
    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: i64,
        payload: &TransactionPayload,
    ) -> Result<Transaction> {
        if !self.state.data().iter().any(|t| t.id == id) {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }

        let updated = api.update_transaction(id, payload).await?;
        if let Some(slot) = self.state.data_mut().iter_mut().find(|t| t.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete on the server, then drop the record locally
    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<()> {
        if !self.state.data().iter().any(|t| t.id == id) {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }

        api.delete_transaction(id).await?;
        self.state.data_mut().retain(|t| t.id != id);
        Ok(())
    }
}

/// Store behind the savings-goal screens
#[derive(Debug, Default)]
pub struct GoalStore {
    state: ResourceStore<Vec<SavingsGoal>>,
    dropped: usize,
}

impl GoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        let ticket = self.state.begin();
        match api.list_savings_goals().await {
            Ok(fetched) => {
                if self.state.settle(ticket, Ok(fetched.records)) {
                    self.dropped = fetched.dropped;
                }
            }
            Err(e) => {
                self.state.settle(ticket, Err(e));
            }
        }
    }

    pub async fn add(&mut self, api: &ApiClient, payload: &SavingsGoalPayload) -> Result<SavingsGoal> {
        let created = api.create_savings_goal(payload).await?;
        self.state.data_mut().push(created.clone());
        Ok(created)
    }

    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: i64,
        payload: &SavingsGoalPayload,
    ) -> Result<SavingsGoal> {
        if !self.state.data().iter().any(|g| g.id == id) {
            return Err(Error::NotFound(format!("savings goal {}", id)));
        }

        let updated = api.update_savings_goal(id, payload).await?;
        if let Some(slot) = self.state.data_mut().iter_mut().find(|g| g.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<()> {
        if !self.state.data().iter().any(|g| g.id == id) {
            return Err(Error::NotFound(format!("savings goal {}", id)));
        }

        api.delete_savings_goal(id).await?;
        self.state.data_mut().retain(|g| g.id != id);
        Ok(())
    }
}

/// Lead-in shown above fetched suggestions
pub const SUGGESTIONS_MESSAGE: &str =
    "Based on your financial data, here are some suggestions to help manage your finance.";

/// Lead-in shown above the offline fallback tips
pub const FALLBACK_MESSAGE: &str =
    "We couldn't analyze your financial data at this time, but here are some general tips:";

/// General tips served when the suggestions fetch fails
pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Creating a budget helps track expenses and avoid overspending.",
    "Try to save at least 10-15% of your income for long-term goals.",
    "Review your spending regularly to identify areas where you can cut back.",
];

/// Store behind the analytics screen: predictions plus AI suggestions
#[derive(Debug, Default)]
pub struct AnalyticsStore {
    predictions: ResourceStore<Option<ExpensePredictions>>,
    message: String,
    suggestions: Vec<String>,
}

impl AnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predictions(&self) -> Option<&ExpensePredictions> {
        self.predictions.data().as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.predictions.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.predictions.error()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Fetch predictions and suggestions. A suggestions failure falls back
    /// to canned tips; a predictions failure records the error and keeps
    /// prior data.
    pub async fn refresh(&mut self, api: &ApiClient) {
        let ticket = self.predictions.begin();
        match api.expense_predictions().await {
            Ok(predictions) => {
                self.predictions.settle(ticket, Ok(Some(predictions)));
            }
            Err(e) => {
                self.predictions.settle(ticket, Err(e));
            }
        }

        match api.ai_suggestions().await {
            Ok(Suggestions { suggestions }) if !suggestions.is_empty() => {
                self.message = SUGGESTIONS_MESSAGE.to_string();
                self.suggestions = suggestions;
            }
            Ok(_) | Err(_) => {
                self.message = FALLBACK_MESSAGE.to_string();
                self.suggestions = FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::test_utils::MockApiServer;

    #[test]
    fn stale_responses_are_dropped() {
        let mut store: ResourceStore<Vec<i32>> = ResourceStore::default();

        let first = store.begin();
        let second = store.begin();
        assert!(store.is_loading());

        // The second (latest) request resolves first
        assert!(store.settle(second, Ok(vec![2])));
        assert!(!store.is_loading());
        assert_eq!(store.data(), &vec![2]);

        // The stale first response must not overwrite newer data
        assert!(!store.settle(first, Ok(vec![1])));
        assert_eq!(store.data(), &vec![2]);
    }

    #[test]
    fn stale_settle_does_not_clear_newer_loading_flag() {
        let mut store: ResourceStore<Vec<i32>> = ResourceStore::default();

        let first = store.begin();
        let _second = store.begin();

        assert!(!store.settle(first, Ok(vec![1])));
        // The second request is still in flight
        assert!(store.is_loading());
    }

    #[test]
    fn read_error_keeps_previous_data() {
        let mut store: ResourceStore<Vec<i32>> = ResourceStore::default();

        let ticket = store.begin();
        store.settle(ticket, Ok(vec![1, 2, 3]));

        let ticket = store.begin();
        store.settle(ticket, Err(Error::Validation("boom".into())));

        assert!(!store.is_loading());
        assert!(store.error().is_some());
        assert_eq!(store.data(), &vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn refresh_loads_transactions_and_counts_drops() {
        let server = MockApiServer::start().await;
        let api = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let mut store = TransactionStore::new();
        store.refresh(&api).await;

        assert!(store.error().is_none());
        assert!(!store.is_loading());
        assert!(!store.transactions().is_empty());
        assert_eq!(store.dropped(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_sets_error_and_keeps_data() {
        let server = MockApiServer::start().await;
        let api = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let mut store = TransactionStore::new();
        store.refresh(&api).await;
        let loaded = store.transactions().len();
        assert!(loaded > 0);

        // Unreachable port: connection errors are recoverable reads
        let dead = ApiClient::new("http://127.0.0.1:1").with_token(Some("test-token".into()));
        store.refresh(&dead).await;

        assert!(store.error().is_some());
        assert!(!store.is_loading());
        assert_eq!(store.transactions().len(), loaded);
    }

    #[tokio::test]
    async fn write_round_trip_applies_confirmed_records() {
        let server = MockApiServer::start().await;
        let api = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let mut store = TransactionStore::new();
        store.refresh(&api).await;
        let before = store.transactions().len();

        let payload = TransactionPayload {
            name: Some("Coffee".into()),
            kind: TransactionType::Expense,
            amount: "4.50".into(),
            category: "Food".into(),
            date: "2026-03-04".parse().unwrap(),
        };
        let created = store.add(&api, &payload).await.unwrap();
        assert_eq!(store.transactions().len(), before + 1);

        store.delete(&api, created.id).await.unwrap();
        assert_eq!(store.transactions().len(), before);
    }

    #[tokio::test]
    async fn updating_a_record_absent_locally_is_not_found() {
        let server = MockApiServer::start().await;
        let api = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let mut store = TransactionStore::new();
        let payload = TransactionPayload {
            name: None,
            kind: TransactionType::Expense,
            amount: "1.00".into(),
            category: "Food".into(),
            date: "2026-03-04".parse().unwrap(),
        };

        let err = store.update(&api, 424242, &payload).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = store.delete(&api, 424242).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn suggestions_fall_back_to_general_tips() {
        let dead = ApiClient::new("http://127.0.0.1:1").with_token(Some("test-token".into()));

        let mut store = AnalyticsStore::new();
        store.refresh(&dead).await;

        assert_eq!(store.message(), FALLBACK_MESSAGE);
        assert_eq!(store.suggestions().len(), 3);
        assert!(store.predictions().is_none());
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn analytics_refresh_loads_predictions_and_suggestions() {
        let server = MockApiServer::start().await;
        let api = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let mut store = AnalyticsStore::new();
        store.refresh(&api).await;

        assert!(store.predictions().is_some());
        assert_eq!(store.message(), SUGGESTIONS_MESSAGE);
        assert!(!store.suggestions().is_empty());
    }
}
