//! HTTP client for the Moneta backend REST API
//!
//! Thin typed wrapper over the consumed endpoints. Every authorized request
//! carries the session token; non-2xx responses map to typed errors so the
//! stores can distinguish recoverable read failures from auth problems.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{ExpensePredictions, SavingsGoal, Suggestions, Transaction, User};

use super::types::{
    Fetched, LoginRequest, LoginResponse, RawSavingsGoal, RawTransaction, RegisterRequest,
    RegisterResponse, SavingsGoalPayload, TransactionPayload, validate_records,
};

/// Typed client for the backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL with the default timeout
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http_client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a session token for authorized requests
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Add the token auth header, or fail before the request goes out
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        match &self.token {
            Some(token) => Ok(builder.header("Authorization", format!("Token {}", token))),
            None => Err(Error::Unauthorized),
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound("resource".to_string()));
        }

        let message = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// `POST login/` — returns the session token and user profile
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User)> {
        let response = self
            .http_client
            .post(self.url("login/"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: LoginResponse = response.json().await?;
        debug!(username = %body.username, "Logged in");
        Ok(body.into_parts())
    }

    /// `POST register/` — creates an account, returns token and profile
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(String, User)> {
        let response = self
            .http_client
            .post(self.url("register/"))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: RegisterResponse = response.json().await?;
        debug!(username = %body.user.username, "Registered");
        Ok((body.token, body.user))
    }

    /// `GET transactions/` — full collection, malformed records excluded
    pub async fn list_transactions(&self) -> Result<Fetched<Transaction>> {
        let request = self.authorized(self.http_client.get(self.url("transactions/")))?;
        let response = Self::check(request.send().await?).await?;

        let raw: Vec<RawTransaction> = response.json().await?;
        Ok(validate_records(raw, "transactions"))
    }

    /// `POST transactions/`
    pub async fn create_transaction(&self, payload: &TransactionPayload) -> Result<Transaction> {
        let request = self.authorized(self.http_client.post(self.url("transactions/")))?;
        let response = Self::check(request.json(payload).send().await?).await?;

        let raw: RawTransaction = response.json().await?;
        raw.try_into()
    }

    /// `PUT transactions/{id}/`
    pub async fn update_transaction(
        &self,
        id: i64,
        payload: &TransactionPayload,
    ) -> Result<Transaction> {
        let request = self.authorized(
            self.http_client
                .put(self.url(&format!("transactions/{}/", id))),
        )?;
        let response = Self::check(request.json(payload).send().await?).await?;

        let raw: RawTransaction = response.json().await?;
        raw.try_into()
    }

    /// `DELETE transactions/{id}/`
    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        let request = self.authorized(
            self.http_client
                .delete(self.url(&format!("transactions/{}/", id))),
        )?;
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// `GET savings-goals/` — full collection, malformed records excluded
    pub async fn list_savings_goals(&self) -> Result<Fetched<SavingsGoal>> {
        let request = self.authorized(self.http_client.get(self.url("savings-goals/")))?;
        let response = Self::check(request.send().await?).await?;

        let raw: Vec<RawSavingsGoal> = response.json().await?;
        Ok(validate_records(raw, "savings-goals"))
    }

    /// `POST savings-goals/`
    pub async fn create_savings_goal(&self, payload: &SavingsGoalPayload) -> Result<SavingsGoal> {
        let request = self.authorized(self.http_client.post(self.url("savings-goals/")))?;
        let response = Self::check(request.json(payload).send().await?).await?;

        let raw: RawSavingsGoal = response.json().await?;
        raw.try_into()
    }

    /// `PUT savings-goals/{id}/`
    pub async fn update_savings_goal(
        &self,
        id: i64,
        payload: &SavingsGoalPayload,
    ) -> Result<SavingsGoal> {
        let request = self.authorized(
            self.http_client
                .put(self.url(&format!("savings-goals/{}/", id))),
        )?;
        let response = Self::check(request.json(payload).send().await?).await?;

        let raw: RawSavingsGoal = response.json().await?;
        raw.try_into()
    }

    /// `DELETE savings-goals/{id}/`
    pub async fn delete_savings_goal(&self, id: i64) -> Result<()> {
        let request = self.authorized(
            self.http_client
                .delete(self.url(&format!("savings-goals/{}/", id))),
        )?;
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// `GET expense-predictions/` — accumulated series for week/month/year
    pub async fn expense_predictions(&self) -> Result<ExpensePredictions> {
        let request = self.authorized(self.http_client.get(self.url("expense-predictions/")))?;
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// `GET ai-suggestions/`
    pub async fn ai_suggestions(&self) -> Result<Suggestions> {
        let request = self.authorized(self.http_client.get(self.url("ai-suggestions/")))?;
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockApiServer;

    #[tokio::test]
    async fn login_returns_token_and_profile() {
        let server = MockApiServer::start().await;
        let client = ApiClient::new(&server.url());

        let (token, user) = client.login("demo", "hunter2").await.unwrap();
        assert_eq!(token, "test-token");
        assert_eq!(user.username, "demo");
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let server = MockApiServer::start().await;
        let client = ApiClient::new(&server.url());

        let err = client.login("demo", "wrong").await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }

    #[tokio::test]
    async fn list_transactions_excludes_malformed_records() {
        let server = MockApiServer::start().await;
        let client = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let fetched = client.list_transactions().await.unwrap();
        // The mock serves one record with a broken date and one with a
        // string amount; only the broken date is dropped
        assert_eq!(fetched.dropped, 1);
        assert!(fetched.records.iter().any(|t| t.amount == 1200.5));
    }

    #[tokio::test]
    async fn requests_without_token_fail_before_sending() {
        let server = MockApiServer::start().await;
        let client = ApiClient::new(&server.url());

        let err = client.list_transactions().await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }

    #[tokio::test]
    async fn crud_round_trip_against_mock() {
        let server = MockApiServer::start().await;
        let client = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let payload = TransactionPayload {
            name: Some("Lunch".into()),
            kind: crate::models::TransactionType::Expense,
            amount: "12.50".into(),
            category: "Food".into(),
            date: "2026-03-04".parse().unwrap(),
        };
        let created = client.create_transaction(&payload).await.unwrap();
        assert_eq!(created.amount, 12.5);
        assert_eq!(created.category, "Food");

        client.delete_transaction(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn predictions_and_suggestions_deserialize() {
        let server = MockApiServer::start().await;
        let client = ApiClient::new(&server.url()).with_token(Some("test-token".into()));

        let predictions = client.expense_predictions().await.unwrap();
        assert_eq!(predictions.this_year_expense.len(), 12);
        assert!(!predictions.this_week_expense.is_empty());

        let suggestions = client.ai_suggestions().await.unwrap();
        assert!(!suggestions.suggestions.is_empty());
    }
}
