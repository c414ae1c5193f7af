//! CLI command implementations
//!
//! Commands are organized by screen:
//! - `auth` - Login, register, logout
//! - `dashboard` - Monthly summary, category breakdown, recent activity
//! - `transactions` - Transaction list/entry/export commands
//! - `goals` - Savings goal commands
//! - `analytics` - Projection chart, insight, and suggestions

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod goals;
pub mod transactions;

// Re-export command functions for main.rs
pub use analytics::*;
pub use auth::*;
pub use dashboard::*;
pub use goals::*;
pub use transactions::*;

use anyhow::{bail, Result};
use tracing::warn;

use moneta_core::{ApiClient, AuthSession, ClientConfig, SessionStore};

/// Everything a command needs: the API client, the loaded session (if any),
/// and the store to update it through
pub struct Context {
    pub api: ApiClient,
    pub session: Option<AuthSession>,
    pub sessions: SessionStore,
}

/// Load config and session, wiring the token into the client
pub fn build_context(api_url: Option<String>) -> Result<Context> {
    let mut config = ClientConfig::load()?;
    if let Some(url) = api_url {
        config.api_url = url;
    }

    let sessions = SessionStore::open_default()?;
    let session = match sessions.load() {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Could not read stored session; treating as signed out");
            None
        }
    };

    let api = ApiClient::from_config(&config)?
        .with_token(session.as_ref().map(|s| s.token.clone()));
    Ok(Context {
        api,
        session,
        sessions,
    })
}

impl Context {
    /// The API client, or a sign-in hint when no session is stored
    pub fn require_auth(&self) -> Result<&ApiClient> {
        if self.session.is_none() {
            bail!("Not signed in. Run 'moneta login' first.");
        }
        Ok(&self.api)
    }
}

/// Truncate a label for table display
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Red for expenses, green with a plus for income
pub fn colored_amount(amount: f64, is_expense: bool) -> String {
    if is_expense {
        format!("\x1b[31m${:.2}\x1b[0m", amount)
    } else {
        format!("\x1b[32m+${:.2}\x1b[0m", amount)
    }
}
