//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Moneta - Personal finance companion
#[derive(Parser)]
#[command(name = "moneta")]
#[command(about = "Track spending, savings goals, and projections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend API base URL (overrides config file and MONETA_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and persist the session
    Login {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Current-month summary, category breakdown, goals, recent activity
    Dashboard,

    /// Transaction history and entry
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Savings goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Spend projection and insight for a time period
    Analytics {
        /// Time period: week, month, or year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Write the projection chart to an SVG file
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Use dark-theme chart colors in the SVG
        #[arg(long)]
        dark: bool,
    },

    /// AI financial suggestions
    Suggest,
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions of one kind
    List {
        /// Transaction kind: expense or income
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Sort key: date, amount, or category_<Name>
        #[arg(short, long, default_value = "date")]
        sort: String,
    },

    /// Record a new transaction
    Add {
        /// Transaction kind: expense or income
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Amount, e.g. 12.50
        #[arg(short, long)]
        amount: String,

        /// Category label
        #[arg(short, long)]
        category: String,

        /// Optional description
        #[arg(short, long)]
        name: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Update an existing transaction
    Update {
        /// Transaction id
        id: i64,

        /// Transaction kind: expense or income
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Amount, e.g. 12.50
        #[arg(short, long)]
        amount: String,

        /// Category label
        #[arg(short, long)]
        category: String,

        /// Optional description
        #[arg(short, long)]
        name: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction id
        id: i64,
    },

    /// Export all transactions as CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List savings goals
    List,

    /// Create a savings goal
    Add {
        /// Goal name
        #[arg(short, long)]
        name: String,

        /// Target amount, e.g. 1000
        #[arg(short, long)]
        target: String,

        /// Amount already saved (defaults to 0)
        #[arg(short, long, default_value = "")]
        current: String,

        /// Target date (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        date: NaiveDate,
    },

    /// Update a savings goal
    Update {
        /// Goal id
        id: i64,

        /// Goal name
        #[arg(short, long)]
        name: String,

        /// Target amount
        #[arg(short, long)]
        target: String,

        /// Amount already saved
        #[arg(short, long, default_value = "")]
        current: String,

        /// Target date (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        date: NaiveDate,
    },

    /// Delete a savings goal
    Delete {
        /// Goal id
        id: i64,
    },
}
