//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Penny - Ask questions about your spending
#[derive(Parser)]
#[command(name = "penny")]
#[command(about = "Expense tracker that answers questions and reads receipts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides the config file and PENNY_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.config/penny/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and default categories
    Init,

    /// Ask a question about your spending
    Ask {
        /// The question, e.g. "how much did I spend on food?"
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Read the total and store from a receipt image
    Receipt {
        /// Receipt image (PNG, JPEG, WebP, BMP, TIFF)
        file: PathBuf,

        /// Record the receipt as a transaction
        #[arg(long)]
        save: bool,

        /// Category for the saved transaction
        #[arg(short, long)]
        category: Option<String>,

        /// Print the extraction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a transaction
    Add {
        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Category (e.g. Food)
        #[arg(short, long)]
        category: String,

        /// Store name
        #[arg(short, long)]
        store: Option<String>,

        /// Free-form note
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List recent transactions
    List {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only transactions on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Only transactions on or before this date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
    },

    /// Edit a recorded transaction
    Edit {
        /// Transaction ID (see `penny list`)
        id: i64,

        /// New amount
        #[arg(short, long)]
        amount: Option<f64>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New store name (empty string clears it)
        #[arg(short, long)]
        store: Option<String>,

        /// New note (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a recorded transaction
    Delete {
        /// Transaction ID (see `penny list`)
        id: i64,
    },

    /// Show or set the budget
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// List or add categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origins (comma-separated)
        #[arg(long, value_delimiter = ',')]
        allow_origin: Vec<String>,
    },

    /// Show database and OCR status
    Status,
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set (or replace) the budget
    Set {
        /// Spending limit
        amount: f64,

        /// Budget period: monthly, weekly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Display color
        #[arg(short, long)]
        color: Option<String>,
    },
}
