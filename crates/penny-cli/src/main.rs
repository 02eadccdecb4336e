//! Penny CLI - Expense tracker with a question-answering assistant
//!
//! Usage:
//!   penny init                          Initialize database
//!   penny add --amount 12.50 -c Food    Record an expense
//!   penny ask how much on food          Ask a question
//!   penny receipt scan.jpg --save       Read a receipt
//!   penny edit 3 --category Food        Fix a recorded expense
//!   penny serve --port 8000             Start web server

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use penny_core::models::BudgetPeriod;
use penny_core::{Config, ReceiptExtractor};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }

    match cli.command {
        Commands::Init => commands::cmd_init(&config.db_path),
        Commands::Ask { question } => {
            let db = commands::open_db(&config.db_path)?;
            commands::cmd_ask(&db, &question.join(" "))
        }
        Commands::Receipt {
            file,
            save,
            category,
            json,
        } => {
            let db = commands::open_db(&config.db_path)?;
            let extractor = ReceiptExtractor::from_config(&config.ocr);
            commands::cmd_receipt(&db, &extractor, &file, save, category.as_deref(), json)
        }
        Commands::Add {
            amount,
            category,
            store,
            description,
        } => {
            let db = commands::open_db(&config.db_path)?;
            commands::cmd_add(
                &db,
                amount,
                &category,
                store.as_deref(),
                description.as_deref(),
            )
        }
        Commands::List {
            limit,
            since,
            until,
        } => {
            let db = commands::open_db(&config.db_path)?;
            commands::cmd_list(&db, limit, since.as_deref(), until.as_deref())
        }
        Commands::Edit {
            id,
            amount,
            category,
            store,
            description,
        } => {
            let db = commands::open_db(&config.db_path)?;
            commands::cmd_edit(
                &db,
                id,
                amount,
                category.as_deref(),
                store.as_deref(),
                description.as_deref(),
            )
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&config.db_path)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&config.db_path)?;
            match action {
                None => commands::cmd_budget_show(&db),
                Some(BudgetAction::Set { amount, period }) => {
                    let period: BudgetPeriod = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;
                    commands::cmd_budget_set(&db, amount, period)
                }
            }
        }
        Commands::Categories { action } => {
            let db = commands::open_db(&config.db_path)?;
            match action {
                None => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Add { name, color }) => {
                    commands::cmd_categories_add(&db, &name, color.as_deref())
                }
            }
        }
        Commands::Serve {
            port,
            host,
            allow_origin,
        } => commands::cmd_serve(&config, &host, port, allow_origin).await,
        Commands::Status => commands::cmd_status(&config),
    }
}
