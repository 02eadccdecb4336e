//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_ask` - Answer a spending question

use std::path::Path;

use anyhow::{Context, Result};
use penny_core::{db::Database, QueryEngine};

/// Open (creating if needed) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    let seeded = db
        .seed_default_categories()
        .context("Failed to seed default categories")?;
    if seeded > 0 {
        println!("   Seeded {} default categories", seeded);
    } else {
        println!("   Categories already present");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: penny add --amount 12.50 --category Food --store Cafe");
    println!("  2. Ask a question:    penny ask how much did I spend on food");

    Ok(())
}

pub fn cmd_ask(db: &Database, question: &str) -> Result<()> {
    let answer = QueryEngine::new(db).resolve(question);
    println!("{}", answer);
    Ok(())
}
