//! Transaction command implementations

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use penny_core::db::Database;
use penny_core::models::NewTransaction;

use super::truncate;

pub fn cmd_add(
    db: &Database,
    amount: f64,
    category: &str,
    store: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let mut tx = NewTransaction::new(amount, category);
    if let Some(store) = store {
        tx = tx.with_store(store);
    }
    if let Some(description) = description {
        tx = tx.with_description(description);
    }

    let id = db
        .insert_transaction(&tx)
        .context("Failed to record transaction")?;
    println!("✅ Recorded ${:.2} in {} (#{})", amount, tx.category, id);

    Ok(())
}

/// Parse an optional YYYY-MM-DD flag value
fn parse_date_flag(flag: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid --{} date '{}'. Use YYYY-MM-DD", flag, s))
        })
        .transpose()
}

pub fn cmd_list(
    db: &Database,
    limit: i64,
    since: Option<&str>,
    until: Option<&str>,
) -> Result<()> {
    let since = parse_date_flag("since", since)?;
    let until = parse_date_flag("until", until)?;
    let transactions = db.list_transactions_between(since, until, limit, 0)?;

    if transactions.is_empty() && (since.is_some() || until.is_some()) {
        println!("No transactions in that date range.");
        return Ok(());
    }

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  penny add --amount 12.50 --category Food");
        return Ok(());
    }

    let total = db.count_transactions()?;

    println!();
    println!("📝 Recent Transactions ({} total)", total);
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   [{}] {} │ {:>10} │ {:<14} │ {}",
            tx.id,
            tx.created_at.format("%Y-%m-%d"),
            format!("${:.2}", tx.amount),
            truncate(&tx.category, 14),
            truncate(tx.store_display(), 30)
        );
    }

    Ok(())
}

pub fn cmd_edit(
    db: &Database,
    id: i64,
    amount: Option<f64>,
    category: Option<&str>,
    store: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    if amount.is_none() && category.is_none() && store.is_none() && description.is_none() {
        bail!("Nothing to change. Pass --amount, --category, --store or --description");
    }

    let current = db
        .get_transaction(id)?
        .with_context(|| format!("Transaction #{} not found", id))?;

    let mut tx = NewTransaction::new(
        amount.unwrap_or(current.amount),
        category.unwrap_or(&current.category),
    );
    tx.store_name = store.map(str::to_string).or(current.store_name);
    tx.description = match description {
        Some("") => None,
        Some(d) => Some(d.to_string()),
        None => current.description,
    };

    let updated = db
        .update_transaction(id, &tx)
        .with_context(|| format!("Failed to update transaction #{}", id))?;
    println!(
        "✅ Updated #{}: ${:.2} in {} at {}",
        updated.id,
        updated.amount,
        updated.category,
        updated.store_display()
    );

    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_transaction(id)
        .with_context(|| format!("Failed to delete transaction #{}", id))?;
    println!("🗑️  Deleted transaction #{}", id);
    Ok(())
}
