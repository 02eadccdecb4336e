//! Budget command implementations

use anyhow::{Context, Result};
use penny_core::db::Database;
use penny_core::models::BudgetPeriod;
use penny_core::SpendingStore;

pub fn cmd_budget_show(db: &Database) -> Result<()> {
    let Some(budget) = db.get_budget()? else {
        println!("No budget set. Set one with:");
        println!("  penny budget set 500 --period monthly");
        return Ok(());
    };

    let spent = db.total_spent()?;
    let remaining = budget.limit_amount - spent;

    println!();
    println!("💰 Budget");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Limit:     ${:.2} ({})", budget.limit_amount, budget.period);
    println!("   Spent:     ${:.2} (all time)", spent);
    if remaining >= 0.0 {
        println!("   Remaining: ${:.2}", remaining);
    } else {
        println!("   Over by:   \x1b[31m${:.2}\x1b[0m", remaining.abs());
    }

    Ok(())
}

pub fn cmd_budget_set(db: &Database, amount: f64, period: BudgetPeriod) -> Result<()> {
    let budget = db
        .set_budget(amount, period)
        .context("Failed to set budget")?;
    println!(
        "✅ Budget set to ${:.2} ({})",
        budget.limit_amount, budget.period
    );
    Ok(())
}
