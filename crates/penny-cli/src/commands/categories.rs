//! Category command implementations

use anyhow::{Context, Result};
use penny_core::db::Database;

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;

    if categories.is_empty() {
        println!("No categories yet. Run 'penny init' to add the defaults.");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────────────────────");
    for category in categories {
        println!("   {:<20} {}", category.name, category.color);
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, name: &str, color: Option<&str>) -> Result<()> {
    let id = db
        .create_category(name, color)
        .with_context(|| format!("Failed to add category '{}'", name))?;
    println!("✅ Added category {} (#{})", name.trim(), id);
    Ok(())
}
