//! Receipt command implementation

use std::path::Path;

use anyhow::{Context, Result};
use penny_core::{db::Database, ReceiptExtractor};
use tracing::info;

use super::truncate;

pub fn cmd_receipt(
    db: &Database,
    extractor: &ReceiptExtractor,
    file: &Path,
    save: bool,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read receipt {}", file.display()))?;

    if !extractor.ocr_available() {
        println!(
            "⚠️  OCR engine '{}' not found; results will be empty",
            extractor.ocr_name()
        );
    }

    let extraction = extractor.extract(&bytes);

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        println!();
        println!("🧾 Receipt: {}", file.display());
        println!("   ─────────────────────────────────────────────────────────────");
        println!("   Store:    {}", extraction.store_name);
        println!("   Amount:   ${:.2}", extraction.amount);
        println!("   Category: {}", category.unwrap_or(&extraction.category));
        let lines = extraction.text.lines().filter(|l| !l.trim().is_empty()).count();
        println!("   Text:     {} line(s) recognized", lines);
        if let Some(first) = extraction.text.lines().find(|l| !l.trim().is_empty()) {
            println!("             {}", truncate(first.trim(), 50));
        }
    }

    if save {
        if extraction.amount > 0.0 {
            let id = db
                .insert_transaction(&extraction.to_new_transaction(category))
                .context("Failed to save receipt transaction")?;
            info!(id, amount = extraction.amount, "Saved receipt");
            println!("✅ Saved as transaction #{}", id);
        } else {
            println!("⚠️  No total found, nothing saved");
        }
    }

    Ok(())
}
