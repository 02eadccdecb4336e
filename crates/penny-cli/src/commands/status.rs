//! Status command implementation

use std::fs;

use anyhow::Result;
use penny_core::{Config, OcrEngine, TesseractEngine};

use super::open_db;

pub fn cmd_status(config: &Config) -> Result<()> {
    let db_path = &config.db_path;

    println!();
    println!("📊 Penny Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        match open_db(db_path) {
            Ok(db) => {
                if let Ok(count) = db.count_transactions() {
                    println!("   Transactions: {}", count);
                }
                match db.get_budget() {
                    Ok(Some(budget)) => println!(
                        "   Budget: ${:.2} ({})",
                        budget.limit_amount, budget.period
                    ),
                    Ok(None) => println!("   Budget: (not set)"),
                    Err(e) => println!("   Budget: ❌ {}", e),
                }
            }
            Err(e) => {
                println!("   ❌ Error opening database: {}", e);
            }
        }
    } else {
        println!("   Size: (database not initialized, run 'penny init')");
    }

    // OCR
    let ocr = TesseractEngine::from_config(&config.ocr);
    println!();
    if ocr.is_available() {
        println!("   ✅ OCR: {} found", ocr.command());
    } else {
        println!("   ❌ OCR: {} not found on PATH", ocr.command());
        println!("      Install tesseract or set PENNY_TESSERACT_CMD");
    }
    if let Some(lang) = &config.ocr.language {
        println!("      Language: {}", lang);
    }

    Ok(())
}
