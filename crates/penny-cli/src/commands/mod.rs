//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Budget show/set
//! - `categories` - Category list/add
//! - `core` - Core commands (init, ask) and shared utilities (open_db)
//! - `receipts` - Receipt scanning
//! - `serve` - Web server command
//! - `status` - Database and OCR status
//! - `transactions` - Transaction commands (add, list, edit, delete)

pub mod budget;
pub mod categories;
pub mod core;
pub mod receipts;
pub mod serve;
pub mod status;
pub mod transactions;

// Re-export command functions for main.rs
pub use budget::*;
pub use categories::*;
pub use core::*;
pub use receipts::*;
pub use serve::*;
pub use status::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
