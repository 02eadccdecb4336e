//! Penny Core Library
//!
//! Shared functionality for the Penny expense assistant:
//! - Database access and migrations
//! - Question answering over recorded spending
//! - Receipt OCR and field extraction
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod receipt;
pub mod store;
pub mod text;

pub use config::{Config, OcrConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use query::QueryEngine;
pub use receipt::{MockOcrEngine, OcrEngine, ReceiptExtractor, TesseractEngine};
pub use store::SpendingStore;
