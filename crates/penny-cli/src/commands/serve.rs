//! Server command implementation

use anyhow::{Context, Result};
use penny_core::{Config, ReceiptExtractor};
use penny_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    config: &Config,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Penny web server...");
    println!("   Database: {}", config.db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }

    let db = open_db(&config.db_path)?;
    let extractor = ReceiptExtractor::from_config(&config.ocr);
    let server_config = ServerConfig { allowed_origins };

    penny_server::serve(db, extractor, host, port, server_config)
        .await
        .context("Server error")
}
