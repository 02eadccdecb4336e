//! Process configuration
//!
//! Resolved once at startup and handed to components explicitly:
//! 1. Explicit config file (`--config`), else `~/.config/penny/config.toml` if present
//! 2. Built-in defaults for anything the file leaves out
//! 3. Environment overrides: `PENNY_DB`, `PENNY_TESSERACT_CMD`, `PENNY_OCR_LANG`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "PENNY_DB";

/// Environment variable overriding the tesseract binary
pub const TESSERACT_CMD_ENV: &str = "PENNY_TESSERACT_CMD";

/// Environment variable overriding the OCR language
pub const OCR_LANG_ENV: &str = "PENNY_OCR_LANG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub db_path: PathBuf,
    pub ocr: OcrConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("penny.db"),
            ocr: OcrConfig::default(),
        }
    }
}

/// OCR engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract executable name or absolute path
    pub tesseract_cmd: String,
    /// Tesseract language code (e.g. "eng"); tesseract's default when unset
    pub language: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            language: None,
        }
    }
}

impl Config {
    /// Load config from a file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path).map_err(|e| {
            Error::InvalidData(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(db) = get(DB_PATH_ENV) {
            self.db_path = PathBuf::from(db);
        }
        if let Some(cmd) = get(TESSERACT_CMD_ENV) {
            self.ocr.tesseract_cmd = cmd;
        }
        if let Some(lang) = get(OCR_LANG_ENV) {
            self.ocr.language = Some(lang);
        }
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("penny").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.db_path, PathBuf::from("penny.db"));
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
        assert!(config.ocr.language.is_none());
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            [ocr]
            language = "eng"
            "#,
        )
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("penny.db"));
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
        assert_eq!(config.ocr.language.as_deref(), Some("eng"));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("db_path = [unclosed");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "db_path = \"/var/lib/penny/data.db\"\n[ocr]\ntesseract_cmd = \"/opt/tess/bin/tesseract\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/penny/data.db"));
        assert_eq!(config.ocr.tesseract_cmd, "/opt/tess/bin/tesseract");
    }

    #[test]
    fn test_from_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/penny/config.toml"));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (DB_PATH_ENV, "other.db"),
            (TESSERACT_CMD_ENV, "tess"),
            (OCR_LANG_ENV, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_path, PathBuf::from("other.db"));
        assert_eq!(config.ocr.tesseract_cmd, "tess");
        // Blank values are ignored
        assert!(config.ocr.language.is_none());
    }
}
