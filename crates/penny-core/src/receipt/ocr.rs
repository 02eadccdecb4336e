//! OCR engines
//!
//! - `TesseractEngine` shells out to the `tesseract` CLI
//! - `MockOcrEngine` returns canned text for tests

use std::io::Write;
use std::process::Command;

use tracing::debug;

use crate::config::OcrConfig;
use crate::error::{Error, Result};

/// Turns image bytes into text
pub trait OcrEngine: Send + Sync {
    /// Engine name for logs and status output
    fn name(&self) -> &str;

    /// Whether the engine can run at all
    fn is_available(&self) -> bool;

    /// Recognize the text in an encoded image
    fn recognize(&self, image: &[u8]) -> Result<String>;
}

/// Runs `<cmd> <file> stdout [-l <lang>]`
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    cmd: String,
    language: Option<String>,
}

impl TesseractEngine {
    pub fn new(cmd: impl Into<String>, language: Option<String>) -> Self {
        Self {
            cmd: cmd.into(),
            language,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.language.clone())
    }

    /// The configured command
    pub fn command(&self) -> &str {
        &self.cmd
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        which::which(&self.cmd).is_ok()
    }

    fn recognize(&self, image: &[u8]) -> Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("penny-receipt-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(image)?;
        file.flush()?;

        let mut command = Command::new(&self.cmd);
        command.arg(file.path()).arg("stdout");
        if let Some(lang) = &self.language {
            command.arg("-l").arg(lang);
        }

        debug!(cmd = %self.cmd, bytes = image.len(), "Running tesseract");
        let output = command
            .output()
            .map_err(|e| Error::Ocr(format!("Failed to run '{}': {}", self.cmd, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ocr(format!(
                "'{}' exited with {}: {}",
                self.cmd,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Canned OCR results for tests
#[derive(Debug, Clone)]
pub struct MockOcrEngine {
    outcome: std::result::Result<String, String>,
}

impl MockOcrEngine {
    /// Always recognize `text`
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
        }
    }

    /// Always fail with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        self.outcome.is_ok()
    }

    fn recognize(&self, _image: &[u8]) -> Result<String> {
        self.outcome.clone().map_err(Error::Ocr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_engine() {
        let ok = MockOcrEngine::with_text("Cafe\nTotal 3.00");
        assert!(ok.is_available());
        assert_eq!(ok.recognize(b"img").unwrap(), "Cafe\nTotal 3.00");

        let failing = MockOcrEngine::failing("no engine");
        assert!(!failing.is_available());
        assert!(matches!(failing.recognize(b"img"), Err(Error::Ocr(m)) if m == "no engine"));
    }

    #[test]
    fn test_missing_tesseract_binary() {
        let engine = TesseractEngine::new("penny-no-such-tesseract-binary", None);
        assert!(!engine.is_available());
        assert!(matches!(engine.recognize(b"img"), Err(Error::Ocr(_))));
    }

    #[test]
    fn test_from_config() {
        let config = OcrConfig {
            tesseract_cmd: "/usr/local/bin/tesseract".to_string(),
            language: Some("deu".to_string()),
        };
        let engine = TesseractEngine::from_config(&config);
        assert_eq!(engine.command(), "/usr/local/bin/tesseract");
        assert_eq!(engine.name(), "tesseract");
    }
}
