//! Receipt field extraction
//!
//! Pipeline: binarize the image, run OCR, then read the total and the store
//! name out of the text. Every step degrades instead of failing, so an
//! unreadable upload still produces an (empty) extraction.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::models::{ReceiptExtraction, UNCATEGORIZED};

pub mod fields;
pub mod ocr;
pub mod preprocess;

pub use fields::{extract_amount, extract_store_name};
pub use ocr::{MockOcrEngine, OcrEngine, TesseractEngine};

/// Extracts a total and a merchant from receipt images
#[derive(Clone)]
pub struct ReceiptExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl ReceiptExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Extractor backed by the configured tesseract binary
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(Arc::new(TesseractEngine::from_config(config)))
    }

    /// Whether the OCR engine can run
    pub fn ocr_available(&self) -> bool {
        self.ocr.is_available()
    }

    pub fn ocr_name(&self) -> &str {
        self.ocr.name()
    }

    /// Extract fields from an encoded image. Never fails.
    pub fn extract(&self, image: &[u8]) -> ReceiptExtraction {
        let prepared = preprocess::preprocess(image);

        let text = match self.ocr.recognize(&prepared) {
            Ok(text) => text,
            Err(e) => {
                warn!(engine = self.ocr.name(), error = %e, "OCR failed");
                String::new()
            }
        };

        let extraction = Self::extract_from_text(text);
        info!(
            amount = extraction.amount,
            store = %extraction.store_name,
            "Extracted receipt"
        );
        extraction
    }

    /// Field heuristics over already-recognized text
    pub fn extract_from_text(text: String) -> ReceiptExtraction {
        let amount = extract_amount(&text);
        let store_name = extract_store_name(&text);
        debug!(chars = text.len(), amount, "Parsed receipt text");

        ReceiptExtraction {
            text,
            amount,
            store_name,
            category: UNCATEGORIZED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Mutex;

    use image::{DynamicImage, GrayImage, ImageFormat, Luma};

    use super::*;

    fn extractor(ocr: MockOcrEngine) -> ReceiptExtractor {
        ReceiptExtractor::new(Arc::new(ocr))
    }

    /// OCR engine that keeps the bytes it was handed
    #[derive(Default)]
    struct RecordingOcr {
        seen: Mutex<Vec<u8>>,
    }

    impl RecordingOcr {
        fn seen(&self) -> Vec<u8> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl OcrEngine for RecordingOcr {
        fn name(&self) -> &str {
            "recording"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn recognize(&self, image: &[u8]) -> crate::error::Result<String> {
            *self.seen.lock().unwrap() = image.to_vec();
            Ok("Cafe\nTotal 3.00".to_string())
        }
    }

    fn grey_gradient_jpeg() -> Vec<u8> {
        let gray = GrayImage::from_fn(32, 8, |x, _| Luma([(x * 8) as u8]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(gray)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_ocr_receives_binarized_png() {
        let ocr = Arc::new(RecordingOcr::default());
        let result = ReceiptExtractor::new(ocr.clone()).extract(&grey_gradient_jpeg());
        assert_eq!(result.amount, 3.00);

        let seen = ocr.seen();
        assert_eq!(image::guess_format(&seen).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&seen).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (32, 8));
        assert!(decoded.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert!(decoded.pixels().any(|p| p.0[0] == 0));
        assert!(decoded.pixels().any(|p| p.0[0] == 255));
    }

    #[test]
    fn test_ocr_receives_original_bytes_when_undecodable() {
        let ocr = Arc::new(RecordingOcr::default());
        let garbage = b"definitely not an image".to_vec();
        ReceiptExtractor::new(ocr.clone()).extract(&garbage);

        assert_eq!(ocr.seen(), garbage);
    }

    #[test]
    fn test_extract_with_mock_text() {
        let text = "Corner Market\nBread 4.00\nSubtotal 18.00\nTax 1.50\nTotal: 19.50\n";
        let result = extractor(MockOcrEngine::with_text(text)).extract(b"not really an image");

        assert_eq!(result.text, text);
        assert_eq!(result.amount, 19.50);
        assert_eq!(result.store_name, "Corner Market");
        assert_eq!(result.category, "Uncategorized");
    }

    #[test]
    fn test_ocr_failure_gives_empty_extraction() {
        let result = extractor(MockOcrEngine::failing("tesseract missing")).extract(&[0xff, 0x00]);
        assert_eq!(result, ReceiptExtraction::empty());
    }

    #[test]
    fn test_garbage_bytes_never_panic() {
        let ex = extractor(MockOcrEngine::with_text(""));
        for bytes in [&b""[..], &[0u8; 3][..], &b"\x89PNG\r\n\x1a\ntruncated"[..]] {
            let result = ex.extract(bytes);
            assert_eq!(result.amount, 0.0);
            assert_eq!(result.store_name, "Unknown Store");
        }
    }

    #[test]
    fn test_ocr_availability() {
        assert!(extractor(MockOcrEngine::with_text("x")).ocr_available());
        assert!(!extractor(MockOcrEngine::failing("x")).ocr_available());
        assert_eq!(extractor(MockOcrEngine::with_text("x")).ocr_name(), "mock");
    }
}
