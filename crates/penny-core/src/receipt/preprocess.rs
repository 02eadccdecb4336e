//! Image cleanup ahead of OCR: greyscale plus a global Otsu threshold

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat};
use tracing::{debug, warn};

use crate::error::Result;

/// Binarize an image, falling back to the original bytes if it can't be decoded
pub fn preprocess(bytes: &[u8]) -> Vec<u8> {
    match binarize(bytes) {
        Ok(png) => png,
        Err(e) => {
            warn!(error = %e, "Image preprocessing failed, using original bytes");
            bytes.to_vec()
        }
    }
}

/// Decode, convert to 8-bit luma, threshold, and re-encode as PNG
pub fn binarize(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut gray = image::load_from_memory(bytes)?.to_luma8();
    let threshold = otsu_threshold(&gray);
    debug!(
        threshold,
        width = gray.width(),
        height = gray.height(),
        "Binarizing receipt image"
    );

    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 255 } else { 0 };
    }

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(gray).write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Threshold maximizing between-class variance of the luma histogram
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 0;
    }
    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut background_weight = 0u64;
    let mut background_sum = 0.0;
    let mut best_variance = 0.0;
    let mut threshold = 0u8;

    for (level, &count) in histogram.iter().enumerate() {
        background_weight += count;
        if background_weight == 0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0 {
            break;
        }

        background_sum += level as f64 * count as f64;
        let background_mean = background_sum / background_weight as f64;
        let foreground_mean = (weighted_sum - background_sum) / foreground_weight as f64;
        let variance = background_weight as f64
            * foreground_weight as f64
            * (background_mean - foreground_mean).powi(2);

        if variance > best_variance {
            best_variance = variance;
            threshold = level as u8;
        }
    }

    threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Left half dark ink, right half light paper
    fn two_tone(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Luma([40])
            } else {
                Luma([200])
            }
        })
    }

    fn encode(gray: GrayImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(gray)
            .write_to(&mut out, format)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_otsu_splits_two_levels() {
        let t = otsu_threshold(&two_tone(10, 4));
        assert!((40..200).contains(&t), "threshold {}", t);
    }

    #[test]
    fn test_otsu_uniform_image() {
        let gray = GrayImage::from_pixel(5, 5, Luma([128]));
        assert_eq!(otsu_threshold(&gray), 0);
    }

    #[test]
    fn test_binarize_outputs_black_and_white_png() {
        let png = binarize(&encode(two_tone(8, 2), ImageFormat::Png)).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (8, 2));
        assert_eq!(decoded.get_pixel(0, 0).0[0], 0);
        assert_eq!(decoded.get_pixel(7, 1).0[0], 255);
        assert!(decoded.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_binarize_accepts_jpeg() {
        let jpeg = encode(two_tone(16, 16), ImageFormat::Jpeg);
        assert!(binarize(&jpeg).is_ok());
    }

    #[test]
    fn test_preprocess_passes_garbage_through() {
        let garbage = b"definitely not an image".to_vec();
        assert!(binarize(&garbage).is_err());
        assert_eq!(preprocess(&garbage), garbage);
        assert!(preprocess(&[]).is_empty());
    }
}
