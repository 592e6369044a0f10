//! QR code generation.
//!
//! Encoding is delegated to the `qrcode` crate; this module only scales the
//! symbol into pixel buffers. Payloads are encoded as their full UTF-8 bytes,
//! so non-ASCII text either encodes losslessly or fails with a typed error.
//! It is never silently truncated.

use egui::{Color32, ColorImage};
use image::GrayImage;
use qrcode::QrCode;
use qrcode::types::QrError;

/// Error types for QR generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The payload was empty; there is nothing to encode.
    #[error("payload is empty")]
    EmptyPayload,
    /// The encoder rejected the payload (e.g. too long for any version).
    #[error("payload could not be encoded: {0}")]
    Encoding(#[from] QrError),
    /// The requested image is smaller than one pixel per module.
    #[error("requested size {requested}px cannot fit a {modules}-module symbol")]
    SizeTooSmall { requested: usize, modules: usize },
}

/// Generate a QR code image from a text payload.
///
/// The returned [`ColorImage`] is exactly `size` x `size` pixels: the symbol
/// is magnified by the largest whole-pixel factor that fits and centered on a
/// white canvas, so the leftover border doubles as quiet zone.
///
/// Callers display the result as an egui texture.
pub fn generate_qr_image(text: &str, size: usize) -> Result<ColorImage, GenerateError> {
    let (code, scale) = scaled_symbol(text, size)?;
    let modules = code.width();
    let symbol_px = modules * scale;
    let offset = (size - symbol_px) / 2;

    let mut pixels = vec![Color32::WHITE; size * size];

    for (y, row) in code.to_colors().chunks(modules).enumerate() {
        for (x, color) in row.iter().enumerate() {
            if *color == qrcode::Color::Dark {
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = offset + x * scale + dx;
                        let py = offset + y * scale + dy;
                        pixels[py * size + px] = Color32::BLACK;
                    }
                }
            }
        }
    }

    Ok(ColorImage::new([size, size], pixels))
}

/// Render a QR symbol as a luma image, `module_px` pixels per module with a
/// `quiet_modules`-module white border on every side.
///
/// This is the raster a camera would see; the demo frame source and the
/// round-trip tests feed it to the detector.
pub fn render_qr_luma(
    text: &str,
    module_px: usize,
    quiet_modules: usize,
) -> Result<GrayImage, GenerateError> {
    if text.is_empty() {
        return Err(GenerateError::EmptyPayload);
    }

    let code = QrCode::new(text.as_bytes())?;
    let modules = code.width();
    let side = (modules + 2 * quiet_modules) * module_px;
    let mut frame = GrayImage::from_pixel(side as u32, side as u32, image::Luma([255u8]));

    let origin = quiet_modules * module_px;
    for (y, row) in code.to_colors().chunks(modules).enumerate() {
        for (x, color) in row.iter().enumerate() {
            if *color == qrcode::Color::Dark {
                for dy in 0..module_px {
                    for dx in 0..module_px {
                        let px = (origin + x * module_px + dx) as u32;
                        let py = (origin + y * module_px + dy) as u32;
                        frame.put_pixel(px, py, image::Luma([0u8]));
                    }
                }
            }
        }
    }

    Ok(frame)
}

/// Validates the payload, encodes it once, and computes the magnification
/// for a `size`-pixel target.
fn scaled_symbol(text: &str, size: usize) -> Result<(QrCode, usize), GenerateError> {
    if text.is_empty() {
        return Err(GenerateError::EmptyPayload);
    }
    let code = QrCode::new(text.as_bytes())?;
    let scale = size / code.width();
    if scale == 0 {
        return Err(GenerateError::SizeTooSmall {
            requested: size,
            modules: code.width(),
        });
    }
    Ok((code, scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_image_has_exact_requested_size() {
        for size in [64, 200, 512] {
            let image = generate_qr_image("https://daum.net", size).expect("should encode");
            assert_eq!(
                image.size,
                [size, size],
                "output must be exactly the requested size"
            );
        }
    }

    #[test]
    fn test_non_ascii_payload_encodes_without_loss() {
        // The full UTF-8 bytes go into the symbol or the call fails loudly.
        let image = generate_qr_image("안녕하세요 scanbox", 256).expect("UTF-8 should encode");
        assert_eq!(image.size, [256, 256]);
    }

    #[test]
    fn test_empty_payload_is_a_typed_error() {
        let err = generate_qr_image("", 256).expect_err("empty payload must fail");
        assert!(matches!(err, GenerateError::EmptyPayload));
    }

    #[test]
    fn test_undersized_target_is_a_typed_error() {
        // A version-1 symbol is 21 modules; 10px cannot fit one pixel per module.
        let err = generate_qr_image("hi", 10).expect_err("too-small target must fail");
        assert!(matches!(err, GenerateError::SizeTooSmall { .. }));
    }

    #[test]
    fn test_generated_image_contains_both_colors() {
        let image = generate_qr_image("contrast", 128).expect("should encode");
        let has_dark = image.pixels.iter().any(|p| *p == Color32::BLACK);
        let has_light = image.pixels.iter().any(|p| *p == Color32::WHITE);
        assert!(has_dark && has_light, "symbol should paint dark modules on white");
    }

    #[test]
    fn test_luma_render_has_quiet_zone() {
        let frame = render_qr_luma("quiet", 4, 4).expect("should encode");
        // The border band must be all white.
        for x in 0..frame.width() {
            assert_eq!(frame.get_pixel(x, 0).0[0], 255, "top border must be quiet");
            assert_eq!(
                frame.get_pixel(x, frame.height() - 1).0[0],
                255,
                "bottom border must be quiet"
            );
        }
    }
}
