//! Symbol detection over camera frames.
//!
//! Detection and decoding are delegated to the `rqrr` crate; this module only
//! adapts frames to it and shapes the results. The [`SymbolDetector`] trait is
//! the seam the session talks to, so tests can script detections without
//! rasterizing symbols.

use image::GrayImage;

/// Symbologies a detector can report.
///
/// Only QR is configured by the session today; the enum exists so the
/// first-result filtering matches on type rather than on a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    Qr,
}

/// One decoded symbol found in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedCode {
    /// The decoded payload text.
    pub payload: String,
    /// The symbology the payload was decoded from.
    pub symbology: Symbology,
}

/// Per-frame symbol detector.
pub trait SymbolDetector {
    /// All symbols decodable from `frame`, in detection order.
    ///
    /// Grids that are located but fail to decode are dropped, matching the
    /// platform detectors this stands in for: they only surface readable
    /// objects.
    fn detect(&mut self, frame: &GrayImage) -> Vec<DetectedCode>;
}

/// QR detector backed by `rqrr`.
#[derive(Debug, Default)]
pub struct RqrrDetector;

impl SymbolDetector for RqrrDetector {
    fn detect(&mut self, frame: &GrayImage) -> Vec<DetectedCode> {
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            frame.width() as usize,
            frame.height() as usize,
            |x, y| frame.get_pixel(x as u32, y as u32).0[0],
        );

        prepared
            .detect_grids()
            .into_iter()
            .filter_map(|grid| match grid.decode() {
                Ok((_meta, payload)) => Some(DetectedCode {
                    payload,
                    symbology: Symbology::Qr,
                }),
                Err(err) => {
                    log::debug!("grid located but failed to decode: {err}");
                    None
                }
            })
            .collect()
    }
}
