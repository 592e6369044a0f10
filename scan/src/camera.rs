//! Frame sources for the capture session.
//!
//! A [`FrameSource`] is the capture-pipeline seam: the session acquires it on
//! `start()`, pulls frames from it while running, and halts it on `stop()`.
//! Real hardware capture belongs to the platform and slots in behind this
//! trait; the sources shipped here are:
//!
//! - [`DemoCamera`]: a synthetic camera whose frames eventually show a QR
//!   symbol of a fixed payload, so the app demonstrates the full
//!   generate-and-scan loop without hardware
//! - [`MockCamera`]: a scripted double for tests

use image::GrayImage;

use crate::generate::render_qr_luma;

/// Error types for capture-pipeline acquisition.
///
/// All variants are terminal for the session that hit them; recovery is a
/// user-initiated retry with a fresh session.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    /// No camera device is present.
    #[error("no camera device is available")]
    DeviceUnavailable,
    /// The platform refused camera access.
    #[error("camera permission was denied")]
    PermissionDenied,
    /// The device exists but rejected the requested configuration.
    #[error("capture pipeline rejected the configuration: {0}")]
    PipelineRejected(String),
}

/// A camera-like producer of grayscale frames.
///
/// Implementations are polled from the UI thread; `next_frame` returning
/// `None` means no new frame is ready yet.
pub trait FrameSource {
    /// Acquire the device. Called once by the session's `start()`.
    fn open(&mut self) -> Result<(), CaptureError>;

    /// The next frame, if one is ready.
    fn next_frame(&mut self) -> Option<GrayImage>;

    /// Release the device. Called by the session's `stop()`.
    fn halt(&mut self);
}

/// Number of flat warm-up frames [`DemoCamera`] serves before the symbol
/// appears, so the viewfinder is visibly "searching" for a moment.
const DEMO_WARMUP_FRAMES: u32 = 45;

/// Pixels per module in the demo camera's rendered symbol.
const DEMO_MODULE_PX: usize = 8;

/// Quiet-zone width, in modules, around the demo camera's rendered symbol.
const DEMO_QUIET_MODULES: usize = 4;

/// Synthetic frame source: serves a few featureless warm-up frames, then
/// frames carrying a QR symbol of its payload.
pub struct DemoCamera {
    payload: String,
    warmup: u32,
    served: u32,
    symbol: Option<GrayImage>,
}

impl DemoCamera {
    /// A demo camera that will eventually show `payload` as a QR symbol.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            warmup: DEMO_WARMUP_FRAMES,
            served: 0,
            symbol: None,
        }
    }

    /// Override the number of warm-up frames (tests use 0 or a small value).
    pub fn with_warmup(mut self, frames: u32) -> Self {
        self.warmup = frames;
        self
    }
}

impl FrameSource for DemoCamera {
    fn open(&mut self) -> Result<(), CaptureError> {
        let symbol = render_qr_luma(&self.payload, DEMO_MODULE_PX, DEMO_QUIET_MODULES)
            .map_err(|e| CaptureError::PipelineRejected(e.to_string()))?;
        self.symbol = Some(symbol);
        self.served = 0;
        Ok(())
    }

    fn next_frame(&mut self) -> Option<GrayImage> {
        let symbol = self.symbol.as_ref()?;
        self.served = self.served.saturating_add(1);
        if self.served <= self.warmup {
            // Featureless mid-gray: nothing for the detector to find.
            Some(GrayImage::from_pixel(
                symbol.width(),
                symbol.height(),
                image::Luma([128u8]),
            ))
        } else {
            Some(symbol.clone())
        }
    }

    fn halt(&mut self) {
        self.symbol = None;
        self.served = 0;
    }
}

/// Scripted frame source for tests.
///
/// Either fails on `open()` with a configured error, or serves a queue of
/// frames (optionally repeating the last one forever).
#[derive(Default)]
pub struct MockCamera {
    fail_open: Option<CaptureError>,
    frames: std::collections::VecDeque<GrayImage>,
    repeat_last: bool,
    opened: bool,
    halted: bool,
}

impl MockCamera {
    /// A camera that serves the given frames in order, then runs dry.
    pub fn with_frames(frames: Vec<GrayImage>) -> Self {
        Self {
            frames: frames.into(),
            ..Self::default()
        }
    }

    /// A camera that serves `frame` forever.
    pub fn repeating(frame: GrayImage) -> Self {
        Self {
            frames: std::collections::VecDeque::from(vec![frame]),
            repeat_last: true,
            ..Self::default()
        }
    }

    /// A camera whose acquisition fails with `err`.
    pub fn failing(err: CaptureError) -> Self {
        Self {
            fail_open: Some(err),
            ..Self::default()
        }
    }

    /// Whether `open()` succeeded at some point.
    pub fn opened(&self) -> bool {
        self.opened
    }

    /// Whether `halt()` has been called.
    pub fn halted(&self) -> bool {
        self.halted
    }
}

impl FrameSource for MockCamera {
    fn open(&mut self) -> Result<(), CaptureError> {
        if let Some(err) = self.fail_open.take() {
            return Err(err);
        }
        self.opened = true;
        self.halted = false;
        Ok(())
    }

    fn next_frame(&mut self) -> Option<GrayImage> {
        if !self.opened || self.halted {
            return None;
        }
        let frame = self.frames.pop_front()?;
        if self.repeat_last && self.frames.is_empty() {
            self.frames.push_back(frame.clone());
        }
        Some(frame)
    }

    fn halt(&mut self) {
        self.halted = true;
    }
}

/// Convert a grayscale frame into an egui image for preview painting.
pub fn frame_to_color_image(frame: &GrayImage) -> egui::ColorImage {
    let pixels = frame
        .pixels()
        .map(|p| egui::Color32::from_gray(p.0[0]))
        .collect();
    egui::ColorImage::new([frame.width() as usize, frame.height() as usize], pixels)
}
