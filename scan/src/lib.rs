//! Core scanning logic for scanbox: QR generation, the capture-session state
//! machine, and the viewfinder overlay geometry.
//!
//! This crate has no windowing code. It depends on `egui` only for its value
//! types (`Rect`, `Pos2`, `ColorImage`) so the UI crate can consume the
//! output directly.
//!
//! # Modules
//!
//! - [`generate`]: payload-to-image QR generation via the `qrcode` crate
//! - [`camera`]: the [`FrameSource`] seam plus the shipped demo and mock sources
//! - [`detect`]: the [`SymbolDetector`] seam plus the `rqrr`-backed detector
//! - [`session`]: the capture-session state machine and its event channel
//! - [`overlay`]: dimming-mask and corner-bracket geometry for the viewfinder
//!
//! # Design Philosophy
//!
//! Hardware access sits behind traits for testability:
//! - Production code runs the synthetic [`DemoCamera`] and [`RqrrDetector`]
//! - Tests substitute [`MockCamera`] and scripted detectors

pub mod camera;
pub mod detect;
pub mod generate;
pub mod overlay;
pub mod session;

pub use camera::{CaptureError, DemoCamera, FrameSource, MockCamera, frame_to_color_image};
pub use detect::{DetectedCode, RqrrDetector, SymbolDetector, Symbology};
pub use generate::{GenerateError, generate_qr_image, render_qr_luma};
pub use overlay::{OverlayConfig, OverlayGeometry};
pub use session::{
    CaptureSession, LogCue, ScanCue, ScanEvent, ScanEventReceiver, ScanEventSender,
    TerminalReason, create_scan_channel,
};
