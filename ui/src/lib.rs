#![warn(clippy::all, rust_2018_idioms)]

//! Desktop host screen for scanbox.
//!
//! Wires the `scanbox-scan` crate into an eframe app: one card shows the
//! generated QR image for the demo payload, the other runs a capture session
//! with the viewfinder overlay and reports scan outcomes as a status banner.

pub mod app;
pub mod state;
pub mod widgets;

pub use app::ScanboxApp;
pub use state::{Banner, BannerKind, State};
