//! The capture session: camera acquisition, per-frame detection, and
//! at-most-once result delivery.
//!
//! The session is an explicit state machine:
//!
//! ```text
//! Idle --start()--> Running --first decode--> Terminal(Stopped)
//!   |                  |  \--stop(user)-----> Terminal(Stopped)
//!   |                   \--acquisition err--> Terminal(Failed)
//!    \--stop()--------------------------------^ (Stopped)
//! ```
//!
//! Both terminal states are final: a session is never restarted, the host
//! creates a fresh one to retry. The camera and detector handles live inside
//! the `Running` variant, so touching them from any other state is
//! unrepresentable rather than a runtime crash.
//!
//! Results travel over a per-session `flume` channel. All transitions happen
//! on the thread that pumps the session (the UI thread in the app), so the
//! channel is the only cross-context hand-off.

use image::GrayImage;

use crate::camera::{CaptureError, FrameSource};
use crate::detect::{DetectedCode, SymbolDetector, Symbology};

/// Outcome notifications delivered over the session's event channel.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A symbol was decoded. Delivered at most once per session, immediately
    /// followed by a programmatic `Stopped`.
    Found(String),
    /// Session setup failed; the session is terminal.
    Failed(CaptureError),
    /// The session stopped. `user_initiated` distinguishes a cancel gesture
    /// from the programmatic stop after a find.
    Stopped { user_initiated: bool },
}

/// Sender half of a session's event channel.
pub type ScanEventSender = flume::Sender<ScanEvent>;

/// Receiver half of a session's event channel.
pub type ScanEventReceiver = flume::Receiver<ScanEvent>;

/// Creates the event channel wiring one session to its host screen.
pub fn create_scan_channel() -> (ScanEventSender, ScanEventReceiver) {
    flume::unbounded()
}

/// Feedback fired once when a symbol is decoded.
///
/// A phone would vibrate here; on desktop the default just logs. Tests
/// substitute a recording implementation to pin the at-most-once guarantee.
pub trait ScanCue {
    /// Called exactly once per session, right before `Found` is delivered.
    fn code_found(&mut self);
}

/// Default cue: a log line.
#[derive(Debug, Default)]
pub struct LogCue;

impl ScanCue for LogCue {
    fn code_found(&mut self) {
        log::info!("symbol decoded, signaling feedback cue");
    }
}

/// Why a session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    /// Camera acquisition failed during `start()`.
    Failed,
    /// The session was stopped, by the host or after a find.
    Stopped,
}

enum SessionState {
    Idle {
        camera: Box<dyn FrameSource>,
        detector: Box<dyn SymbolDetector>,
    },
    Running {
        camera: Box<dyn FrameSource>,
        detector: Box<dyn SymbolDetector>,
        preview: Option<GrayImage>,
    },
    Terminal(TerminalReason),
}

/// One scan attempt: owns the camera and detector, delivers [`ScanEvent`]s.
pub struct CaptureSession {
    state: SessionState,
    symbologies: Vec<Symbology>,
    events: ScanEventSender,
    cue: Box<dyn ScanCue>,
}

impl CaptureSession {
    /// A new idle session, configured for QR symbols only.
    pub fn new(
        camera: Box<dyn FrameSource>,
        detector: Box<dyn SymbolDetector>,
        events: ScanEventSender,
    ) -> Self {
        Self {
            state: SessionState::Idle { camera, detector },
            symbologies: vec![Symbology::Qr],
            events,
            cue: Box::new(LogCue),
        }
    }

    /// Replace the feedback cue.
    pub fn with_cue(mut self, cue: Box<dyn ScanCue>) -> Self {
        self.cue = cue;
        self
    }

    /// Whether the camera is currently running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    /// The terminal reason, once the session has ended.
    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        match self.state {
            SessionState::Terminal(reason) => Some(reason),
            SessionState::Idle { .. } | SessionState::Running { .. } => None,
        }
    }

    /// The most recently pumped frame, for preview painting.
    pub fn preview(&self) -> Option<&GrayImage> {
        match &self.state {
            SessionState::Running { preview, .. } => preview.as_ref(),
            SessionState::Idle { .. } | SessionState::Terminal(_) => None,
        }
    }

    /// Acquire the camera and enter `Running`.
    ///
    /// Any acquisition failure lands in `Terminal(Failed)` and delivers a
    /// single `Failed` event; there is no retry on the same session. Calling
    /// `start()` on a running or terminal session is a no-op.
    pub fn start(&mut self) {
        let state = std::mem::replace(&mut self.state, SessionState::Terminal(TerminalReason::Failed));
        self.state = match state {
            SessionState::Idle {
                mut camera,
                detector,
            } => match camera.open() {
                Ok(()) => {
                    log::info!("capture session running");
                    SessionState::Running {
                        camera,
                        detector,
                        preview: None,
                    }
                }
                Err(err) => {
                    log::error!("capture session setup failed: {err}");
                    self.emit(ScanEvent::Failed(err));
                    SessionState::Terminal(TerminalReason::Failed)
                }
            },
            other => other,
        };
    }

    /// Pull one frame from the camera and run detection over it.
    ///
    /// The host calls this once per UI frame while the session runs. Only the
    /// first decoded object in a frame is consulted; on a hit the session
    /// fires the cue, delivers `Found` once, and stops itself
    /// programmatically.
    pub fn pump(&mut self) {
        let first = match &mut self.state {
            SessionState::Running {
                camera,
                detector,
                preview,
            } => {
                let Some(frame) = camera.next_frame() else {
                    return;
                };
                let codes = detector.detect(&frame);
                *preview = Some(frame);
                codes.into_iter().next()
            }
            SessionState::Idle { .. } | SessionState::Terminal(_) => return,
        };

        let Some(DetectedCode { payload, symbology }) = first else {
            return;
        };
        if !self.symbologies.contains(&symbology) {
            return;
        }

        log::info!("decoded {symbology:?} symbol ({} bytes)", payload.len());
        self.cue.code_found();
        self.emit(ScanEvent::Found(payload));
        self.stop_with(false);
    }

    /// Halt the camera and deliver `Stopped { user_initiated }` once.
    ///
    /// A stop on an already-terminal session is a no-op: nothing is halted
    /// and nothing is re-delivered.
    pub fn stop(&mut self, user_initiated: bool) {
        self.stop_with(user_initiated);
    }

    fn stop_with(&mut self, user_initiated: bool) {
        let state = std::mem::replace(&mut self.state, SessionState::Terminal(TerminalReason::Stopped));
        match state {
            SessionState::Running { mut camera, .. } => {
                camera.halt();
                log::info!("capture session stopped (user_initiated: {user_initiated})");
                self.emit(ScanEvent::Stopped { user_initiated });
            }
            SessionState::Idle { .. } => {
                // Host tear-down before start: nothing to halt, still notify.
                self.emit(ScanEvent::Stopped { user_initiated });
            }
            SessionState::Terminal(reason) => {
                // Preserve the original reason; double-stop delivers nothing.
                self.state = SessionState::Terminal(reason);
            }
        }
    }

    fn emit(&self, event: ScanEvent) {
        if self.events.send(event).is_err() {
            log::warn!("scan event dropped: receiver disconnected");
        }
    }
}
