//! The main application state.

use egui::{Rect, TextureHandle};
use scanbox_scan::{
    CaptureError, CaptureSession, DemoCamera, FrameSource, OverlayConfig, OverlayGeometry,
    RqrrDetector, ScanEvent, ScanEventReceiver, create_scan_channel,
};

/// The payload the generator card encodes at startup.
pub const DEMO_PAYLOAD: &str = "https://daum.net";

/// Kind of feedback a banner carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// A symbol was scanned.
    Success,
    /// The scanner could not run.
    Error,
    /// Neutral status (e.g. cancelled).
    Info,
}

/// One user-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

/// Factory producing a fresh camera per scan attempt.
pub type CameraFactory = Box<dyn FnMut() -> Box<dyn FrameSource>>;

/// The main application state.
///
/// Note: We manually implement Default because the camera factory and the
/// scan-event channel halves don't implement Default.
pub struct State {
    /// Payload encoded by the generator card.
    pub demo_payload: String,
    /// Overlay styling for the scanner view.
    pub overlay_config: OverlayConfig,
    /// The current scan attempt, if any (running or terminal).
    pub session: Option<CaptureSession>,
    /// Receiver for the current session's events.
    pub scan_events: Option<ScanEventReceiver>,
    /// Cached generator output texture.
    pub qr_texture: Option<TextureHandle>,
    /// Generator failure, shown in place of the image.
    pub qr_error: Option<String>,
    /// Live preview texture for the scanner view.
    pub preview_texture: Option<TextureHandle>,
    /// Latest user-visible status.
    pub banner: Option<Banner>,
    /// Append-only log of scan outcomes.
    pub scan_log: Vec<String>,
    camera_factory: CameraFactory,
    overlay_cache: Option<(Rect, OverlayConfig, OverlayGeometry)>,
}

impl Default for State {
    fn default() -> Self {
        Self::with_camera_factory(Box::new(|| Box::new(DemoCamera::new(DEMO_PAYLOAD))))
    }
}

impl State {
    /// State backed by a custom camera factory; tests inject mock cameras
    /// through this.
    pub fn with_camera_factory(camera_factory: CameraFactory) -> Self {
        Self {
            demo_payload: DEMO_PAYLOAD.to_owned(),
            overlay_config: OverlayConfig::default(),
            session: None,
            scan_events: None,
            qr_texture: None,
            qr_error: None,
            preview_texture: None,
            banner: None,
            scan_log: Vec::new(),
            camera_factory,
            overlay_cache: None,
        }
    }

    /// Whether a session is currently running.
    pub fn is_scanning(&self) -> bool {
        self.session.as_ref().is_some_and(CaptureSession::is_running)
    }

    /// Begin a fresh scan attempt.
    ///
    /// Creates a new session with its own single-shot event channel; any
    /// previous (terminal) session and its receiver are dropped. Setup
    /// failures surface through the channel as a `Failed` event.
    pub fn start_scan(&mut self) {
        let (sender, receiver) = create_scan_channel();
        let camera = (self.camera_factory)();
        let mut session =
            CaptureSession::new(camera, Box::new(RqrrDetector), sender);
        session.start();

        self.scan_events = Some(receiver);
        self.session = Some(session);
        self.preview_texture = None;
    }

    /// Stop the current session, if any.
    pub fn stop_scan(&mut self, user_initiated: bool) {
        if let Some(session) = &mut self.session {
            session.stop(user_initiated);
        }
    }

    /// Advance the running session by one camera frame.
    pub fn pump_session(&mut self) {
        if let Some(session) = &mut self.session {
            session.pump();
        }
    }

    /// Drain pending scan events into banner and log.
    pub fn poll_scan_events(&mut self) {
        let drained: Vec<ScanEvent> = match &self.scan_events {
            Some(receiver) => receiver.try_iter().collect(),
            None => return,
        };
        for event in drained {
            self.apply_scan_event(event);
        }
    }

    /// Overlay geometry for the scanner view, recomputed only when the view
    /// rect or the overlay config changes.
    pub fn overlay_geometry(&mut self, view: Rect) -> &OverlayGeometry {
        let stale = self
            .overlay_cache
            .as_ref()
            .is_none_or(|(cached_view, cached_config, _)| {
                *cached_view != view || *cached_config != self.overlay_config
            });
        if stale {
            self.overlay_cache = None;
        }
        let config = &self.overlay_config;
        let (_, _, geometry) = self.overlay_cache.get_or_insert_with(|| {
            // Reading window defaults to the full view.
            let geometry = OverlayGeometry::compute(view, view, config);
            (view, config.clone(), geometry)
        });
        geometry
    }

    fn apply_scan_event(&mut self, event: ScanEvent) {
        let banner = match event {
            ScanEvent::Found(code) => Some(Banner {
                kind: BannerKind::Success,
                text: format!("Scanned: {code}"),
            }),
            ScanEvent::Failed(CaptureError::PermissionDenied) => Some(Banner {
                kind: BannerKind::Error,
                text: "Camera permission denied. Enable camera access and try again.".to_owned(),
            }),
            ScanEvent::Failed(err) => Some(Banner {
                kind: BannerKind::Error,
                text: format!("Scanner unavailable: {err}"),
            }),
            ScanEvent::Stopped {
                user_initiated: true,
            } => Some(Banner {
                kind: BannerKind::Info,
                text: "Scan cancelled.".to_owned(),
            }),
            ScanEvent::Stopped {
                user_initiated: false,
            } => {
                // Programmatic stop always follows a Found; keep that banner.
                self.scan_log.push("scanner stopped".to_owned());
                None
            }
        };

        if let Some(banner) = banner {
            log::info!("{}", banner.text);
            self.scan_log.push(banner.text.clone());
            self.banner = Some(banner);
        }
    }
}
