//! End-to-end: a payload rendered by the generator travels through the demo
//! camera and the rqrr detector and comes back out of a capture session.

use scanbox_scan::{
    CaptureSession, DemoCamera, RqrrDetector, ScanEvent, create_scan_channel,
};

#[test]
fn demo_camera_roundtrip_delivers_payload() {
    let (tx, rx) = create_scan_channel();
    let camera = DemoCamera::new("https://daum.net").with_warmup(2);
    let mut session = CaptureSession::new(Box::new(camera), Box::new(RqrrDetector), tx);

    session.start();
    assert!(session.is_running(), "demo camera should acquire");

    for _ in 0..10 {
        session.pump();
        if !session.is_running() {
            break;
        }
    }

    let events: Vec<ScanEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 2, "expected Found then Stopped, got {events:?}");
    assert!(
        matches!(&events[0], ScanEvent::Found(code) if code == "https://daum.net"),
        "decoded payload must match the generated one"
    );
    assert!(matches!(
        events[1],
        ScanEvent::Stopped {
            user_initiated: false
        }
    ));
}

#[test]
fn user_stop_during_warmup_cancels_cleanly() {
    let (tx, rx) = create_scan_channel();
    let camera = DemoCamera::new("never seen").with_warmup(1000);
    let mut session = CaptureSession::new(Box::new(camera), Box::new(RqrrDetector), tx);

    session.start();
    session.pump();
    session.pump();
    session.stop(true);

    let events: Vec<ScanEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 1, "no Found during warm-up, one Stopped");
    assert!(matches!(
        events[0],
        ScanEvent::Stopped {
            user_initiated: true
        }
    ));
}
