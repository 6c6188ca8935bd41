//! End-to-end flows: coordinator and companion wired over the channel
//! transport, driven with synthetic time.

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use mcfetch::companion::{Companion, FileMarkerSource};
use mcfetch::fetch::{
    FetchCoordinator, FetchKind, FetchPhase, READY_POLL, SignalSink, UiSignal,
};
use mcfetch::transport::{ChannelTransport, Inbound, channel};

struct Rig {
    coordinator: FetchCoordinator<ChannelTransport>,
    companion: Companion<FileMarkerSource>,
    outbound_rx: Receiver<String>,
    signals: Receiver<UiSignal>,
    t0: Instant,
    _dir: tempfile::TempDir,
}

fn markers_json(streets: &[&str]) -> String {
    let features: Vec<String> = streets
        .iter()
        .map(|street| {
            format!(
                r#"{{"geometry": {{"coordinates": [0.01, 0.0]}},
                    "properties": {{"street": "{street}", "city": "Springfield",
                    "last_checked": "Checked 2 minutes ago", "dot": "working"}}}}"#
            )
        })
        .collect();
    format!(r#"{{"features": [{}]}}"#, features.join(","))
}

fn rig(streets: &[&str]) -> Rig {
    let dir = tempfile::tempdir().expect("tempdir");
    let path: PathBuf = dir.path().join("markers.json");
    fs::write(&path, markers_json(streets)).expect("write markers");

    let (transport, outbound_rx) = channel();
    let (signal_tx, signal_rx) = mpsc::channel();
    Rig {
        coordinator: FetchCoordinator::new(transport, SignalSink::new(signal_tx)),
        companion: Companion::new(FileMarkerSource::new(&path), Some((0.0, 0.0)), Vec::new()),
        outbound_rx,
        signals: signal_rx,
        t0: Instant::now(),
        _dir: dir,
    }
}

/// One pump iteration: forward watch traffic to the companion, deliver at
/// most one companion message back, then fire due timers.
fn pump(rig: &mut Rig, now: Instant) {
    while let Ok(raw) = rig.outbound_rx.try_recv() {
        rig.companion.handle_raw(&raw, now);
    }
    if let Some(raw) = rig.companion.next_message() {
        let message = Inbound::decode(&raw).expect("companion messages decode");
        rig.coordinator.handle_inbound(message, now);
    }
    rig.coordinator.advance(now);
}

fn drain(rig: &Rig) -> Vec<UiSignal> {
    let mut out = Vec::new();
    while let Ok(signal) = rig.signals.try_recv() {
        out.push(signal);
    }
    out
}

#[test]
fn nearby_fetch_completes_end_to_end() {
    let mut rig = rig(&["1 Main St", "2 Oak St"]);
    let t0 = rig.t0;

    rig.coordinator.start_fetch(FetchKind::Nearby, t0);
    assert_eq!(rig.coordinator.phase(), FetchPhase::AwaitingReady);

    // Companion announces readiness, the 1s poll sends, and the stream lands
    // over the following iterations.
    pump(&mut rig, t0);
    let mut now = t0 + READY_POLL;
    for _ in 0..6 {
        pump(&mut rig, now);
        now += Duration::from_millis(16);
    }

    let signals = drain(&rig);
    assert!(signals.contains(&UiSignal::Progress { index: 0, expected: 2 }));
    assert!(signals.contains(&UiSignal::Complete));

    let snapshot = rig.coordinator.snapshot();
    assert_eq!(snapshot.slots[0].street, "1 Main St");
    assert_eq!(snapshot.slots[1].street, "2 Oak St");
    assert!(!rig.coordinator.is_active());
}

#[test]
fn cancel_mid_stream_quiets_the_companion() {
    let mut rig = rig(&["1 Main St", "2 Oak St"]);
    let t0 = rig.t0;

    rig.coordinator.start_fetch(FetchKind::Nearby, t0);
    pump(&mut rig, t0); // readiness announcement
    let now = t0 + READY_POLL;
    pump(&mut rig, now); // poll fires, request reaches the companion next pump
    pump(&mut rig, now); // request handled, first data part delivered
    assert!(rig.companion.pending_messages() > 0);

    rig.coordinator.cancel_active_fetch();
    pump(&mut rig, now); // quiet notice reaches the companion

    assert_eq!(rig.coordinator.phase(), FetchPhase::Idle);
    assert_eq!(rig.companion.pending_messages(), 0);
    assert!(rig.companion.next_message().is_none());
}

#[test]
fn empty_dataset_surfaces_the_backend_error() {
    let mut rig = rig(&[]);
    let t0 = rig.t0;

    rig.coordinator.start_fetch(FetchKind::Nearby, t0);
    pump(&mut rig, t0);
    let now = t0 + READY_POLL;
    for _ in 0..3 {
        pump(&mut rig, now);
    }

    let signals = drain(&rig);
    assert!(signals.contains(&UiSignal::Error("No locations found!".to_string())));
    assert_eq!(rig.coordinator.phase(), FetchPhase::Error);
}

#[test]
fn silent_companion_times_out() {
    let mut rig = rig(&["1 Main St"]);
    let t0 = rig.t0;

    rig.coordinator.start_fetch(FetchKind::Nearby, t0);
    pump(&mut rig, t0);
    let sent_at = t0 + READY_POLL;
    pump(&mut rig, sent_at); // request sent; drop it instead of forwarding
    while rig.outbound_rx.try_recv().is_ok() {}
    while rig.companion.next_message().is_some() {}

    rig.coordinator.advance(sent_at + Duration::from_secs(40));

    let signals = drain(&rig);
    assert!(signals.contains(&UiSignal::Timeout));
    assert_eq!(rig.coordinator.phase(), FetchPhase::TimedOut);
}
