use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use mcfetch::companion::{Companion, FileMarkerSource};
use mcfetch::fetch::{FetchCoordinator, FetchKind, ResultSlot, SignalSink, UiSignal};
use mcfetch::transport::{ChannelTransport, Inbound, channel};

use crate::settings::Settings;

const PUMP_INTERVAL: Duration = Duration::from_millis(16);

/// Terminal result of one fetch, for printing.
#[derive(Debug, Serialize)]
pub struct FetchOutcome {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub machines: Vec<ResultSlot>,
}

/// Runs one fetch to a terminal outcome, with the companion responder wired
/// in-process over the channel transport.
pub struct FetchWorkflow {
    settings: Settings,
    kind: FetchKind,
}

impl FetchWorkflow {
    pub fn new(settings: Settings, kind: FetchKind) -> Self {
        Self { settings, kind }
    }

    /// Pump the coordinator and companion until the fetch settles.
    pub fn run(self) -> Result<FetchOutcome> {
        let (transport, outbound_rx) = channel();
        let (signal_tx, signal_rx) = mpsc::channel();
        let mut coordinator = FetchCoordinator::new(transport, SignalSink::new(signal_tx));
        let mut companion = Companion::new(
            FileMarkerSource::new(&self.settings.markers_path),
            self.settings.position,
            self.settings.saved_slots.clone(),
        );

        coordinator.start_fetch(self.kind, Instant::now());

        loop {
            let now = Instant::now();

            while let Ok(raw) = outbound_rx.try_recv() {
                companion.handle_raw(&raw, now);
            }

            // One companion message per iteration, so a cancellation can
            // land between parts of a stream.
            if let Some(raw) = companion.next_message() {
                match Inbound::decode(&raw) {
                    Ok(message) => coordinator.handle_inbound(message, now),
                    Err(err) => debug!(error = %err, "undecodable companion message dropped"),
                }
            }

            coordinator.advance(now);

            while let Ok(signal) = signal_rx.try_recv() {
                match signal {
                    UiSignal::Progress { index, expected } => {
                        info!("received {} of {}", index + 1, expected);
                    }
                    UiSignal::Complete => {
                        return Ok(outcome(&coordinator, "complete", None));
                    }
                    UiSignal::Error(text) => {
                        return Ok(outcome(&coordinator, "error", Some(text)));
                    }
                    UiSignal::Timeout => {
                        return Ok(outcome(
                            &coordinator,
                            "timed_out",
                            Some("No response from the companion.".to_string()),
                        ));
                    }
                    UiSignal::WaitingTick { dots } => debug!(dots, "waiting"),
                    UiSignal::HapticPulse => debug!("haptic pulse"),
                }
            }

            thread::sleep(PUMP_INTERVAL);
        }
    }
}

fn outcome(
    coordinator: &FetchCoordinator<ChannelTransport>,
    status: &str,
    message: Option<String>,
) -> FetchOutcome {
    let snapshot = coordinator.snapshot();
    FetchOutcome {
        status: status.to_string(),
        message,
        machines: snapshot
            .slots
            .into_iter()
            .filter(|slot| slot.populated)
            .collect(),
    }
}
