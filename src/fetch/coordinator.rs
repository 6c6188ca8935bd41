use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::signals::{SignalSink, UiSignal};
use super::slots::{MachineStatus, ResultSlot, ResultSlots};
use super::timers::{HAPTIC_DELAY, READY_POLL, TIMEOUT, TimerKind, Timers, WAITING_TICK};
use crate::transport::{Inbound, Outbound, Transport};

/// How many 1-second readiness polls run before the request is sent anyway.
pub const READY_RETRY_BUDGET: u8 = 5;

/// Correlation ids are drawn from this range; zero is reserved for "no
/// active request".
pub const ID_RANGE_START: u16 = 67;
pub const ID_RANGE_END: u16 = 17033;

pub const SEND_FAILED_TEXT: &str = "Failed to send request.";

const NO_ACTIVE_ID: u16 = 0;

/// Which backend query to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchKind {
    Nearby,
    Saved,
}

/// Lifecycle of the single in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    Idle,
    AwaitingReady,
    Sent,
    Error,
    TimedOut,
}

/// Read-only view of the coordinator's state for rendering.
#[derive(Debug, Clone)]
pub struct FetchSnapshot {
    pub phase: FetchPhase,
    pub expected: u8,
    pub slots: Vec<ResultSlot>,
}

/// Owns one in-flight request's identity, collects its streamed multi-part
/// result, and drives the timeout / waiting / readiness timers to a terminal
/// outcome.
///
/// Single-threaded and cooperative: every handler runs to completion, and
/// each one re-checks that the fetch is still active and the correlation id
/// still matches before touching state, so a late timer fire and a late
/// transport event can settle in either order.
pub struct FetchCoordinator<T: Transport> {
    transport: T,
    signals: SignalSink,
    phase: FetchPhase,
    correlation_id: u16,
    kind: Option<FetchKind>,
    slots: ResultSlots,
    timers: Timers,
    ready: bool,
    retry_count: u8,
    received_any: bool,
    dots: u8,
}

impl<T: Transport> FetchCoordinator<T> {
    pub fn new(transport: T, signals: SignalSink) -> Self {
        Self {
            transport,
            signals,
            phase: FetchPhase::Idle,
            correlation_id: NO_ACTIVE_ID,
            kind: None,
            slots: ResultSlots::default(),
            timers: Timers::default(),
            ready: false,
            retry_count: 0,
            received_any: false,
            dots: 0,
        }
    }

    /// Begin a fetch, discarding whatever was in flight before.
    ///
    /// Clears every slot, generates a fresh non-zero correlation id, and
    /// either sends immediately (link confirmed ready) or starts the bounded
    /// readiness poll.
    pub fn start_fetch(&mut self, kind: FetchKind, now: Instant) {
        self.timers.cancel_all();
        self.slots.reset();
        self.kind = Some(kind);
        self.correlation_id = rand::thread_rng().gen_range(ID_RANGE_START..=ID_RANGE_END);
        self.retry_count = 0;
        self.received_any = false;
        self.dots = 0;

        self.timers.schedule(TimerKind::WaitingTick, now + WAITING_TICK);
        self.timers.schedule(TimerKind::Haptic, now + HAPTIC_DELAY);

        if self.ready {
            self.send_request(now);
        } else {
            self.phase = FetchPhase::AwaitingReady;
            self.timers.schedule(TimerKind::ReadyPoll, now + READY_POLL);
            debug!(id = self.correlation_id, "link not ready, polling");
        }
    }

    /// Refresh action: restart the previous fetch kind, but only when nothing
    /// is in flight and the link has confirmed readiness.
    pub fn retry_if_ready(&mut self, now: Instant) {
        if self.is_active() || !self.ready {
            return;
        }
        if let Some(kind) = self.kind {
            self.start_fetch(kind, now);
        }
    }

    /// Tear-down path: the loading view was dismissed before completion.
    ///
    /// Cancels all timers, tells the companion (fire-and-forget) to stop
    /// streaming for the superseded id, and returns to idle.
    pub fn cancel_active_fetch(&mut self) {
        self.timers.cancel_all();
        if self.is_active() {
            let _ = self.transport.send(Outbound::Quiet {
                correlation_id: self.correlation_id,
            });
        }
        self.phase = FetchPhase::Idle;
        self.correlation_id = NO_ACTIVE_ID;
        self.dots = 0;
    }

    /// Dispatch one decoded transport event.
    pub fn handle_inbound(&mut self, message: Inbound, now: Instant) {
        match message {
            Inbound::Ready => {
                // Readiness alone never triggers a send; the poll does.
                self.ready = true;
            }
            Inbound::Data {
                correlation_id,
                index,
                expected_total,
                street,
                city,
                last_checked,
                status,
            } => self.on_partial_result(
                correlation_id,
                index,
                expected_total,
                &street,
                &city,
                &last_checked,
                &status,
                now,
            ),
            Inbound::Error {
                correlation_id,
                text,
            } => self.on_backend_error(correlation_id, text),
        }
    }

    /// The send itself failed. There is no correlation id to check: the
    /// failure is about the outgoing request, not a response.
    pub fn on_send_failure(&mut self) {
        self.timers.cancel_all();
        self.phase = FetchPhase::Error;
        self.ready = false;
        self.signals.emit(UiSignal::Error(SEND_FAILED_TEXT.to_string()));
    }

    /// Fire every timer whose deadline has passed.
    pub fn advance(&mut self, now: Instant) {
        while let Some(kind) = self.timers.pop_due(now) {
            match kind {
                TimerKind::Timeout => self.on_timeout(),
                TimerKind::WaitingTick => self.on_waiting_tick(now),
                TimerKind::Haptic => {
                    if self.is_active() {
                        self.signals.emit(UiSignal::HapticPulse);
                    }
                }
                TimerKind::ReadyPoll => self.on_ready_poll(now),
            }
        }
    }

    /// Earliest pending timer deadline, for event-loop scheduling.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, FetchPhase::AwaitingReady | FetchPhase::Sent)
    }

    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Id of the in-flight fetch, or zero when none is active.
    #[must_use]
    pub fn correlation_id(&self) -> u16 {
        self.correlation_id
    }

    #[must_use]
    pub fn snapshot(&self) -> FetchSnapshot {
        FetchSnapshot {
            phase: self.phase,
            expected: self.slots.expected(),
            slots: self.slots.as_slice().to_vec(),
        }
    }

    fn send_request(&mut self, now: Instant) {
        let Some(kind) = self.kind else {
            return;
        };
        let request = Outbound::Request {
            correlation_id: self.correlation_id,
            kind,
        };
        match self.transport.send(request) {
            Ok(()) => {
                self.phase = FetchPhase::Sent;
                self.timers.schedule(TimerKind::Timeout, now + TIMEOUT);
            }
            Err(err) => {
                warn!(id = self.correlation_id, error = %err, "request send failed");
                self.on_send_failure();
            }
        }
    }

    fn on_ready_poll(&mut self, now: Instant) {
        if self.phase != FetchPhase::AwaitingReady {
            return;
        }
        if self.ready {
            self.send_request(now);
            return;
        }
        self.retry_count += 1;
        if self.retry_count >= READY_RETRY_BUDGET {
            // Budget exhausted: try once more for real instead of failing.
            debug!(id = self.correlation_id, "readiness unconfirmed, sending anyway");
            self.send_request(now);
        } else {
            self.timers.schedule(TimerKind::ReadyPoll, now + READY_POLL);
        }
    }

    fn on_waiting_tick(&mut self, now: Instant) {
        if !self.is_active() {
            return;
        }
        self.dots = (self.dots + 1) % 4;
        self.signals.emit(UiSignal::WaitingTick { dots: self.dots });
        self.timers.schedule(TimerKind::WaitingTick, now + WAITING_TICK);
    }

    #[allow(clippy::too_many_arguments)]
    fn on_partial_result(
        &mut self,
        correlation_id: u16,
        index: u8,
        expected_total: u8,
        street: &str,
        city: &str,
        last_checked: &str,
        status: &str,
        _now: Instant,
    ) {
        if !self.is_active() || correlation_id != self.correlation_id {
            debug!(got = correlation_id, want = self.correlation_id, "stale data dropped");
            return;
        }

        // A data message proves the link end-to-end.
        self.ready = true;

        if !self.received_any {
            self.received_any = true;
            self.timers.cancel(TimerKind::Timeout);
            self.timers.cancel(TimerKind::WaitingTick);
        }

        self.slots.set_expected(expected_total);
        if !self.slots.store(index, street, city, last_checked, MachineStatus::from_wire(status)) {
            debug!(index, "result index out of range, dropped");
            return;
        }

        self.signals.emit(UiSignal::Progress {
            index,
            expected: self.slots.expected(),
        });

        if self.slots.expected() > 0 && self.slots.fully_populated() {
            self.timers.cancel_all();
            self.phase = FetchPhase::Idle;
            self.signals.emit(UiSignal::Complete);
        }
    }

    fn on_backend_error(&mut self, correlation_id: u16, text: String) {
        if !self.is_active() || correlation_id != self.correlation_id {
            debug!(got = correlation_id, "stale error dropped");
            return;
        }
        self.ready = true;
        self.timers.cancel_all();
        self.phase = FetchPhase::Error;
        self.signals.emit(UiSignal::Error(text));
    }

    fn on_timeout(&mut self) {
        if !self.is_active() {
            return;
        }
        self.timers.cancel_all();
        self.phase = FetchPhase::TimedOut;
        self.signals.emit(UiSignal::Timeout);
        self.signals.emit(UiSignal::HapticPulse);
        // Best-effort quiet notice so the companion stops streaming for the
        // now-superseded id; delivery is not guaranteed.
        let _ = self.transport.send(Outbound::Quiet {
            correlation_id: self.correlation_id,
        });
    }
}
