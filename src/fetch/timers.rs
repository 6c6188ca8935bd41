use std::time::{Duration, Instant};

/// How long to wait for any response before declaring the fetch dead.
pub const TIMEOUT: Duration = Duration::from_secs(40);
/// Cadence of the waiting-indicator tick.
pub const WAITING_TICK: Duration = Duration::from_millis(500);
/// One-shot attention nudge while a fetch is still outstanding.
pub const HAPTIC_DELAY: Duration = Duration::from_secs(5);
/// Interval between link-readiness polls.
pub const READY_POLL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Timeout,
    WaitingTick,
    Haptic,
    ReadyPoll,
}

/// Deadline registry for the coordinator's cancellable timers.
///
/// Each kind holds at most one pending deadline. Firing disarms the timer;
/// periodic behaviour is expressed by the handler rescheduling. Cancelling a
/// timer that already fired (or was never armed) is a no-op.
#[derive(Debug, Default)]
pub struct Timers {
    timeout: Option<Instant>,
    waiting: Option<Instant>,
    haptic: Option<Instant>,
    ready_poll: Option<Instant>,
}

impl Timers {
    pub fn schedule(&mut self, kind: TimerKind, at: Instant) {
        *self.slot_mut(kind) = Some(at);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn cancel_all(&mut self) {
        self.timeout = None;
        self.waiting = None;
        self.haptic = None;
        self.ready_poll = None;
    }

    /// Earliest pending deadline, if any timer is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.timeout, self.waiting, self.haptic, self.ready_poll]
            .into_iter()
            .flatten()
            .min()
    }

    /// Disarm and return the earliest timer that is due at `now`.
    ///
    /// Callers loop over this so that several deadlines falling inside one
    /// pump iteration all fire, in deadline order.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKind> {
        let mut due: Option<(Instant, TimerKind)> = None;
        for kind in [
            TimerKind::Timeout,
            TimerKind::WaitingTick,
            TimerKind::Haptic,
            TimerKind::ReadyPoll,
        ] {
            if let Some(at) = *self.slot_mut(kind) {
                if at <= now && due.is_none_or(|(earliest, _)| at < earliest) {
                    due = Some((at, kind));
                }
            }
        }
        let (_, kind) = due?;
        self.cancel(kind);
        Some(kind)
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<Instant> {
        match kind {
            TimerKind::Timeout => &mut self.timeout,
            TimerKind::WaitingTick => &mut self.waiting,
            TimerKind::Haptic => &mut self.haptic,
            TimerKind::ReadyPoll => &mut self.ready_poll,
        }
    }
}
