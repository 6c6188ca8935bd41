use std::sync::mpsc::Sender;

/// Signals streamed from the coordinator to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiSignal {
    /// A result slot was stored; `index` is 0-based within the current fetch.
    Progress { index: u8, expected: u8 },
    /// Every expected slot is populated; the fetch is finished.
    Complete,
    /// Terminal failure with user-facing text.
    Error(String),
    /// No response arrived within the timeout window.
    Timeout,
    /// Waiting-indicator tick; `dots` cycles 0 through 3.
    WaitingTick { dots: u8 },
    /// Attention nudge for the host's vibration motor.
    HapticPulse,
}

/// Handle used by the coordinator to stream signals to the presentation layer.
///
/// The receiver may be dropped while a fetch is in flight (the loading view
/// was torn down); emitting into a disconnected channel is a no-op.
#[derive(Debug, Clone)]
pub struct SignalSink {
    tx: Sender<UiSignal>,
}

impl SignalSink {
    #[must_use]
    pub fn new(tx: Sender<UiSignal>) -> Self {
        Self { tx }
    }

    pub fn emit(&self, signal: UiSignal) {
        let _ = self.tx.send(signal);
    }
}
