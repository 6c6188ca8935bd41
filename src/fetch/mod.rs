//! The fetch coordinator: correlation, streamed-result accumulation and
//! timeout recovery for the single in-flight restaurant query.

mod coordinator;
mod signals;
mod slots;
mod timers;

pub use coordinator::{
    FetchCoordinator, FetchKind, FetchPhase, FetchSnapshot, ID_RANGE_END, ID_RANGE_START,
    READY_RETRY_BUDGET, SEND_FAILED_TEXT,
};
pub use signals::{SignalSink, UiSignal};
pub use slots::{
    CITY_CAPACITY, LAST_CHECKED_CAPACITY, MAX_RESULTS, MachineStatus, ResultSlot, ResultSlots,
    STREET_CAPACITY,
};
pub use timers::{HAPTIC_DELAY, READY_POLL, TIMEOUT, TimerKind, Timers, WAITING_TICK};
