use serde::Serialize;

/// Maximum number of restaurant results a single fetch can carry.
pub const MAX_RESULTS: usize = 5;

/// Display-field capacities, in characters. Longer wire values are truncated
/// silently; fixed-width display fields rely on this.
pub const STREET_CAPACITY: usize = 84;
pub const CITY_CAPACITY: usize = 19;
pub const LAST_CHECKED_CAPACITY: usize = 39;

/// Operational state of a soft-serve machine.
///
/// The wire carries a short free-form word; anything outside the known
/// vocabulary collapses to [`MachineStatus::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Working,
    Broken,
    #[default]
    Unknown,
}

impl MachineStatus {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "working" => Self::Working,
            "broken" => Self::Broken,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::Broken => "broken",
            Self::Unknown => "unknown",
        }
    }
}

/// One restaurant's result record within a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSlot {
    pub street: String,
    pub city: String,
    pub last_checked: String,
    pub status: MachineStatus,
    pub populated: bool,
}

/// Fixed-size slot storage for a single fetch's streamed response.
///
/// Slots are only ever mutated through [`ResultSlots::store`]; the expected
/// count is clamped to [`MAX_RESULTS`] and an out-of-range index leaves every
/// slot untouched.
#[derive(Debug, Clone, Default)]
pub struct ResultSlots {
    slots: [ResultSlot; MAX_RESULTS],
    expected: u8,
}

impl ResultSlots {
    /// Clear every slot and the expected count ahead of a new fetch.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = ResultSlot::default();
        }
        self.expected = 0;
    }

    /// Record how many results the backend intends to stream, clamped.
    pub fn set_expected(&mut self, expected_total: u8) {
        self.expected = expected_total.min(MAX_RESULTS as u8);
    }

    #[must_use]
    pub fn expected(&self) -> u8 {
        self.expected
    }

    /// Store one streamed result. Returns `false` when `index` is out of
    /// range, in which case nothing changes.
    pub fn store(
        &mut self,
        index: u8,
        street: &str,
        city: &str,
        last_checked: &str,
        status: MachineStatus,
    ) -> bool {
        let Some(slot) = self.slots.get_mut(usize::from(index)) else {
            return false;
        };
        slot.street = truncate_chars(street, STREET_CAPACITY);
        slot.city = truncate_chars(city, CITY_CAPACITY);
        slot.last_checked = truncate_chars(last_checked, LAST_CHECKED_CAPACITY);
        slot.status = status;
        slot.populated = true;
        true
    }

    /// Completion test: every slot below the expected count is populated.
    #[must_use]
    pub fn fully_populated(&self) -> bool {
        self.slots
            .iter()
            .take(usize::from(self.expected))
            .all(|slot| slot.populated)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ResultSlot] {
        &self.slots
    }
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
