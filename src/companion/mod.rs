//! Phone-side responder: answers the watch's fetch requests from a marker
//! dataset, streaming one result message at a time under the request's
//! correlation id.

mod markers;
mod select;
mod source;

pub use markers::{Feature, Geometry, MarkerSet, Properties};
pub use select::{MIN_SLOT_MATCH_LEN, NEARBY_RADIUS_KM, haversine_km, select_nearby, select_saved};
pub use source::{CACHE_MAX_AGE, FileMarkerSource, MarkerSource, SourceError};

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, warn};

use crate::fetch::FetchKind;
use crate::transport::{Inbound, Outbound};

pub const ERR_NO_LOC_SAVED: &str = "No locations saved!";
pub const ERR_NO_LOC_FOUND: &str = "No locations found!";
pub const ERR_NO_GPS: &str = "Could not get location.";
pub const ERR_COULD_NOT_CONNECT: &str = "Could not connect to mcbroken.";
pub const ERR_JSON: &str = "McJSON Syntax Error.";

/// The companion device's request handler.
///
/// Holds at most one pending response stream; a new request replaces it and a
/// quiet notice discards it, so a superseded fetch never receives another
/// message.
pub struct Companion<S: MarkerSource> {
    source: S,
    position: Option<(f64, f64)>,
    saved_slots: Vec<String>,
    active_id: u16,
    outbox: VecDeque<Inbound>,
}

impl<S: MarkerSource> Companion<S> {
    /// Build a responder. The readiness announcement is queued immediately,
    /// mirroring the companion app announcing itself once it has launched.
    pub fn new(source: S, position: Option<(f64, f64)>, saved_slots: Vec<String>) -> Self {
        let mut outbox = VecDeque::new();
        outbox.push_back(Inbound::Ready);
        Self {
            source,
            position,
            saved_slots,
            active_id: 0,
            outbox,
        }
    }

    /// Handle one raw message off the channel. Undecodable input is dropped.
    pub fn handle_raw(&mut self, raw: &str, now: Instant) {
        match Outbound::decode(raw) {
            Ok(message) => self.handle(message, now),
            Err(err) => warn!(error = %err, "undecodable watch message dropped"),
        }
    }

    pub fn handle(&mut self, message: Outbound, now: Instant) {
        match message {
            Outbound::Request {
                correlation_id,
                kind,
            } => {
                self.outbox.clear();
                self.active_id = correlation_id;
                self.respond(kind, now);
            }
            Outbound::Quiet { correlation_id } => {
                debug!(id = correlation_id, "quiet notice, dropping pending stream");
                self.active_id = 0;
                self.outbox.clear();
            }
        }
    }

    /// Pop the next pending message, encoded for the channel. Streaming one
    /// message per pump iteration lets a quiet notice land mid-stream.
    pub fn next_message(&mut self) -> Option<String> {
        let message = self.outbox.pop_front()?;
        match message.encode() {
            Ok(raw) => Some(raw),
            Err(err) => {
                warn!(error = %err, "dropping unencodable message");
                None
            }
        }
    }

    #[must_use]
    pub fn pending_messages(&self) -> usize {
        self.outbox.len()
    }

    fn respond(&mut self, kind: FetchKind, now: Instant) {
        let set = match self.source.load(now) {
            Ok(set) => set,
            Err(err) => {
                warn!(error = %err, "marker source failed");
                let text = match err {
                    SourceError::Io(_) => ERR_COULD_NOT_CONNECT,
                    SourceError::Json(_) => ERR_JSON,
                };
                self.push_error(text);
                return;
            }
        };

        let picked = match kind {
            FetchKind::Nearby => {
                let Some(position) = self.position else {
                    self.push_error(ERR_NO_GPS);
                    return;
                };
                select_nearby(&set, position)
            }
            FetchKind::Saved => {
                if self.saved_slots.iter().all(|slot| slot.trim().is_empty()) {
                    self.push_error(ERR_NO_LOC_SAVED);
                    return;
                }
                select_saved(&set, &self.saved_slots)
            }
        };

        if picked.is_empty() {
            self.push_error(ERR_NO_LOC_FOUND);
            return;
        }

        let expected_total = picked.len() as u8;
        for (index, feature) in picked.into_iter().enumerate() {
            self.outbox.push_back(Inbound::Data {
                correlation_id: self.active_id,
                index: index as u8,
                expected_total,
                street: feature.properties.street,
                city: feature.properties.city,
                last_checked: feature.properties.last_checked,
                status: feature.properties.dot,
            });
        }
    }

    fn push_error(&mut self, text: &str) {
        self.outbox.push_back(Inbound::Error {
            correlation_id: self.active_id,
            text: text.to_string(),
        });
    }
}
