use super::markers::{Feature, MarkerSet};
use crate::fetch::MAX_RESULTS;

/// Nearby search radius: five miles, in kilometres.
pub const NEARBY_RADIUS_KM: f64 = 8.046_72;

/// Saved-slot entries shorter than this never match, to keep a stray couple
/// of characters from latching onto an arbitrary street.
pub const MIN_SLOT_MATCH_LEN: usize = 4;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two `(latitude, longitude)` points.
#[must_use]
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let d_lat = (b.0 - a.0).to_radians();
    let d_lon = (b.1 - a.1).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.0.to_radians().cos() * b.0.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// The closest markers within the radius, nearest first, at most five.
#[must_use]
pub fn select_nearby(set: &MarkerSet, position: (f64, f64)) -> Vec<Feature> {
    let mut ranked: Vec<(f64, &Feature)> = set
        .features
        .iter()
        .map(|feature| {
            let [lon, lat] = feature.geometry.coordinates;
            (haversine_km(position, (lat, lon)), feature)
        })
        .filter(|(distance, _)| *distance <= NEARBY_RADIUS_KM)
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, feature)| feature.clone())
        .collect()
}

/// One result per saved slot: the first marker whose street contains the
/// slot text (case-insensitive), or the not-found placeholder. Empty slots
/// are skipped entirely.
#[must_use]
pub fn select_saved(set: &MarkerSet, slots: &[String]) -> Vec<Feature> {
    let mut results = Vec::new();
    for slot in slots {
        let needle = slot.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        let matched = if needle.chars().count() >= MIN_SLOT_MATCH_LEN {
            set.features
                .iter()
                .find(|feature| feature.properties.street.trim().to_lowercase().contains(&needle))
        } else {
            None
        };
        match matched {
            Some(feature) => results.push(feature.clone()),
            None => results.push(Feature::not_found_placeholder()),
        }
    }
    results.truncate(MAX_RESULTS);
    results
}
