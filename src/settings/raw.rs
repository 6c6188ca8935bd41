use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Deserialize;

use mcfetch::fetch::MAX_RESULTS;

use super::resolved::Settings;
use crate::cli::CliArgs;

/// Settings exactly as deserialized from the layered sources, before
/// validation.
#[derive(Debug, Default, Deserialize)]
pub struct RawSettings {
    /// Path to the marker dataset the companion serves from.
    pub markers: Option<PathBuf>,
    /// Position used for nearby lookups.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Saved street addresses, matched against marker streets.
    #[serde(default)]
    pub saved: Vec<String>,
}

impl RawSettings {
    /// Command-line arguments win over file and environment values.
    pub fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = &cli.markers {
            self.markers = Some(path.clone());
        }
        if let Some(latitude) = cli.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = cli.longitude {
            self.longitude = Some(longitude);
        }
    }

    pub fn resolve(self) -> Result<Settings> {
        let Some(markers_path) = self.markers else {
            bail!("no marker dataset configured; set `markers` in the config file or pass --markers");
        };

        let position = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some((latitude, longitude)),
            (None, None) => None,
            _ => bail!("latitude and longitude must be configured together"),
        };

        let mut saved_slots = self.saved;
        saved_slots.truncate(MAX_RESULTS);

        Ok(Settings {
            markers_path,
            position,
            saved_slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_requires_a_marker_dataset() {
        let raw = RawSettings::default();
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn resolve_rejects_half_a_position() {
        let raw = RawSettings {
            markers: Some(PathBuf::from("markers.json")),
            latitude: Some(41.9),
            ..RawSettings::default()
        };
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn resolve_caps_saved_slots() {
        let raw = RawSettings {
            markers: Some(PathBuf::from("markers.json")),
            saved: (0..8).map(|i| format!("street {i}")).collect(),
            ..RawSettings::default()
        };
        let settings = raw.resolve().expect("valid settings");
        assert_eq!(settings.saved_slots.len(), MAX_RESULTS);
        assert!(settings.position.is_none());
    }
}
