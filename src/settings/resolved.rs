use std::path::PathBuf;

/// Validated application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub markers_path: PathBuf,
    /// `(latitude, longitude)` for nearby lookups, when configured.
    pub position: Option<(f64, f64)>,
    /// Up to five saved street addresses.
    pub saved_slots: Vec<String>,
}

impl Settings {
    pub fn print_summary(&self) {
        println!("markers: {}", self.markers_path.display());
        match self.position {
            Some((latitude, longitude)) => println!("position: {latitude}, {longitude}"),
            None => println!("position: unset"),
        }
        let filled = self
            .saved_slots
            .iter()
            .filter(|slot| !slot.trim().is_empty())
            .count();
        println!("saved slots: {filled} filled");
    }
}
