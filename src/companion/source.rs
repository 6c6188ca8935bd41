use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use super::markers::MarkerSet;

/// Reuse a loaded dataset for this long before going back to the source.
pub const CACHE_MAX_AGE: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read marker data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse marker data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the companion gets its marker dataset from.
///
/// The upstream deployment pulls `markers.json` over HTTPS; this seam keeps
/// the responder independent of how the bytes arrive.
pub trait MarkerSource {
    fn load(&mut self, now: Instant) -> Result<MarkerSet, SourceError>;
}

/// File-backed source with the upstream's sixty-second cache policy.
#[derive(Debug)]
pub struct FileMarkerSource {
    path: PathBuf,
    cache: Option<(Instant, MarkerSet)>,
}

impl FileMarkerSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }
}

impl MarkerSource for FileMarkerSource {
    fn load(&mut self, now: Instant) -> Result<MarkerSet, SourceError> {
        if let Some((loaded_at, set)) = &self.cache {
            if now.duration_since(*loaded_at) < CACHE_MAX_AGE {
                debug!("serving markers from cache");
                return Ok(set.clone());
            }
        }
        let raw = fs::read_to_string(&self.path)?;
        let set: MarkerSet = serde_json::from_str(&raw)?;
        self.cache = Some((now, set.clone()));
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_markers(dir: &tempfile::TempDir, street: &str) -> PathBuf {
        let path = dir.path().join("markers.json");
        let mut file = fs::File::create(&path).expect("create markers file");
        write!(
            file,
            r#"{{"features": [{{"geometry": {{"coordinates": [0, 0]}},
                "properties": {{"street": "{street}"}}}}]}}"#
        )
        .expect("write markers file");
        path
    }

    #[test]
    fn loads_and_caches_for_a_minute() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_markers(&dir, "Main St");
        let mut source = FileMarkerSource::new(&path);

        let t0 = Instant::now();
        let set = source.load(t0).expect("first load");
        assert_eq!(set.features[0].properties.street, "Main St");

        // Rewrite the file; within the cache window the old data is served.
        write_markers(&dir, "Oak St");
        let cached = source.load(t0 + Duration::from_secs(30)).expect("cached load");
        assert_eq!(cached.features[0].properties.street, "Main St");

        let fresh = source.load(t0 + CACHE_MAX_AGE).expect("fresh load");
        assert_eq!(fresh.features[0].properties.street, "Oak St");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut source = FileMarkerSource::new("/nonexistent/markers.json");
        let result = source.load(Instant::now());
        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("markers.json");
        fs::write(&path, "not json").expect("write file");
        let mut source = FileMarkerSource::new(&path);
        assert!(matches!(source.load(Instant::now()), Err(SourceError::Json(_))));
    }
}
