//! Region dataset loading and lazy normalization.

use super::normalize::normalize;
use super::region::{RawRegion, Region};
use std::cell::OnceCell;
use std::path::Path;

/// Bundled sample dataset.
static BUNDLED_REGIONS: &str = include_str!("../../assets/regions.json");

/// Errors that can occur while loading a region dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// The dataset file could not be read.
    Io(String),
    /// The dataset is not a JSON array of region records.
    Parse(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(msg) => write!(f, "Failed to read dataset: {}", msg),
            DatasetError::Parse(msg) => write!(f, "Failed to parse dataset: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {}

/// Parses a JSON array of raw region records.
pub fn parse_regions(json: &str) -> Result<Vec<RawRegion>, DatasetError> {
    serde_json::from_str(json).map_err(|e| DatasetError::Parse(e.to_string()))
}

/// Raw region records plus their normalized forms, computed on first access.
#[derive(Debug, Default)]
pub struct RegionStore {
    raw: Vec<RawRegion>,
    normalized: Vec<OnceCell<Region>>,
}

impl RegionStore {
    /// Environment variable naming an optional JSON dataset file.
    pub const ENV_VAR: &'static str = "ATLAS_REGIONS";

    pub fn from_raw(raw: Vec<RawRegion>) -> Self {
        for (i, region) in raw.iter().enumerate() {
            if raw[..i].iter().any(|other| other.id == region.id) {
                log::warn!("Duplicate region id {} ({})", region.id, region.name);
            }
        }

        let normalized = raw.iter().map(|_| OnceCell::new()).collect();
        Self { raw, normalized }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let raw = parse_regions(json)?;
        log::info!("Loaded {} regions", raw.len());
        Ok(Self::from_raw(raw))
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| DatasetError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Loads `path` when given, falling back to the bundled dataset when it
    /// is absent or unusable.
    pub fn load_or_bundled(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::bundled();
        };
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Failed to load regions, using bundled dataset: {}", e);
                Self::bundled()
            }
        }
    }

    /// Loads the file named by `ATLAS_REGIONS`, or the bundled dataset.
    pub fn from_env() -> Self {
        let path = std::env::var_os(Self::ENV_VAR);
        Self::load_or_bundled(path.as_deref().map(Path::new))
    }

    /// The dataset compiled into the binary. Empty if it fails to parse.
    pub fn bundled() -> Self {
        match Self::from_json_str(BUNDLED_REGIONS) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Bundled dataset unusable: {}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Normalized region at `index`.
    pub fn get(&self, index: usize) -> Option<&Region> {
        let raw = self.raw.get(index)?;
        Some(self.normalized[index].get_or_init(|| normalize(raw)))
    }

    /// Normalized region by identifier.
    pub fn find(&self, id: &str) -> Option<&Region> {
        let index = self.raw.iter().position(|r| r.id == id)?;
        self.get(index)
    }

    /// All normalized regions in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        (0..self.raw.len()).filter_map(move |i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{total_facilities, Point, FALLBACK_CENTER};

    const SAMPLE: &str = r#"[
        {"plaka": "06", "ilismi": "Ankara", "d": "M0,0 L10,0 L10,10 Z"},
        {"id": "35", "name": "İzmir", "center": {"x": 80.0, "y": 170.0},
         "institutions": {"okullar": [
            {"name": "Konak Lisesi", "position": {"x": 81.0, "y": 171.0}, "address": "Konak"}
         ]}}
    ]"#;

    #[test]
    fn test_parse_and_lookup() {
        let store = RegionStore::from_json_str(SAMPLE).unwrap();
        assert_eq!(store.len(), 2);

        let ankara = store.find("06").unwrap();
        assert_eq!(ankara.center, FALLBACK_CENTER);
        assert_eq!(total_facilities(ankara), 10);

        let izmir = store.find("35").unwrap();
        assert_eq!(izmir.center, Point { x: 80.0, y: 170.0 });
        assert_eq!(total_facilities(izmir), 1);

        assert!(store.find("01").is_none());
        assert!(store.get(5).is_none());
    }

    #[test]
    fn test_normalization_is_cached() {
        let store = RegionStore::from_json_str(SAMPLE).unwrap();
        let first = store.get(0).unwrap() as *const Region;
        let second = store.get(0).unwrap() as *const Region;
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_error() {
        let err = RegionStore::from_json_str(r#"{"id": "06"}"#).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse dataset"));
    }

    #[test]
    fn test_missing_file() {
        let err = RegionStore::load(Path::new("/nonexistent/regions.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let store = RegionStore::bundled();
        assert!(!store.is_empty());
        assert_eq!(store.iter().count(), store.len());
        assert!(store.find("06").is_some());
    }

    #[test]
    fn test_load_or_bundled() {
        let bundled = RegionStore::bundled().len();
        assert_eq!(RegionStore::load_or_bundled(None).len(), bundled);
        assert_eq!(
            RegionStore::load_or_bundled(Some(Path::new("/nonexistent/regions.json"))).len(),
            bundled
        );

        let name = format!("atlas-regions-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, SAMPLE).unwrap();
        let store = RegionStore::load_or_bundled(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.find("34").is_none());
    }
}
