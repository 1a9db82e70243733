//! Atlas configuration.
//!
//! Every range, duration and threshold the core uses is read from here so
//! the map surface is not tied to one hardcoded canvas size. Loading never
//! fails: a missing or malformed file logs a warning and yields defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pan/zoom bounds for the map surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// World-space rectangle `[[x0, y0], [x1, y1]]` that must stay reachable.
    pub translate_extent: [[f64; 2]; 2],
    /// Logical viewport size `[width, height]`.
    pub viewport: [f64; 2],
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.8,
            max_scale: 5.0,
            translate_extent: [[0.0, 0.0], [800.0, 350.0]],
            viewport: [800.0, 350.0],
        }
    }
}

impl TransformConfig {
    /// Clamps a scale into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.max(self.min_scale).min(self.max_scale)
    }

    /// Repairs invalid bounds so the engine invariants hold.
    ///
    /// Scale bounds must be finite and positive; an invalid bound is replaced
    /// by its default, and an inverted range is swapped afterwards. The
    /// viewport must be finite and positive, the extent finite.
    pub fn sanitized(mut self) -> Self {
        let defaults = TransformConfig::default();

        if !is_positive(self.min_scale) {
            log::warn!("Invalid min_scale {}, using default", self.min_scale);
            self.min_scale = defaults.min_scale;
        }
        if !is_positive(self.max_scale) {
            log::warn!("Invalid max_scale {}, using default", self.max_scale);
            self.max_scale = defaults.max_scale;
        }
        if self.max_scale < self.min_scale {
            log::warn!(
                "max_scale {} below min_scale {}, swapping",
                self.max_scale,
                self.min_scale
            );
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }

        if !self.viewport.iter().all(|v| is_positive(*v)) {
            log::warn!("Invalid viewport {:?}, using default", self.viewport);
            self.viewport = defaults.viewport;
        }

        let extent = &mut self.translate_extent;
        if !extent.iter().flatten().all(|v| v.is_finite()) {
            log::warn!("Invalid translate extent {:?}, using default", extent);
            *extent = defaults.translate_extent;
        }
        for axis in 0..2 {
            if extent[1][axis] < extent[0][axis] {
                let lo = extent[1][axis];
                extent[1][axis] = extent[0][axis];
                extent[0][axis] = lo;
            }
        }
        self
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Durations (milliseconds) and targets for programmatic transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub focus_scale: f64,
    pub focus_duration_ms: f64,
    pub reset_duration_ms: f64,
    pub intro_duration_ms: f64,
    /// Coalescing window for the observable zoom level.
    pub zoom_debounce_ms: f64,
    /// Exit animation length of either detail modal.
    pub modal_close_ms: f64,
    /// Pause between the region modal leaving and the facility modal entering.
    pub modal_open_gap_ms: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            focus_scale: 2.0,
            focus_duration_ms: 1000.0,
            reset_duration_ms: 750.0,
            intro_duration_ms: 750.0,
            zoom_debounce_ms: 100.0,
            modal_close_ms: 300.0,
            modal_open_gap_ms: 50.0,
        }
    }
}

/// Scale thresholds for the visibility policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Region labels render strictly below this scale.
    pub region_label_max_scale: f64,
    /// Facility markers render strictly above this scale.
    pub facility_marker_min_scale: f64,
    /// Marker radius at scale 1 (divided by the scale).
    pub marker_base_radius: f64,
    /// Floor for the marker radius.
    pub marker_min_radius: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            region_label_max_scale: 1.3,
            facility_marker_min_scale: 1.8,
            marker_base_radius: 4.0,
            marker_min_radius: 1.5,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub transform: TransformConfig,
    pub animation: AnimationConfig,
    pub visibility: VisibilityConfig,
}

impl AtlasConfig {
    /// Environment variable naming an optional JSON config file.
    pub const ENV_VAR: &'static str = "ATLAS_CONFIG";

    /// Parses a JSON document, falling back to defaults on error.
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<AtlasConfig>(json) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                log::warn!("Failed to parse atlas config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads a JSON config file, falling back to defaults when unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded atlas config from {}", path.display());
                Self::from_json_str(&json)
            }
            Err(e) => {
                log::warn!("Failed to read atlas config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Loads the file named by `ATLAS_CONFIG`, or returns defaults.
    pub fn from_env() -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Self::default(),
        }
    }

    fn sanitized(mut self) -> Self {
        self.transform = self.transform.sanitized();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_map_surface() {
        let config = AtlasConfig::default();
        assert_eq!(config.transform.min_scale, 0.8);
        assert_eq!(config.transform.max_scale, 5.0);
        assert_eq!(config.transform.translate_extent, [[0.0, 0.0], [800.0, 350.0]]);
        assert_eq!(config.animation.modal_close_ms, 300.0);
        assert_eq!(config.visibility.facility_marker_min_scale, 1.8);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = AtlasConfig::from_json_str(r#"{"transform": {"max_scale": 8.0}}"#);
        assert_eq!(config.transform.max_scale, 8.0);
        assert_eq!(config.transform.min_scale, 0.8);
        assert_eq!(config.animation, AnimationConfig::default());
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let config = AtlasConfig::from_json_str("{not json");
        assert_eq!(config, AtlasConfig::default());
    }

    #[test]
    fn test_inverted_scale_range_is_repaired() {
        let config =
            AtlasConfig::from_json_str(r#"{"transform": {"min_scale": 4.0, "max_scale": 2.0}}"#);
        assert_eq!(config.transform.min_scale, 2.0);
        assert_eq!(config.transform.max_scale, 4.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = AtlasConfig::load(Path::new("/nonexistent/atlas.json"));
        assert_eq!(config, AtlasConfig::default());
    }

    #[test]
    fn test_clamp_scale() {
        let t = TransformConfig::default();
        assert_eq!(t.clamp_scale(100.0), 5.0);
        assert_eq!(t.clamp_scale(0.01), 0.8);
        assert_eq!(t.clamp_scale(f64::NAN), 0.8);
        assert_eq!(t.clamp_scale(2.5), 2.5);
    }

    #[test]
    fn test_negative_max_scale_falls_back() {
        let config = AtlasConfig::from_json_str(r#"{"transform": {"max_scale": -1.0}}"#);
        assert_eq!(config.transform.min_scale, 0.8);
        assert_eq!(config.transform.max_scale, 5.0);
    }

    #[test]
    fn test_bad_bounds_on_both_ends_stay_ordered() {
        let t = TransformConfig {
            min_scale: -2.0,
            max_scale: 0.5,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.min_scale, 0.5);
        assert_eq!(t.max_scale, 0.8);
    }

    #[test]
    fn test_degenerate_viewport_and_extent_fall_back() {
        let t = TransformConfig {
            translate_extent: [[0.0, f64::NAN], [800.0, 350.0]],
            viewport: [0.0, 350.0],
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t, TransformConfig::default());
    }

    #[test]
    fn test_clamp_scale_inverted_range_does_not_panic() {
        let t = TransformConfig {
            min_scale: 4.0,
            max_scale: 2.0,
            ..Default::default()
        };
        assert_eq!(t.clamp_scale(3.0), 2.0);
    }
}
