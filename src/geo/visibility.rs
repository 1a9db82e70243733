//! Scale-driven visibility of map elements.

use crate::config::VisibilityConfig;

/// Facility text labels are switched off; markers carry no text at any zoom.
pub const FACILITY_LABELS_ENABLED: bool = false;

/// Vertical label offset at scale 1, in world units above the marker.
const FACILITY_LABEL_OFFSET: f64 = 6.0;

/// What the render layer should draw at the current scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub show_region_labels: bool,
    pub show_facility_markers: bool,
    pub show_facility_labels: bool,
    /// Facility marker radius in world units.
    pub marker_radius: f64,
    /// Facility label offset in world units (negative is up).
    pub label_offset_y: f64,
}

impl Visibility {
    /// Region labels while zoomed out, facility markers once zoomed in, and
    /// markers that shrink with zoom down to a floor.
    pub fn at_scale(scale: f64, config: &VisibilityConfig) -> Self {
        let effective = if scale > 0.0 { scale } else { 1.0 };

        Self {
            show_region_labels: scale < config.region_label_max_scale,
            show_facility_markers: scale > config.facility_marker_min_scale,
            show_facility_labels: FACILITY_LABELS_ENABLED,
            marker_radius: (config.marker_base_radius / effective).max(config.marker_min_radius),
            label_offset_y: -(FACILITY_LABEL_OFFSET / effective),
        }
    }
}
