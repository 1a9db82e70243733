//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across the map and the detail
//! views.

use eframe::egui::Color32;
use region_atlas::data::CategoryKind;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(110, 110, 120);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(170, 170, 180);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
    /// Placeholder text for missing fields.
    pub const PLACEHOLDER: Color32 = Color32::from_rgb(120, 120, 130);
}

/// Colors for the map surface.
pub mod map {
    use super::Color32;

    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 22, 35);
    /// Logical surface behind the regions.
    pub const SURFACE: Color32 = Color32::from_rgb(28, 32, 48);
    pub const REGION_FILL: Color32 = Color32::from_rgb(52, 70, 96);
    pub const REGION_HOVER: Color32 = Color32::from_rgb(72, 98, 134);
    pub const REGION_SELECTED: Color32 = Color32::from_rgb(90, 130, 180);
    pub const REGION_STROKE: Color32 = Color32::from_rgb(150, 170, 200);
    pub const REGION_LABEL: Color32 = Color32::from_rgb(225, 230, 240);
    /// Facility count badge.
    pub const BADGE: Color32 = Color32::from_rgb(230, 120, 60);
    /// Dimming overlay while a detail view is open.
    pub const OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 90);
}

/// Colors for facility categories.
pub mod category {
    use super::Color32;

    pub const UNIVERSITY: Color32 = Color32::from_rgb(100, 180, 255);
    pub const SCHOOL: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ASSOCIATION: Color32 = Color32::from_rgb(255, 180, 50);
    pub const OTHER: Color32 = Color32::from_rgb(190, 150, 230);
}

/// Marker color for a category kind.
pub fn category_color(kind: CategoryKind) -> Color32 {
    match kind {
        CategoryKind::Universities => category::UNIVERSITY,
        CategoryKind::Schools => category::SCHOOL,
        CategoryKind::Associations => category::ASSOCIATION,
        CategoryKind::Other => category::OTHER,
    }
}
