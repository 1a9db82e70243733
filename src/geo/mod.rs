//! Map surface geometry.
//!
//! This module owns the pan/zoom transform applied to the map surface and the
//! scale-driven visibility rules for what gets drawn on it.

mod engine;
mod transform;
mod visibility;

pub use engine::{GeometryEngine, GestureDelta};
pub use transform::{ease_cubic_out, ViewTransform};
pub use visibility::{Visibility, FACILITY_LABELS_ENABLED};
