//! UI modules for the Region Atlas application.
//!
//! The UI is split into layers drawn every frame:
//! - Central canvas: region outlines, labels and facility markers
//! - Overlays: title/legend box and zoom controls
//! - Modals: region detail and facility detail
//!
//! Nothing here mutates the view model; input is pushed as `Message`s into
//! an outbox that the app sends after drawing.

mod canvas;
mod colors;
mod controls;
mod icons;
mod modals;
mod outline;
mod page;
mod projection;

pub use canvas::render_canvas;
pub use controls::{render_title, render_zoom_controls};
pub use modals::{render_facility_modal, render_region_modal};
pub use outline::{outlines_from_store, RegionOutline};
pub use page::PageScrollLock;
pub use projection::SurfaceProjection;
