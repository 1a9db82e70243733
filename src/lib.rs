//! Region Atlas core: view state and transform control for the region map.
//!
//! The library holds everything that is independent of a rendering surface:
//! - `config`: tunable ranges, durations and visibility thresholds
//! - `data`: region/facility records, normalization and derived lists
//! - `geo`: the pan/zoom transform engine and the visibility policy
//! - `state`: the interaction state machine and the view model that owns it
//!
//! The egui render layer lives in the binary target and talks to the core
//! only through `state::Message` and the read accessors on `AppViewModel`.

pub mod config;
pub mod data;
pub mod geo;
pub mod state;

pub use config::AtlasConfig;
pub use state::{AppViewModel, Message};
