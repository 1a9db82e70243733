//! Application state management.
//!
//! The interaction state machine decides which detail view is showing; the
//! view model owns it together with the geometry engine and routes queued
//! messages to both.

mod interaction;
pub mod schedule;
mod view_model;

pub use interaction::{Effect, InteractionState, ModalState, TransitionFlags};
pub use schedule::{Debouncer, Deferred, Millis};
pub use view_model::{AppViewModel, FacilityDetail, Message, RegionDetail, NOT_SPECIFIED};
