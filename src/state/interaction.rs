//! Interaction state machine for the detail modals.
//!
//! Three resting states (`Idle`, `RegionOpen`, `FacilityOpen`) plus the
//! transitional flags used to sequence exit/enter animations. Transitions
//! that need to wait for an animation schedule a `Step` on a `Deferred`
//! slot; scheduling anything new supersedes the pending step, so a stale
//! completion can never land after a newer transition has started.
//!
//! Every method is total: calling one that does not apply to the current
//! state leaves the state untouched.

use super::schedule::{Deferred, Millis};
use crate::config::AnimationConfig;
use crate::data::{Facility, Point, Region};

/// Which detail view is showing.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModalState {
    #[default]
    Idle,
    RegionOpen,
    FacilityOpen,
}

impl ModalState {
    pub fn label(&self) -> &'static str {
        match self {
            ModalState::Idle => "Idle",
            ModalState::RegionOpen => "RegionOpen",
            ModalState::FacilityOpen => "FacilityOpen",
        }
    }
}

/// Transient sub-states that exist only while an animation plays.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransitionFlags {
    /// The region modal is playing its exit animation.
    pub closing_region: bool,
    /// The facility modal is playing its exit animation.
    pub closing_facility: bool,
    /// The region modal has left; the facility modal is about to enter.
    pub opening_facility: bool,
}

impl TransitionFlags {
    pub fn any(&self) -> bool {
        self.closing_region || self.closing_facility || self.opening_facility
    }
}

/// Side effects on the view transform requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Animate to center this point at the focus scale.
    FocusRegion(Point),
    /// Animate back to the identity transform.
    ResetView,
}

/// Completion steps of the animated transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Region exit finished on the way to a facility.
    RegionLeftForFacility,
    /// Gap elapsed; show the facility.
    EnterFacility,
    /// Region exit finished on the way back to the map.
    RegionClosed,
    /// Facility exit finished.
    FacilityClosed,
}

/// Owned interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    modal: ModalState,
    flags: TransitionFlags,
    selected_region: Option<Region>,
    selected_category: Option<String>,
    selected_facility: Option<Facility>,
    search_query: String,
    pending: Deferred<Step>,
    close_ms: Millis,
    open_gap_ms: Millis,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl InteractionState {
    pub fn new(animation: &AnimationConfig) -> Self {
        Self {
            modal: ModalState::Idle,
            flags: TransitionFlags::default(),
            selected_region: None,
            selected_category: None,
            selected_facility: None,
            search_query: String::new(),
            pending: Deferred::new(),
            close_ms: animation.modal_close_ms,
            open_gap_ms: animation.modal_open_gap_ms,
        }
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn flags(&self) -> TransitionFlags {
        self.flags
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.selected_region.as_ref()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn selected_facility(&self) -> Option<&Facility> {
        self.selected_facility.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Any modal showing or mid-transition. Drives background scroll
    /// suppression and the decorative overlay.
    pub fn is_modal_active(&self) -> bool {
        self.modal != ModalState::Idle || self.flags.any()
    }

    /// When the next scheduled step will fire, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.due_at()
    }

    /// Region detail is open and accepting input.
    fn region_interactive(&self) -> bool {
        self.modal == ModalState::RegionOpen && !self.flags.closing_region
    }

    /// `Idle -> RegionOpen`. Returns the focus effect for the view.
    pub fn click_region(&mut self, region: Region) -> Option<Effect> {
        if self.modal != ModalState::Idle || self.flags.any() {
            return None;
        }

        log::debug!("Opening region {} ({})", region.id, region.name);
        let center = region.center;
        self.selected_region = Some(region);
        self.selected_category = None;
        self.search_query.clear();
        self.modal = ModalState::RegionOpen;
        Some(Effect::FocusRegion(center))
    }

    /// Toggles the category filter; an unknown category is ignored.
    pub fn select_category(&mut self, category: &str) {
        if !self.region_interactive() {
            return;
        }
        let known = self
            .selected_region
            .as_ref()
            .is_some_and(|r| r.institutions.contains(category));
        if !known {
            return;
        }

        if self.selected_category.as_deref() == Some(category) {
            self.selected_category = None;
        } else {
            self.selected_category = Some(category.to_string());
        }
    }

    /// Back to "all categories".
    pub fn clear_category(&mut self) {
        if self.region_interactive() {
            self.selected_category = None;
        }
    }

    pub fn set_query(&mut self, query: String) {
        if self.region_interactive() {
            self.search_query = query;
        }
    }

    /// Opens a facility.
    ///
    /// From `RegionOpen` the region modal exits first, then after a short gap
    /// the facility modal enters; the region stays selected so closing the
    /// facility returns to it. From `Idle` the facility opens directly.
    pub fn click_facility(&mut self, facility: Facility, now: Millis) {
        if self.region_interactive() {
            log::debug!("Region closing for facility {}", facility.name);
            self.selected_facility = Some(facility);
            self.flags.closing_region = true;
            self.pending
                .schedule(Step::RegionLeftForFacility, now, self.close_ms);
        } else if self.modal == ModalState::Idle && !self.flags.any() {
            log::debug!("Opening facility {}", facility.name);
            self.selected_facility = Some(facility);
            self.modal = ModalState::FacilityOpen;
        }
    }

    /// `RegionOpen -> Idle` after the exit animation. Returns the reset
    /// effect for the view, which runs concurrently.
    pub fn close_region(&mut self, now: Millis) -> Option<Effect> {
        if self.modal != ModalState::RegionOpen {
            return None;
        }
        let closing_to_map = self.flags.closing_region && self.selected_facility.is_none();
        if closing_to_map {
            return None;
        }

        if self.selected_facility.take().is_some() {
            log::debug!("Region close superseded pending facility open");
        }
        log::debug!("Region closing");
        self.flags.closing_region = true;
        self.pending.schedule(Step::RegionClosed, now, self.close_ms);
        Some(Effect::ResetView)
    }

    /// `FacilityOpen -> RegionOpen` (region retained) or `-> Idle`.
    ///
    /// Also cancels a facility that is still waiting to enter.
    pub fn close_facility(&mut self, now: Millis) {
        let open = self.modal == ModalState::FacilityOpen && !self.flags.closing_facility;
        let entering = self.flags.opening_facility;
        if !open && !entering {
            return;
        }

        log::debug!("Facility closing");
        self.flags.opening_facility = false;
        self.flags.closing_facility = true;
        self.pending.schedule(Step::FacilityClosed, now, self.close_ms);
    }

    /// Cancel key: closes the facility view first, else the region view.
    pub fn escape(&mut self, now: Millis) -> Option<Effect> {
        if self.modal == ModalState::FacilityOpen || self.flags.opening_facility {
            self.close_facility(now);
            None
        } else if self.modal == ModalState::RegionOpen {
            self.close_region(now)
        } else {
            None
        }
    }

    /// Backdrop click; only counts when the backdrop itself was the target.
    pub fn backdrop_click(&mut self, on_backdrop: bool, now: Millis) -> Option<Effect> {
        if !on_backdrop {
            return None;
        }
        self.escape(now)
    }

    /// Fires a due transition step. Returns true if the state changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let Some(step) = self.pending.poll(now) else {
            return false;
        };

        match step {
            Step::RegionLeftForFacility => {
                self.modal = ModalState::Idle;
                self.flags.closing_region = false;
                self.flags.opening_facility = true;
                self.pending.schedule(Step::EnterFacility, now, self.open_gap_ms);
            }
            Step::EnterFacility => {
                self.flags.opening_facility = false;
                self.modal = ModalState::FacilityOpen;
            }
            Step::RegionClosed => {
                self.flags.closing_region = false;
                self.modal = ModalState::Idle;
                self.selected_region = None;
                self.selected_category = None;
                self.selected_facility = None;
                self.search_query.clear();
            }
            Step::FacilityClosed => {
                self.flags.closing_facility = false;
                self.selected_facility = None;
                self.modal = if self.selected_region.is_some() {
                    ModalState::RegionOpen
                } else {
                    ModalState::Idle
                };
            }
        }

        log::debug!("Transition step {:?} -> {}", step, self.modal.label());
        true
    }
}
