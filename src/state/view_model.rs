//! Owned application view model.
//!
//! Holds the region store, the geometry engine and the interaction state.
//! The render layer never calls into those directly: it queues `Message`s
//! and advances the model once per frame with the current time.

use std::collections::VecDeque;

use super::interaction::{Effect, InteractionState, ModalState};
use super::schedule::Millis;
use crate::config::AtlasConfig;
use crate::data::{
    categories_of, facilities_in_view, links, total_facilities, Facility, FacilityRef, Region,
    RegionStore, TaggedFacility,
};
use crate::geo::{GeometryEngine, GestureDelta, ViewTransform, Visibility};

/// Shown in place of a missing contact field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Normalized input events.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    GestureStart,
    Gesture(GestureDelta),
    GestureEnd,
    /// User-facing "reset view" control.
    ResetView,
    ClickRegion(String),
    ClickFacility(FacilityRef),
    SelectCategory(String),
    ClearCategory,
    SetQuery(String),
    CloseRegion,
    CloseFacility,
    Escape,
    BackdropClick { on_backdrop: bool },
}

/// Content of the region detail view.
#[derive(Debug, Clone)]
pub struct RegionDetail<'a> {
    pub region: &'a Region,
    pub total: usize,
    pub categories: Vec<&'a str>,
    pub selected_category: Option<&'a str>,
    pub query: &'a str,
    pub facilities: Vec<TaggedFacility<'a>>,
    pub closing: bool,
}

/// Content of the facility detail view.
#[derive(Debug, Clone)]
pub struct FacilityDetail<'a> {
    pub facility: &'a Facility,
    /// Phone text, or the placeholder.
    pub phone: &'a str,
    /// Website text, or the placeholder.
    pub website: &'a str,
    /// Clickable website target, absent when no website is known.
    pub website_href: Option<String>,
    pub open_in_maps_url: String,
    pub directions_url: String,
    /// Embeddable map, absent when the map reference is not a URL.
    pub embed_url: Option<String>,
    pub closing: bool,
}

pub struct AppViewModel {
    config: AtlasConfig,
    regions: RegionStore,
    engine: GeometryEngine,
    interaction: InteractionState,
    queue: VecDeque<Message>,
}

impl AppViewModel {
    pub fn new(config: AtlasConfig, regions: RegionStore) -> Self {
        let engine = GeometryEngine::new(
            config.transform.clone(),
            config.animation.zoom_debounce_ms,
        );
        let interaction = InteractionState::new(&config.animation);
        log::info!("View model ready with {} regions", regions.len());

        Self {
            config,
            regions,
            engine,
            interaction,
            queue: VecDeque::new(),
        }
    }

    /// Plays the intro animation to the identity transform.
    pub fn start(&mut self, now: Millis) {
        self.engine
            .reset(self.config.animation.intro_duration_ms, now);
    }

    /// Queues a message for the next `update`.
    pub fn send(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Applies queued messages in arrival order, then advances scheduled
    /// transitions and animations. Returns true while anything is still
    /// in motion or pending, so the caller knows to keep repainting.
    pub fn update(&mut self, now: Millis) -> bool {
        while let Some(message) = self.queue.pop_front() {
            self.dispatch(message, now);
        }

        let stepped = self.interaction.tick(now);
        let animating = self.engine.tick(now);
        stepped
            || animating
            || self.engine.is_settling()
            || self.interaction.next_deadline().is_some()
    }

    fn dispatch(&mut self, message: Message, now: Millis) {
        match message {
            Message::GestureStart => self.engine.start_gesture(),
            Message::Gesture(delta) => self.engine.apply_gesture(delta, now),
            Message::GestureEnd => self.engine.end_gesture(),
            Message::ResetView => self
                .engine
                .reset(self.config.animation.reset_duration_ms, now),
            Message::ClickRegion(id) => {
                let Some(region) = self.regions.find(&id).cloned() else {
                    log::warn!("Click on unknown region {}", id);
                    return;
                };
                let effect = self.interaction.click_region(region);
                self.apply(effect, now);
            }
            Message::ClickFacility(facility_ref) => {
                let facility = self
                    .regions
                    .find(&facility_ref.region_id)
                    .and_then(|r| r.facility(&facility_ref))
                    .cloned();
                match facility {
                    Some(facility) => self.interaction.click_facility(facility, now),
                    None => log::warn!("Click on unknown facility {:?}", facility_ref),
                }
            }
            Message::SelectCategory(category) => self.interaction.select_category(&category),
            Message::ClearCategory => self.interaction.clear_category(),
            Message::SetQuery(query) => self.interaction.set_query(query),
            Message::CloseRegion => {
                let effect = self.interaction.close_region(now);
                self.apply(effect, now);
            }
            Message::CloseFacility => self.interaction.close_facility(now),
            Message::Escape => {
                let effect = self.interaction.escape(now);
                self.apply(effect, now);
            }
            Message::BackdropClick { on_backdrop } => {
                let effect = self.interaction.backdrop_click(on_backdrop, now);
                self.apply(effect, now);
            }
        }
    }

    fn apply(&mut self, effect: Option<Effect>, now: Millis) {
        let animation = &self.config.animation;
        match effect {
            Some(Effect::FocusRegion(center)) => self.engine.focus_on(
                center,
                animation.focus_scale,
                animation.focus_duration_ms,
                now,
            ),
            Some(Effect::ResetView) => self.engine.reset(animation.reset_duration_ms, now),
            None => {}
        }
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn regions(&self) -> &RegionStore {
        &self.regions
    }

    pub fn transform(&self) -> ViewTransform {
        self.engine.transform()
    }

    pub fn zoom_level(&self) -> f64 {
        self.engine.zoom_level()
    }

    pub fn zoom_fraction(&self) -> f64 {
        self.engine.zoom_fraction()
    }

    pub fn zoom_label(&self) -> String {
        format!("{:.1}x", self.engine.zoom_level())
    }

    pub fn is_gesturing(&self) -> bool {
        self.engine.is_gesturing()
    }

    /// Visibility follows the debounced zoom level, not the live scale.
    pub fn visibility(&self) -> Visibility {
        Visibility::at_scale(self.engine.zoom_level(), &self.config.visibility)
    }

    pub fn modal(&self) -> ModalState {
        self.interaction.modal()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Page scroll lock and the decorative overlay.
    pub fn scroll_locked(&self) -> bool {
        self.interaction.is_modal_active()
    }

    pub fn region_detail(&self) -> Option<RegionDetail<'_>> {
        if self.interaction.modal() != ModalState::RegionOpen {
            return None;
        }
        let region = self.interaction.selected_region()?;
        let selected_category = self.interaction.selected_category();
        let query = self.interaction.search_query();

        Some(RegionDetail {
            region,
            total: total_facilities(region),
            categories: categories_of(Some(region)),
            selected_category,
            query,
            facilities: facilities_in_view(region, selected_category, query),
            closing: self.interaction.flags().closing_region,
        })
    }

    pub fn facility_detail(&self) -> Option<FacilityDetail<'_>> {
        if self.interaction.modal() != ModalState::FacilityOpen {
            return None;
        }
        let facility = self.interaction.selected_facility()?;

        Some(FacilityDetail {
            facility,
            phone: facility.phone().unwrap_or(NOT_SPECIFIED),
            website: facility.website().unwrap_or(NOT_SPECIFIED),
            website_href: facility.website().map(links::website_href),
            open_in_maps_url: links::open_in_maps_url(facility),
            directions_url: links::directions_url(facility),
            embed_url: links::embed_url(facility),
            closing: self.interaction.flags().closing_facility,
        })
    }
}
