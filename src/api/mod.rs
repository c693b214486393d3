//! Stateful facade owning the catalog and the user-controlled view state.

mod engine_config;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::core::{Catalog, EventCategory, ReferenceMode, TimelineEvent};
use crate::error::{TimelineError, TimelineResult};
use crate::layout::{
    GLOBAL_UI_SCALE_RANGE, HORIZONTAL_SCALE_RANGE, LayoutConfig, LayoutFrame, LayoutParams,
    VERTICAL_SCALE_RANGE, compute_layout_with_events,
};
use crate::render::{RenderFrame, Renderer, Theme, build_render_frame};

pub use engine_config::TimelineEngineConfig;

/// Owns the immutable catalog plus everything the user can toggle, and runs
/// a full layout pass on demand.
pub struct TimelineEngine<R: Renderer> {
    renderer: R,
    catalog: Catalog,
    config: LayoutConfig,
    params: LayoutParams,
    theme: Theme,
    selected_events: BTreeSet<String>,
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn new(
        renderer: R,
        catalog: Catalog,
        config: TimelineEngineConfig,
    ) -> TimelineResult<Self> {
        let layout = config.layout.validate()?;
        config.params.validate()?;

        let selected_events = match config.selected_event_ids {
            Some(ids) => {
                if let Some(unknown) = ids.iter().find(|id| catalog.event(id).is_none()) {
                    return Err(TimelineError::InvalidData(format!(
                        "selected event `{unknown}` is not in the catalog"
                    )));
                }
                ids.into_iter().collect()
            }
            None => catalog
                .events()
                .iter()
                .filter(|event| event.category == EventCategory::Principal)
                .map(|event| event.id.clone())
                .collect(),
        };

        Ok(Self {
            renderer,
            catalog,
            config: layout,
            params: config.params,
            theme: config.theme,
            selected_events,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        self.config
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[must_use]
    pub fn reference_mode(&self) -> ReferenceMode {
        self.params.reference_mode
    }

    pub fn set_reference_mode(&mut self, mode: ReferenceMode) {
        self.params.reference_mode = mode;
    }

    /// Switches between absolute and relative years; returns the new mode.
    pub fn toggle_reference_mode(&mut self) -> ReferenceMode {
        self.params.reference_mode = match self.params.reference_mode {
            ReferenceMode::Absolute => ReferenceMode::Relative,
            ReferenceMode::Relative => ReferenceMode::Absolute,
        };
        self.params.reference_mode
    }

    /// Clamps to the slider range and returns the applied value.
    pub fn set_horizontal_scale(&mut self, scale: f64) -> TimelineResult<f64> {
        self.params.horizontal_scale =
            clamp_scale("horizontal_scale", scale, HORIZONTAL_SCALE_RANGE)?;
        Ok(self.params.horizontal_scale)
    }

    pub fn set_vertical_scale(&mut self, scale: f64) -> TimelineResult<f64> {
        self.params.vertical_scale =
            clamp_scale("vertical_scale", scale, VERTICAL_SCALE_RANGE)?;
        Ok(self.params.vertical_scale)
    }

    pub fn set_global_ui_scale(&mut self, scale: f64) -> TimelineResult<f64> {
        self.params.global_ui_scale =
            clamp_scale("global_ui_scale", scale, GLOBAL_UI_SCALE_RANGE)?;
        Ok(self.params.global_ui_scale)
    }

    #[must_use]
    pub fn is_hidden(&self, person_id: &str) -> bool {
        self.params.is_hidden(person_id)
    }

    pub fn set_hidden(&mut self, person_id: &str, hidden: bool) -> TimelineResult<()> {
        self.ensure_person(person_id)?;
        if hidden {
            self.params.hidden_ids.insert(person_id.to_owned());
        } else {
            self.params.hidden_ids.remove(person_id);
        }
        Ok(())
    }

    /// Flips visibility; returns `true` when the person is now visible.
    pub fn toggle_visibility(&mut self, person_id: &str) -> TimelineResult<bool> {
        let was_hidden = self.is_hidden(person_id);
        self.set_hidden(person_id, !was_hidden)?;
        Ok(was_hidden)
    }

    /// Makes a hidden lineage member visible again, as clicking its reveal
    /// indicator does.
    pub fn reveal(&mut self, person_id: &str) -> TimelineResult<()> {
        self.set_hidden(person_id, false)
    }

    pub fn show_all(&mut self) {
        self.params.hidden_ids.clear();
    }

    /// Flips the collateral group under `person_id`; returns the new state.
    pub fn toggle_expanded(&mut self, person_id: &str) -> TimelineResult<bool> {
        self.ensure_person(person_id)?;
        Ok(toggle_flag(&mut self.params.expanded_groups, person_id))
    }

    /// Flips the life-line overlay of `person_id`; returns the new state.
    pub fn toggle_lifeline(&mut self, person_id: &str) -> TimelineResult<bool> {
        self.ensure_person(person_id)?;
        Ok(toggle_flag(&mut self.params.active_lifelines, person_id))
    }

    pub fn set_ruler_pinned(&mut self, pinned: bool) {
        self.params.ruler_pinned = pinned;
    }

    pub fn set_show_bar_controls(&mut self, show: bool) {
        self.params.show_bar_controls = show;
    }

    #[must_use]
    pub fn is_event_selected(&self, event_id: &str) -> bool {
        self.selected_events.contains(event_id)
    }

    pub fn set_event_selected(&mut self, event_id: &str, selected: bool) -> TimelineResult<()> {
        if self.catalog.event(event_id).is_none() {
            return Err(TimelineError::InvalidData(format!(
                "event `{event_id}` is not in the catalog"
            )));
        }
        if selected {
            self.selected_events.insert(event_id.to_owned());
        } else {
            self.selected_events.remove(event_id);
        }
        Ok(())
    }

    /// Selects or clears every event of one category.
    pub fn set_category_selected(&mut self, category: EventCategory, selected: bool) {
        for event in self.catalog.events() {
            if event.category != category {
                continue;
            }
            if selected {
                self.selected_events.insert(event.id.clone());
            } else {
                self.selected_events.remove(&event.id);
            }
        }
    }

    /// Selected events in catalog order.
    #[must_use]
    pub fn selected_events(&self) -> Vec<&TimelineEvent> {
        self.catalog
            .events()
            .iter()
            .filter(|event| self.selected_events.contains(&event.id))
            .collect()
    }

    /// Catalog events grouped for selection menus, catalog order inside each group.
    #[must_use]
    pub fn events_by_category(&self) -> BTreeMap<EventCategory, Vec<&TimelineEvent>> {
        let mut groups: BTreeMap<EventCategory, Vec<&TimelineEvent>> = BTreeMap::new();
        for event in self.catalog.events() {
            groups.entry(event.category).or_default().push(event);
        }
        groups
    }

    /// Runs a full layout pass over the current state.
    pub fn layout(&self) -> TimelineResult<LayoutFrame> {
        let events = self.selected_events();
        compute_layout_with_events(&self.catalog, &events, &self.params, &self.config)
    }

    pub fn render_frame(&self) -> TimelineResult<RenderFrame> {
        let layout = self.layout()?;
        Ok(build_render_frame(&layout, &self.theme))
    }

    /// Lays out, builds the scene and hands it to the renderer.
    pub fn render(&mut self) -> TimelineResult<LayoutFrame> {
        let layout = self.layout()?;
        let frame = build_render_frame(&layout, &self.theme);
        debug!(primitives = frame.primitive_count(), "rendering timeline frame");
        self.renderer.render(&frame)?;
        Ok(layout)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn ensure_person(&self, person_id: &str) -> TimelineResult<()> {
        if self.catalog.person(person_id).is_none() {
            return Err(TimelineError::InvalidData(format!(
                "person `{person_id}` is not in the catalog"
            )));
        }
        Ok(())
    }
}

fn clamp_scale(name: &'static str, value: f64, (min, max): (f64, f64)) -> TimelineResult<f64> {
    if !value.is_finite() {
        return Err(TimelineError::InvalidParameter { name, value });
    }
    Ok(value.clamp(min, max))
}

fn toggle_flag(flags: &mut BTreeMap<String, bool>, id: &str) -> bool {
    let flag = flags.entry(id.to_owned()).or_insert(false);
    *flag = !*flag;
    *flag
}
