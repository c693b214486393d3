use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::ReferenceMode;
use crate::error::{TimelineError, TimelineResult};

/// Inclusive bounds for the base horizontal scale slider.
pub const HORIZONTAL_SCALE_RANGE: (f64, f64) = (0.2, 5.0);
/// Inclusive bounds for the base vertical scale slider.
pub const VERTICAL_SCALE_RANGE: (f64, f64) = (0.5, 2.5);
/// Inclusive bounds for the global UI scale slider.
pub const GLOBAL_UI_SCALE_RANGE: (f64, f64) = (0.7, 2.5);

/// Base dimensions and tuning constants of the layout engine.
///
/// Values are expressed at scale `1.0`; each pass multiplies them by the
/// effective scales. Serializable so hosts can persist partial overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub bar_height_px: f64,
    pub bar_gap_px: f64,
    pub sibling_bar_height_px: f64,
    pub sibling_gap_px: f64,
    pub min_bar_width_px: f64,
    pub min_sibling_bar_width_px: f64,
    /// Ruler height, scaled by the global UI scale only.
    pub ruler_height_px: f64,
    pub gap_below_pinned_ruler_px: f64,
    pub gap_with_scrolling_ruler_px: f64,
    /// Vertical label width, scaled by the global UI scale only.
    pub event_label_width_px: f64,
    /// Vertical label length, scaled by the global UI scale only.
    pub event_label_height_px: f64,
    pub event_min_gap_px: f64,
    pub event_scan_step_px: f64,
    pub event_top_margin_px: f64,
    /// Event lines closer than this many years never share label rows.
    pub event_proximity_years: f64,
    pub pixels_per_100_years: f64,
    /// Bar span used when a person has no death information.
    pub fallback_lifespan_years: f64,
    pub empty_content_height_px: f64,
    pub bottom_margin_px: f64,
    pub min_canvas_height_px: f64,
    pub arc_anchor_inset_px: f64,
    pub arc_curvature_px: f64,
    pub indicator_radius_px: f64,
    pub lifeline_tag_offset_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bar_height_px: 50.0,
            bar_gap_px: 10.0,
            sibling_bar_height_px: 24.0,
            sibling_gap_px: 5.0,
            min_bar_width_px: 50.0,
            min_sibling_bar_width_px: 30.0,
            ruler_height_px: 80.0,
            gap_below_pinned_ruler_px: 25.0,
            gap_with_scrolling_ruler_px: 15.0,
            event_label_width_px: 20.0,
            event_label_height_px: 200.0,
            event_min_gap_px: 30.0,
            event_scan_step_px: 10.0,
            event_top_margin_px: 5.0,
            event_proximity_years: 30.0,
            pixels_per_100_years: 200.0,
            fallback_lifespan_years: 100.0,
            empty_content_height_px: 50.0,
            bottom_margin_px: 100.0,
            min_canvas_height_px: 200.0,
            arc_anchor_inset_px: 5.0,
            arc_curvature_px: 30.0,
            indicator_radius_px: 6.0,
            lifeline_tag_offset_px: 5.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        for (value, name) in [
            (self.bar_height_px, "bar_height_px"),
            (self.bar_gap_px, "bar_gap_px"),
            (self.sibling_bar_height_px, "sibling_bar_height_px"),
            (self.sibling_gap_px, "sibling_gap_px"),
            (self.min_bar_width_px, "min_bar_width_px"),
            (self.min_sibling_bar_width_px, "min_sibling_bar_width_px"),
            (self.ruler_height_px, "ruler_height_px"),
            (self.event_label_width_px, "event_label_width_px"),
            (self.event_label_height_px, "event_label_height_px"),
            (self.event_scan_step_px, "event_scan_step_px"),
            (self.pixels_per_100_years, "pixels_per_100_years"),
            (self.fallback_lifespan_years, "fallback_lifespan_years"),
            (self.indicator_radius_px, "indicator_radius_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }

        for (value, name) in [
            (self.gap_below_pinned_ruler_px, "gap_below_pinned_ruler_px"),
            (self.gap_with_scrolling_ruler_px, "gap_with_scrolling_ruler_px"),
            (self.event_min_gap_px, "event_min_gap_px"),
            (self.event_top_margin_px, "event_top_margin_px"),
            (self.event_proximity_years, "event_proximity_years"),
            (self.empty_content_height_px, "empty_content_height_px"),
            (self.bottom_margin_px, "bottom_margin_px"),
            (self.min_canvas_height_px, "min_canvas_height_px"),
            (self.arc_anchor_inset_px, "arc_anchor_inset_px"),
            (self.arc_curvature_px, "arc_curvature_px"),
            (self.lifeline_tag_offset_px, "lifeline_tag_offset_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        Ok(self)
    }
}

/// User-controlled inputs of one layout pass.
///
/// Owned by the host UI and treated as a read-only snapshot for the duration
/// of [`compute_layout`](crate::layout::compute_layout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub reference_mode: ReferenceMode,
    pub horizontal_scale: f64,
    pub vertical_scale: f64,
    pub global_ui_scale: f64,
    pub hidden_ids: BTreeSet<String>,
    /// Lineage id -> collateral group expanded.
    pub expanded_groups: BTreeMap<String, bool>,
    /// Lineage id -> life-line overlay active.
    pub active_lifelines: BTreeMap<String, bool>,
    pub show_bar_controls: bool,
    /// Pinned rulers stay out of the content flow, pushing the first bar down.
    pub ruler_pinned: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            reference_mode: ReferenceMode::default(),
            horizontal_scale: 1.0,
            vertical_scale: 1.0,
            global_ui_scale: 1.0,
            hidden_ids: BTreeSet::new(),
            expanded_groups: BTreeMap::new(),
            active_lifelines: BTreeMap::new(),
            show_bar_controls: true,
            ruler_pinned: true,
        }
    }
}

impl LayoutParams {
    #[must_use]
    pub fn with_reference_mode(mut self, mode: ReferenceMode) -> Self {
        self.reference_mode = mode;
        self
    }

    #[must_use]
    pub fn with_scales(mut self, horizontal: f64, vertical: f64, global_ui: f64) -> Self {
        self.horizontal_scale = horizontal;
        self.vertical_scale = vertical;
        self.global_ui_scale = global_ui;
        self
    }

    #[must_use]
    pub fn with_hidden<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_expanded(mut self, id: impl Into<String>) -> Self {
        self.expanded_groups.insert(id.into(), true);
        self
    }

    #[must_use]
    pub fn with_lifeline(mut self, id: impl Into<String>) -> Self {
        self.active_lifelines.insert(id.into(), true);
        self
    }

    #[must_use]
    pub fn with_ruler_pinned(mut self, pinned: bool) -> Self {
        self.ruler_pinned = pinned;
        self
    }

    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden_ids.contains(id)
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_groups.get(id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_lifeline_active(&self, id: &str) -> bool {
        self.active_lifelines.get(id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn effective_horizontal_scale(&self) -> f64 {
        self.horizontal_scale * self.global_ui_scale
    }

    #[must_use]
    pub fn effective_vertical_scale(&self) -> f64 {
        self.vertical_scale * self.global_ui_scale
    }

    pub fn validate(&self) -> TimelineResult<()> {
        for (value, name, (min, max)) in [
            (self.horizontal_scale, "horizontal_scale", HORIZONTAL_SCALE_RANGE),
            (self.vertical_scale, "vertical_scale", VERTICAL_SCALE_RANGE),
            (self.global_ui_scale, "global_ui_scale", GLOBAL_UI_SCALE_RANGE),
        ] {
            if !value.is_finite() || !(min..=max).contains(&value) {
                return Err(TimelineError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Pixel dimensions of one pass, with effective scales applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledDimensions {
    pub horizontal_scale: f64,
    pub vertical_scale: f64,
    pub ui_scale: f64,
    pub bar_height: f64,
    pub bar_gap: f64,
    pub sibling_bar_height: f64,
    pub sibling_gap: f64,
    pub min_bar_width: f64,
    pub min_sibling_bar_width: f64,
    pub content_start_y: f64,
    pub event_label_width: f64,
    pub event_label_height: f64,
    pub event_min_gap: f64,
    pub event_scan_step: f64,
    pub event_top_margin: f64,
}

impl ScaledDimensions {
    #[must_use]
    pub fn new(config: &LayoutConfig, params: &LayoutParams) -> Self {
        let v = params.effective_vertical_scale();
        let ui = params.global_ui_scale;
        let content_start_y = if params.ruler_pinned {
            config.ruler_height_px * ui + config.gap_below_pinned_ruler_px * v
        } else {
            config.gap_with_scrolling_ruler_px * v
        };

        Self {
            horizontal_scale: params.effective_horizontal_scale(),
            vertical_scale: v,
            ui_scale: ui,
            bar_height: config.bar_height_px * v,
            bar_gap: config.bar_gap_px * v,
            sibling_bar_height: config.sibling_bar_height_px * v,
            sibling_gap: config.sibling_gap_px * v,
            // Minimum widths follow the vertical scale, like the bar text they hold.
            min_bar_width: config.min_bar_width_px * v,
            min_sibling_bar_width: config.min_sibling_bar_width_px * v,
            content_start_y,
            event_label_width: config.event_label_width_px * ui,
            event_label_height: config.event_label_height_px * ui,
            event_min_gap: config.event_min_gap_px * v,
            event_scan_step: config.event_scan_step_px * v,
            event_top_margin: config.event_top_margin_px * v,
        }
    }

    /// Vertical space taken by an expanded block of `count` visible collaterals.
    #[must_use]
    pub fn collateral_block_height(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        count as f64 * (self.sibling_bar_height + self.sibling_gap) + self.bar_gap
    }

    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.bar_height + self.bar_gap
    }
}
