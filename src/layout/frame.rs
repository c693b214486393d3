use serde::{Deserialize, Serialize};

use crate::core::{EventCategory, TimelineMetrics, YearMarker};
use crate::error::{TimelineError, TimelineResult};

use super::ScaledDimensions;
use super::arcs::{CollateralArc, LineageArc};
use super::event_placement::PlacementOutcome;
use super::geometry::Rect;
use super::overlays::LifeLineOverlay;

pub const LAYOUT_FRAME_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarKind {
    Lineage,
    Collateral { parent_id: String },
}

/// Positioned bar of one visible person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub id: String,
    pub name: String,
    pub kind: BarKind,
    pub rect: Rect,
    /// Deterministic palette slot; the theme wraps it with `index % len`.
    pub palette_index: usize,
    pub display_birth: Option<f64>,
    pub display_death: Option<f64>,
    pub death_unknown: bool,
    /// Formatted life range, e.g. `0 - 930 (930 anos)`.
    pub label: String,
    pub expanded: bool,
    /// Set on lineage bars with at least one visible collateral while bar
    /// controls are shown.
    pub has_expandable_collaterals: bool,
    pub lifeline_active: bool,
}

impl BarLayout {
    #[must_use]
    pub fn is_lineage(&self) -> bool {
        self.kind == BarKind::Lineage
    }
}

/// Vertical line and label of one event with a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLayout {
    pub id: String,
    pub name: String,
    pub category: EventCategory,
    pub display_year: f64,
    pub line_x: f64,
    pub label: Rect,
    pub outcome: PlacementOutcome,
    /// Hover text, e.g. `Dilúvio (Ano 2192 aC)`.
    pub title: String,
}

/// Everything a rendering surface needs for one pass.
///
/// Built fresh by [`compute_layout`](super::compute_layout); no field refers
/// back into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub metrics: TimelineMetrics,
    pub dims: ScaledDimensions,
    /// Lineage bars in birth order, each followed by its expanded block.
    pub bars: Vec<BarLayout>,
    /// Ordered by line x.
    pub events: Vec<EventLayout>,
    pub arcs: Vec<LineageArc>,
    pub collateral_arcs: Vec<CollateralArc>,
    pub year_markers: Vec<YearMarker>,
    pub major_gridlines: Vec<f64>,
    pub lifelines: Vec<LifeLineOverlay>,
    pub row_guides: Vec<f64>,
    pub canvas_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrameJsonContractV1 {
    pub schema_version: u32,
    pub frame: LayoutFrame,
}

impl LayoutFrame {
    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.metrics.total_pixel_width
    }

    #[must_use]
    pub fn bar(&self, id: &str) -> Option<&BarLayout> {
        self.bars.iter().find(|bar| bar.id == id)
    }

    #[must_use]
    pub fn event(&self, id: &str) -> Option<&EventLayout> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn lineage_bars(&self) -> impl Iterator<Item = &BarLayout> {
        self.bars.iter().filter(|bar| bar.is_lineage())
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = LayoutFrameJsonContractV1 {
            schema_version: LAYOUT_FRAME_JSON_SCHEMA_V1,
            frame: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize layout frame contract v1: {e}"))
        })
    }

    /// Accepts either a bare frame or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(frame) = serde_json::from_str::<LayoutFrame>(input) {
            return Ok(frame);
        }
        let payload: LayoutFrameJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse layout frame json payload: {e}"))
        })?;
        if payload.schema_version != LAYOUT_FRAME_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported layout frame schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.frame)
    }
}
