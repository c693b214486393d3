use serde::{Deserialize, Serialize};

use crate::core::{ReferenceMode, YearMarker};

use super::geometry::{Point, Rect};
use super::labels::{format_death_tag, format_year};
use super::{LayoutConfig, ScaledDimensions};

/// Extra row guides drawn past the canvas height so scrolling never shows a gap.
const EXTRA_ROW_GUIDES: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagAnchor {
    /// The tag's right edge sits at `position.x`.
    End,
    /// The tag's left edge sits at `position.x`.
    Start,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeLineTag {
    pub text: String,
    /// Vertically centered anchor point.
    pub position: Point,
    pub anchor: TagAnchor,
}

/// Full-height birth/death guides of one lineage member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeLineOverlay {
    pub person_id: String,
    pub birth_x: f64,
    pub death_x: f64,
    pub birth_tag: Option<LifeLineTag>,
    pub death_tag: LifeLineTag,
}

/// Builds the overlay for a bar whose life line is switched on.
#[must_use]
pub fn build_lifeline(
    person_id: &str,
    bar: Rect,
    display_birth: Option<f64>,
    display_death: Option<f64>,
    mode: ReferenceMode,
    config: &LayoutConfig,
) -> LifeLineOverlay {
    let mid_y = bar.y + bar.height / 2.0;
    let offset = config.lifeline_tag_offset_px;
    LifeLineOverlay {
        person_id: person_id.to_owned(),
        birth_x: bar.x,
        death_x: bar.right(),
        birth_tag: display_birth.map(|year| LifeLineTag {
            text: format_year(year, mode),
            position: Point::new(bar.x - offset, mid_y),
            anchor: TagAnchor::End,
        }),
        death_tag: LifeLineTag {
            text: format_death_tag(display_death, mode),
            position: Point::new(bar.right() + offset, mid_y),
            anchor: TagAnchor::Start,
        },
    }
}

/// Y of the horizontal guides between bar rows.
#[must_use]
pub fn row_guides(dims: &ScaledDimensions, canvas_height: f64) -> Vec<f64> {
    let pitch = dims.row_pitch();
    if pitch <= 0.0 || !canvas_height.is_finite() {
        return Vec::new();
    }
    let count = (canvas_height / pitch).floor() as usize + EXTRA_ROW_GUIDES;
    (0..count)
        .map(|row| {
            dims.content_start_y + row as f64 * pitch - dims.bar_gap / 2.0 - dims.bar_height / 2.0
        })
        .collect()
}

/// X of full-height gridlines, one per major ruler tick.
#[must_use]
pub fn major_gridlines(markers: &[YearMarker]) -> Vec<f64> {
    markers
        .iter()
        .filter(|marker| marker.is_major)
        .map(|marker| marker.x)
        .collect()
}
