use super::event_placement::PlacedLabel;
use super::projection::LineageProjection;
use super::{LayoutConfig, LayoutParams, ScaledDimensions};

/// Bottom edge of the stacked bars, including an expanded block under the
/// last visible lineage bar.
///
/// Walks the stack on its own instead of reading the stacker's rows, so it
/// can be evaluated without a full pass.
#[must_use]
pub fn content_bottom(
    projections: &[LineageProjection<'_>],
    params: &LayoutParams,
    dims: &ScaledDimensions,
    config: &LayoutConfig,
) -> f64 {
    let mut cursor = dims.content_start_y;
    let mut last_bottom = None;

    for projection in projections.iter().filter(|projection| projection.visible) {
        let y = cursor;
        let block = if params.is_expanded(&projection.person.id) {
            dims.collateral_block_height(projection.visible_collateral_count(params))
        } else {
            0.0
        };
        cursor += dims.row_pitch() + block;
        last_bottom = Some(y + dims.bar_height + block);
    }

    match last_bottom {
        Some(bottom) => bottom,
        None if !projections.is_empty() => dims.content_start_y + dims.bar_height,
        None => dims.content_start_y + config.empty_content_height_px * dims.vertical_scale,
    }
}

/// Authoritative canvas height: stacked content or the lowest label,
/// whichever reaches further, plus the bottom margin.
#[must_use]
pub fn canvas_height(
    content_bottom: f64,
    labels: &[PlacedLabel],
    dims: &ScaledDimensions,
    config: &LayoutConfig,
) -> f64 {
    let lowest = labels
        .iter()
        .map(|placed| placed.label.bottom() + dims.event_min_gap)
        .fold(content_bottom, f64::max);
    let v = dims.vertical_scale;
    (config.min_canvas_height_px * v).max(lowest + config.bottom_margin_px * v)
}
