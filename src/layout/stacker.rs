use crate::core::Person;

use super::projection::LineageProjection;
use super::{LayoutParams, ScaledDimensions};

/// Vertical slot of one collateral bar inside an expanded block.
#[derive(Debug, Clone, Copy)]
pub struct CollateralSlot<'a> {
    pub person: &'a Person,
    pub y: f64,
}

/// Vertical slot of one visible lineage bar plus its expanded block.
#[derive(Debug, Clone)]
pub struct StackedRow<'a> {
    /// Index into the projection list.
    pub projection: usize,
    pub y: f64,
    pub block: Vec<CollateralSlot<'a>>,
}

/// Assigns y to every visible lineage member in birth order.
///
/// Expanded groups with visible collaterals get a contiguous block right
/// below their parent; the next lineage bar starts after that block.
#[must_use]
pub fn stack_lineage<'a>(
    projections: &[LineageProjection<'a>],
    params: &LayoutParams,
    dims: &ScaledDimensions,
) -> Vec<StackedRow<'a>> {
    let mut cursor = dims.content_start_y;
    let mut rows = Vec::with_capacity(projections.len());

    for (index, projection) in projections.iter().enumerate() {
        if !projection.visible {
            continue;
        }

        let y = cursor;
        cursor += dims.row_pitch();

        let mut block = Vec::new();
        if params.is_expanded(&projection.person.id) {
            let mut slot_y = y + dims.row_pitch();
            for person in projection.collaterals.iter().copied() {
                if params.is_hidden(&person.id) {
                    continue;
                }
                block.push(CollateralSlot { person, y: slot_y });
                slot_y += dims.sibling_bar_height + dims.sibling_gap;
            }
            cursor += dims.collateral_block_height(block.len());
        }

        rows.push(StackedRow {
            projection: index,
            y,
            block,
        });
    }

    rows
}
