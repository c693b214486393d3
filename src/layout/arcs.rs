use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Catalog, Person};

use super::geometry::{Point, QuadCurve, Rect};
use super::projection::LineageProjection;
use super::stacker::StackedRow;
use super::{LayoutConfig, ScaledDimensions};

/// Reveal indicators never sit closer than this to an arc endpoint.
pub const INDICATOR_T_RANGE: (f64, f64) = (0.05, 0.95);

/// Marker for a hidden lineage member skipped by an arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealIndicator {
    pub person_id: String,
    pub name: String,
    pub t: f64,
    pub center: Point,
    pub radius: f64,
}

/// Connector from a lineage member to its next visible lineage descendant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageArc {
    pub parent_id: String,
    pub child_id: String,
    pub curve: QuadCurve,
    pub stroke_width: f64,
    pub indicators: Vec<RevealIndicator>,
}

/// Shallow connector from a lineage member to one expanded collateral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateralArc {
    pub parent_id: String,
    pub person_id: String,
    pub curve: QuadCurve,
    pub stroke_width: f64,
}

/// Result of walking the lineage chain forward from one visible member.
#[derive(Debug, Clone)]
pub struct DescendantWalk<'a> {
    pub descendant: &'a Person,
    /// Hidden members between the start and `descendant`, in chain order.
    pub hidden: Vec<&'a Person>,
}

/// Follows lineage children until one satisfies `is_visible`.
///
/// Terminates because [`Catalog`] rejects cyclic father chains at load.
pub fn next_visible_descendant<'a>(
    catalog: &'a Catalog,
    start_id: &str,
    is_visible: impl Fn(&Person) -> bool,
) -> Option<DescendantWalk<'a>> {
    let mut hidden = Vec::new();
    let mut current = catalog.lineage_child_of(start_id)?;
    loop {
        if is_visible(current) {
            return Some(DescendantWalk {
                descendant: current,
                hidden,
            });
        }
        hidden.push(current);
        current = catalog.lineage_child_of(&current.id)?;
    }
}

/// Fractional position of `hidden` between two endpoints, by birth year.
///
/// `None` when any birth year is unknown or the endpoints share a birth year.
#[must_use]
pub fn indicator_t(parent: &Person, child: &Person, hidden: &Person) -> Option<f64> {
    let from = parent.birth_year?;
    let to = child.birth_year?;
    let at = hidden.birth_year?;
    if to == from {
        return None;
    }
    let (min, max) = INDICATOR_T_RANGE;
    Some(((at - from) / (to - from)).clamp(min, max))
}

/// Builds one arc per visible lineage member that has a visible descendant.
#[must_use]
pub fn build_lineage_arcs(
    catalog: &Catalog,
    projections: &[LineageProjection<'_>],
    rows: &[StackedRow<'_>],
    dims: &ScaledDimensions,
    config: &LayoutConfig,
) -> Vec<LineageArc> {
    let row_y: IndexMap<&str, f64> = rows
        .iter()
        .map(|row| (projections[row.projection].person.id.as_str(), row.y))
        .collect();
    let bar_x: IndexMap<&str, f64> = projections
        .iter()
        .map(|projection| (projection.person.id.as_str(), projection.bar.x))
        .collect();

    let v = dims.vertical_scale;
    let half_bar = dims.bar_height / 2.0;
    let radius = config.indicator_radius_px * (v * 0.8).clamp(0.7, 1.3);
    let stroke_width = (v * 0.8).max(1.0);

    let mut arcs = Vec::new();
    for row in rows {
        let parent = projections[row.projection].person;
        let Some(walk) = next_visible_descendant(catalog, &parent.id, |person| {
            row_y.contains_key(person.id.as_str())
        }) else {
            continue;
        };
        let child = walk.descendant;
        let (Some(&child_y), Some(&child_x)) = (
            row_y.get(child.id.as_str()),
            bar_x.get(child.id.as_str()),
        ) else {
            continue;
        };

        let start = Point::new(
            projections[row.projection].bar.x + config.arc_anchor_inset_px,
            row.y + half_bar,
        );
        let end = Point::new(child_x + config.arc_anchor_inset_px, child_y + half_bar);
        let sag = config.arc_curvature_px * v * ((end.y - start.y).abs() / 100.0 + 1.0).sqrt();
        let curve = QuadCurve {
            start,
            control: Point::new((start.x + end.x) / 2.0, start.y.max(end.y) + sag),
            end,
        };

        let indicators = walk
            .hidden
            .iter()
            .filter_map(|hidden| {
                let t = indicator_t(parent, child, hidden)?;
                Some(RevealIndicator {
                    person_id: hidden.id.clone(),
                    name: hidden.name.clone(),
                    t,
                    center: curve.point_at(t),
                    radius,
                })
            })
            .collect();

        arcs.push(LineageArc {
            parent_id: parent.id.clone(),
            child_id: child.id.clone(),
            curve,
            stroke_width,
            indicators,
        });
    }
    arcs
}

/// Connector from the middle of a lineage bar to the start of a collateral bar.
#[must_use]
pub fn build_collateral_arc(
    parent_id: &str,
    parent_bar: Rect,
    person_id: &str,
    collateral_bar: Rect,
    dims: &ScaledDimensions,
) -> CollateralArc {
    let start = Point::new(
        parent_bar.x + parent_bar.width / 2.0,
        parent_bar.y + parent_bar.height / 2.0,
    );
    let end = Point::new(collateral_bar.x, collateral_bar.y + collateral_bar.height / 2.0);
    CollateralArc {
        parent_id: parent_id.to_owned(),
        person_id: person_id.to_owned(),
        curve: QuadCurve {
            start,
            control: Point::new((start.x + end.x) / 2.0, start.y + (end.y - start.y) * 0.7),
            end,
        },
        stroke_width: (0.5 * dims.vertical_scale * 0.7).max(1.0),
    }
}
