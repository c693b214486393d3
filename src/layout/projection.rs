use crate::core::{Catalog, DisplaySpan, Person, ReferenceMode, YearScale, display_span};

use super::{LayoutParams, ScaledDimensions};

/// Horizontal placement of one person for the current pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub span: DisplaySpan,
    pub x: f64,
    pub width: f64,
}

/// Display data of one lineage member. Borrowed from the catalog, never
/// written back to it.
#[derive(Debug, Clone)]
pub struct LineageProjection<'a> {
    pub person: &'a Person,
    /// Position in the birth-sorted lineage list; drives the palette.
    pub lineage_index: usize,
    pub visible: bool,
    pub bar: BarSpan,
    pub death_unknown: bool,
    /// Non-lineage children, hidden or not, in `children_ids` order.
    pub collaterals: Vec<&'a Person>,
}

impl<'a> LineageProjection<'a> {
    /// Collaterals that are not hidden by the host.
    pub fn visible_collaterals<'p>(
        &'p self,
        params: &'p LayoutParams,
    ) -> impl Iterator<Item = &'a Person> + 'p {
        self.collaterals
            .iter()
            .copied()
            .filter(move |child| !params.is_hidden(&child.id))
    }

    #[must_use]
    pub fn visible_collateral_count(&self, params: &LayoutParams) -> usize {
        self.visible_collaterals(params).count()
    }

    /// `true` when the collateral block sits under this bar in this pass.
    #[must_use]
    pub fn shows_collateral_block(&self, params: &LayoutParams) -> bool {
        params.is_expanded(&self.person.id) && self.visible_collateral_count(params) > 0
    }
}

/// Computes x and bar width of a person.
///
/// Without a birth year the bar starts at `fallback_x`. Width never drops
/// below `min_width`.
#[must_use]
pub fn project_bar(
    person: &Person,
    mode: ReferenceMode,
    scale: YearScale,
    fallback_lifespan_years: f64,
    min_width: f64,
    fallback_x: f64,
) -> BarSpan {
    let span = display_span(
        person.birth_year,
        person.death_year,
        fallback_lifespan_years,
        mode,
    );
    let x = match span.birth {
        Some(_) => scale.pixel_x(span.birth),
        None => fallback_x,
    };
    let raw_width = match (span.birth, span.bar_end) {
        (Some(_), Some(_)) => (scale.pixel_x(span.bar_end) - scale.pixel_x(span.birth)).abs(),
        _ => 0.0,
    };

    BarSpan {
        span,
        x,
        width: raw_width.max(min_width),
    }
}

/// Projects every lineage member, visible or hidden, in birth order.
#[must_use]
pub fn project_lineage<'a>(
    catalog: &'a Catalog,
    params: &LayoutParams,
    dims: &ScaledDimensions,
    scale: YearScale,
    fallback_lifespan_years: f64,
) -> Vec<LineageProjection<'a>> {
    catalog
        .lineage_by_birth()
        .into_iter()
        .enumerate()
        .map(|(lineage_index, person)| LineageProjection {
            person,
            lineage_index,
            visible: !params.is_hidden(&person.id),
            bar: project_bar(
                person,
                params.reference_mode,
                scale,
                fallback_lifespan_years,
                dims.min_bar_width,
                0.0,
            ),
            death_unknown: person.is_death_unknown(),
            collaterals: catalog.collateral_children_of(&person.id),
        })
        .collect()
}
