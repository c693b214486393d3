//! Pure layout pipeline: catalog + parameters in, [`LayoutFrame`] out.

pub mod arcs;
mod config;
pub mod event_placement;
pub mod extent;
mod frame;
pub mod geometry;
pub mod labels;
pub mod overlays;
pub mod projection;
pub mod stacker;

use tracing::debug;

use crate::core::{Catalog, TimelineEvent, YearScale, build_year_markers, compute_metrics};
use crate::error::TimelineResult;

pub use arcs::{CollateralArc, LineageArc, RevealIndicator};
pub use config::{
    GLOBAL_UI_SCALE_RANGE, HORIZONTAL_SCALE_RANGE, LayoutConfig, LayoutParams, ScaledDimensions,
    VERTICAL_SCALE_RANGE,
};
pub use event_placement::{LabelPlacer, MAX_PLACEMENT_ATTEMPTS, PlacedLabel, PlacementOutcome};
pub use frame::{
    BarKind, BarLayout, EventLayout, LAYOUT_FRAME_JSON_SCHEMA_V1, LayoutFrame,
    LayoutFrameJsonContractV1,
};
pub use geometry::{Point, QuadCurve, Rect};
pub use overlays::{LifeLineOverlay, LifeLineTag, TagAnchor};

use projection::{LineageProjection, project_bar, project_lineage};
use stacker::{StackedRow, stack_lineage};

/// Runs a full pass with every catalog event that has a year.
pub fn compute_layout(
    catalog: &Catalog,
    params: &LayoutParams,
    config: &LayoutConfig,
) -> TimelineResult<LayoutFrame> {
    let events: Vec<&TimelineEvent> = catalog.events().iter().collect();
    compute_layout_with_events(catalog, &events, params, config)
}

/// Runs a full pass placing labels only for `events`.
///
/// The year range still covers the whole catalog, so changing the event
/// selection never moves bars.
pub fn compute_layout_with_events(
    catalog: &Catalog,
    events: &[&TimelineEvent],
    params: &LayoutParams,
    config: &LayoutConfig,
) -> TimelineResult<LayoutFrame> {
    params.validate()?;
    let config = config.validate()?;

    let dims = ScaledDimensions::new(&config, params);
    let mode = params.reference_mode;
    let metrics = compute_metrics(
        catalog.people(),
        catalog.events(),
        mode,
        dims.horizontal_scale,
        config.pixels_per_100_years,
    );
    let scale = YearScale::new(metrics);

    let projections =
        project_lineage(catalog, params, &dims, scale, config.fallback_lifespan_years);
    let rows = stack_lineage(&projections, params, &dims);
    let (bars, collateral_arcs) =
        build_bars(catalog, &projections, &rows, params, &dims, &config, scale);

    let occupied: Vec<Rect> = bars.iter().map(|bar| bar.rect).collect();
    let placer = LabelPlacer::new(&dims, scale, config.event_proximity_years);
    let placed = placer.place(events, mode, scale, &occupied);

    let arcs = arcs::build_lineage_arcs(catalog, &projections, &rows, &dims, &config);

    let content_bottom = extent::content_bottom(&projections, params, &dims, &config);
    let canvas_height = extent::canvas_height(content_bottom, &placed, &dims, &config);

    let year_markers = build_year_markers(metrics, scale, dims.horizontal_scale);
    let major_gridlines = overlays::major_gridlines(&year_markers);
    let row_guides = overlays::row_guides(&dims, canvas_height);
    let lifelines = bars
        .iter()
        .filter(|bar| bar.is_lineage() && bar.lifeline_active)
        .map(|bar| {
            overlays::build_lifeline(
                &bar.id,
                bar.rect,
                bar.display_birth,
                bar.display_death,
                mode,
                &config,
            )
        })
        .collect();

    let event_layouts: Vec<EventLayout> = placed
        .iter()
        .map(|placed| {
            let event = events[placed.event_index];
            EventLayout {
                id: event.id.clone(),
                name: event.name.clone(),
                category: event.category,
                display_year: placed.display_year,
                line_x: placed.line_x,
                label: placed.label,
                outcome: placed.outcome,
                title: labels::format_event_title(&event.name, placed.display_year, mode),
            }
        })
        .collect();

    debug!(
        bars = bars.len(),
        lineage_rows = rows.len(),
        events = event_layouts.len(),
        arcs = arcs.len(),
        canvas_height,
        canvas_width = metrics.total_pixel_width,
        ?mode,
        "layout pass complete"
    );

    Ok(LayoutFrame {
        metrics,
        dims,
        bars,
        events: event_layouts,
        arcs,
        collateral_arcs,
        year_markers,
        major_gridlines,
        lifelines,
        row_guides,
        canvas_height,
    })
}

fn build_bars(
    catalog: &Catalog,
    projections: &[LineageProjection<'_>],
    rows: &[StackedRow<'_>],
    params: &LayoutParams,
    dims: &ScaledDimensions,
    config: &LayoutConfig,
    scale: YearScale,
) -> (Vec<BarLayout>, Vec<CollateralArc>) {
    let mode = params.reference_mode;
    let mut bars = Vec::with_capacity(rows.len());
    let mut collateral_arcs = Vec::new();

    for row in rows {
        let projection = &projections[row.projection];
        let person = projection.person;
        let parent_rect = Rect::new(
            projection.bar.x,
            row.y,
            projection.bar.width,
            dims.bar_height,
        );
        let span = projection.bar.span;

        bars.push(BarLayout {
            id: person.id.clone(),
            name: person.name.clone(),
            kind: BarKind::Lineage,
            rect: parent_rect,
            palette_index: projection.lineage_index,
            display_birth: span.birth,
            display_death: span.death,
            death_unknown: projection.death_unknown,
            label: labels::format_life_range(person, span.birth, span.death, mode),
            expanded: params.is_expanded(&person.id),
            has_expandable_collaterals: params.show_bar_controls
                && projection.visible_collateral_count(params) > 0,
            lifeline_active: params.is_lifeline_active(&person.id),
        });

        for slot in &row.block {
            let sibling = slot.person;
            let bar = project_bar(
                sibling,
                mode,
                scale,
                config.fallback_lifespan_years,
                dims.min_sibling_bar_width,
                projection.bar.x,
            );
            let rect = Rect::new(bar.x, slot.y, bar.width, dims.sibling_bar_height);
            collateral_arcs.push(arcs::build_collateral_arc(
                &person.id,
                parent_rect,
                &sibling.id,
                rect,
                dims,
            ));
            bars.push(BarLayout {
                id: sibling.id.clone(),
                name: sibling.name.clone(),
                kind: BarKind::Collateral {
                    parent_id: person.id.clone(),
                },
                rect,
                palette_index: catalog.birth_rank(&sibling.id).unwrap_or_default(),
                display_birth: bar.span.birth,
                display_death: bar.span.death,
                death_unknown: sibling.is_death_unknown(),
                label: labels::format_life_range(sibling, bar.span.birth, bar.span.death, mode),
                expanded: false,
                has_expandable_collaterals: false,
                lifeline_active: false,
            });
        }
    }

    (bars, collateral_arcs)
}
