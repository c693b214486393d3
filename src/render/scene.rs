use crate::layout::labels::format_marker_year;
use crate::layout::{BarLayout, LayoutFrame, TagAnchor};
use crate::render::{
    CirclePrimitive, CurvePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive, Theme,
};

const BAR_CORNER_RADIUS_PX: f64 = 4.0;
const BAR_TEXT_INSET_PX: f64 = 8.0;
const MAJOR_TICK_PX: f64 = 20.0;
const MINOR_TICK_PX: f64 = 10.0;
const RULER_FONT_PX: f64 = 11.0;
const EVENT_FONT_PX: f64 = 12.0;

/// Turns a computed layout into draw commands.
///
/// Within each primitive list, guides come first, then bars, arcs, events
/// and life-line overlays.
#[must_use]
pub fn build_render_frame(layout: &LayoutFrame, theme: &Theme) -> RenderFrame {
    let width = layout.canvas_width();
    let height = layout.canvas_height;
    let dims = layout.dims;
    let v = dims.vertical_scale;
    let ui = dims.ui_scale;
    let mut frame = RenderFrame::new(width, height);

    let guide_color = theme.grid.with_alpha(0.25);
    for &y in &layout.row_guides {
        frame
            .lines
            .push(LinePrimitive::new(0.0, y, width, y, 1.0, guide_color).dashed());
    }
    for &x in &layout.major_gridlines {
        frame
            .lines
            .push(LinePrimitive::vertical(x, height, 1.0, theme.grid.with_alpha(0.5)));
    }

    for marker in &layout.year_markers {
        let tick = ui * if marker.is_major { MAJOR_TICK_PX } else { MINOR_TICK_PX };
        frame
            .lines
            .push(LinePrimitive::new(marker.x, 0.0, marker.x, tick, 1.0, theme.grid));
        if marker.is_major {
            frame.texts.push(TextPrimitive::new(
                format_marker_year(marker.year, layout.metrics.mode),
                marker.x,
                tick + RULER_FONT_PX * ui,
                RULER_FONT_PX * ui,
                theme.text,
                TextHAlign::Center,
            ));
        }
    }

    for bar in &layout.bars {
        push_bar(&mut frame, bar, theme, v);
    }

    for arc in &layout.collateral_arcs {
        frame.curves.push(CurvePrimitive {
            start: (arc.curve.start.x, arc.curve.start.y),
            control: (arc.curve.control.x, arc.curve.control.y),
            end: (arc.curve.end.x, arc.curve.end.y),
            stroke_width: arc.stroke_width,
            color: theme.accent.with_alpha(0.5),
        });
    }
    for arc in &layout.arcs {
        frame.curves.push(CurvePrimitive {
            start: (arc.curve.start.x, arc.curve.start.y),
            control: (arc.curve.control.x, arc.curve.control.y),
            end: (arc.curve.end.x, arc.curve.end.y),
            stroke_width: arc.stroke_width,
            color: theme.accent,
        });
        for indicator in &arc.indicators {
            frame.circles.push(CirclePrimitive {
                cx: indicator.center.x,
                cy: indicator.center.y,
                radius: indicator.radius,
                fill_color: theme.background,
                stroke_color: theme.accent,
                title: Some(indicator.name.clone()),
            });
        }
    }

    for event in &layout.events {
        frame
            .lines
            .push(LinePrimitive::vertical(event.line_x, height, 1.0, theme.event_line).dashed());
        frame.rects.push(RectPrimitive::new(
            event.label.x,
            event.label.y,
            event.label.width,
            event.label.height,
            theme.background.with_alpha(0.85),
        ));
        if !event.name.is_empty() {
            frame.texts.push(
                TextPrimitive::new(
                    event.name.clone(),
                    event.line_x,
                    event.label.y,
                    EVENT_FONT_PX * ui,
                    theme.event_line,
                    TextHAlign::Left,
                )
                .rotated(90.0),
            );
        }
    }

    for lifeline in &layout.lifelines {
        for x in [lifeline.birth_x, lifeline.death_x] {
            frame
                .lines
                .push(LinePrimitive::vertical(x, height, 1.5, theme.lifeline));
        }
        for tag in lifeline.birth_tag.iter().chain([&lifeline.death_tag]) {
            let h_align = match tag.anchor {
                TagAnchor::End => TextHAlign::Right,
                TagAnchor::Start => TextHAlign::Left,
            };
            frame.texts.push(TextPrimitive::new(
                tag.text.clone(),
                tag.position.x,
                tag.position.y,
                RULER_FONT_PX * v,
                theme.lifeline,
                h_align,
            ));
        }
    }

    frame
}

fn push_bar(frame: &mut RenderFrame, bar: &BarLayout, theme: &Theme, v: f64) {
    let rect = bar.rect;
    frame.rects.push(
        RectPrimitive::new(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            theme.palette_color(bar.palette_index),
        )
        .with_corner_radius(BAR_CORNER_RADIUS_PX * v),
    );

    let (name_px, range_px) = if bar.is_lineage() {
        (14.0 * v, 11.0 * v)
    } else {
        (11.0 * v, 9.0 * v)
    };
    let x = rect.x + BAR_TEXT_INSET_PX * v;
    if !bar.name.is_empty() {
        frame.texts.push(TextPrimitive::new(
            bar.name.clone(),
            x,
            rect.y + rect.height * 0.4,
            name_px,
            theme.text,
            TextHAlign::Left,
        ));
    }
    // Collateral bars are too short for a second line.
    if bar.is_lineage() {
        frame.texts.push(TextPrimitive::new(
            bar.label.clone(),
            x,
            rect.y + rect.height * 0.8,
            range_px,
            theme.text.with_alpha(0.8),
            TextHAlign::Left,
        ));
    }
}
