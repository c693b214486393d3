use serde::{Deserialize, Serialize};

use crate::core::{TimelineMetrics, YearScale};

pub const MAJOR_INTERVAL_YEARS: f64 = 500.0;
pub const DEFAULT_MINOR_INTERVAL_YEARS: f64 = 100.0;
/// Upper bound on ticks per ruler; wider ranges coarsen the interval.
pub const MAX_YEAR_MARKERS: usize = 2000;

/// One ruler tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearMarker {
    pub year: f64,
    pub x: f64,
    pub is_major: bool,
}

/// Minor tick interval for an effective horizontal scale.
///
/// Ticks spread out as the axis is compressed and tighten past `2.0`.
#[must_use]
pub fn minor_interval_for_scale(effective_horizontal_scale: f64) -> f64 {
    if effective_horizontal_scale > 2.0 {
        50.0
    } else if effective_horizontal_scale < 0.3 {
        500.0
    } else if effective_horizontal_scale < 0.5 {
        200.0
    } else {
        DEFAULT_MINOR_INTERVAL_YEARS
    }
}

/// Builds ruler ticks covering the metric range, sorted by x.
///
/// At most [`MAX_YEAR_MARKERS`] ticks are produced; past that the interval
/// grows tenfold until the range fits.
#[must_use]
pub fn build_year_markers(
    metrics: TimelineMetrics,
    scale: YearScale,
    effective_horizontal_scale: f64,
) -> Vec<YearMarker> {
    if metrics.span_years() <= 0.0 || !metrics.span_years().is_finite() {
        return Vec::new();
    }

    let (low, high) = metrics.year_bounds();
    let mut interval = minor_interval_for_scale(effective_horizontal_scale);
    while (high - low) / interval > MAX_YEAR_MARKERS as f64 {
        interval *= 10.0;
    }
    let first = (low / interval).ceil() as i64;
    let last = (high / interval).floor() as i64;

    let mut markers: Vec<YearMarker> = (first..=last)
        .map(|step| {
            let year = step as f64 * interval;
            YearMarker {
                year,
                x: scale.pixel_x(Some(year)),
                is_major: year % MAJOR_INTERVAL_YEARS == 0.0,
            }
        })
        .collect();
    markers.sort_by(|a, b| a.x.total_cmp(&b.x));
    markers
}
