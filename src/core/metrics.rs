use serde::{Deserialize, Serialize};

use crate::core::chronology::{ReferenceMode, display_year};
use crate::core::{Person, TimelineEvent};

/// Years added on both sides of the data range before rounding.
pub const RANGE_PADDING_YEARS: f64 = 100.0;
/// Range bounds are rounded outward to multiples of this value.
pub const RANGE_ROUNDING_YEARS: f64 = 100.0;
/// Canvas width floor at scale `1.0`.
pub const MIN_PIXEL_WIDTH: f64 = 1000.0;
/// Span used when nothing in the catalog can be placed in time.
pub const EMPTY_RANGE_SPAN_YEARS: f64 = 1000.0;

/// Visible year range and canvas width for one layout pass.
///
/// `display_start_year` is always the chronologically earliest end of the
/// axis, so in descending mode it is the larger number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineMetrics {
    pub display_start_year: f64,
    pub display_end_year: f64,
    pub total_pixel_width: f64,
    pub mode: ReferenceMode,
}

impl TimelineMetrics {
    #[must_use]
    pub fn span_years(self) -> f64 {
        (self.display_start_year - self.display_end_year).abs()
    }

    /// Lowest and highest display years regardless of orientation.
    #[must_use]
    pub fn year_bounds(self) -> (f64, f64) {
        (
            self.display_start_year.min(self.display_end_year),
            self.display_start_year.max(self.display_end_year),
        )
    }
}

/// Computes the padded year range and canvas width.
///
/// Only people with a birth year contribute (their birth and resolved death);
/// events contribute their year. The epoch itself is always part of the range,
/// and in descending mode so is display year 0.
#[must_use]
pub fn compute_metrics<'a, P, E>(
    people: P,
    events: E,
    mode: ReferenceMode,
    effective_horizontal_scale: f64,
    pixels_per_100_years: f64,
) -> TimelineMetrics
where
    P: IntoIterator<Item = &'a Person>,
    E: IntoIterator<Item = &'a TimelineEvent>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut placeable = false;

    let mut include = |year: Option<f64>| {
        if let Some(year) = year {
            min = min.min(year);
            max = max.max(year);
        }
    };

    for person in people {
        if person.birth_year.is_none() {
            continue;
        }
        placeable = true;
        include(display_year(person.birth_year, mode));
        include(display_year(person.death_year, mode));
    }
    for event in events {
        if event.year.is_some() {
            placeable = true;
            include(display_year(event.year, mode));
        }
    }

    if !placeable {
        return empty_range_metrics(mode, effective_horizontal_scale, pixels_per_100_years);
    }

    include(display_year(Some(0.0), mode));
    if mode.is_descending() {
        // The countdown axis always runs down to display year 0.
        include(Some(0.0));
    }

    let low = ((min - RANGE_PADDING_YEARS) / RANGE_ROUNDING_YEARS).floor() * RANGE_ROUNDING_YEARS;
    let high = ((max + RANGE_PADDING_YEARS) / RANGE_ROUNDING_YEARS).ceil() * RANGE_ROUNDING_YEARS;
    let (display_start_year, display_end_year) = if mode.is_descending() {
        (high, low)
    } else {
        (low, high)
    };

    let span = high - low;
    let estimated = pixels_per_100_years * (span / 100.0) * effective_horizontal_scale;

    TimelineMetrics {
        display_start_year,
        display_end_year,
        total_pixel_width: (MIN_PIXEL_WIDTH * effective_horizontal_scale).max(estimated),
        mode,
    }
}

fn empty_range_metrics(
    mode: ReferenceMode,
    effective_horizontal_scale: f64,
    pixels_per_100_years: f64,
) -> TimelineMetrics {
    let epoch = display_year(Some(0.0), mode).unwrap_or(0.0);
    let (display_start_year, display_end_year) = if mode.is_descending() {
        (
            epoch + RANGE_PADDING_YEARS,
            epoch - EMPTY_RANGE_SPAN_YEARS,
        )
    } else {
        (
            epoch - RANGE_PADDING_YEARS,
            epoch + EMPTY_RANGE_SPAN_YEARS - RANGE_PADDING_YEARS,
        )
    };

    TimelineMetrics {
        display_start_year,
        display_end_year,
        total_pixel_width: pixels_per_100_years
            * (EMPTY_RANGE_SPAN_YEARS / 100.0)
            * effective_horizontal_scale,
        mode,
    }
}
