use serde::{Deserialize, Serialize};

use crate::core::TimelineMetrics;

/// Linear mapping between display years and horizontal pixels.
///
/// Descending metrics flip the subtraction order, so chronologically earlier
/// years always land at smaller x. A zero-span range maps everything to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearScale {
    start_year: f64,
    span_years: f64,
    total_pixel_width: f64,
    descending: bool,
}

impl YearScale {
    #[must_use]
    pub fn new(metrics: TimelineMetrics) -> Self {
        Self {
            start_year: metrics.display_start_year,
            span_years: metrics.span_years(),
            total_pixel_width: metrics.total_pixel_width,
            descending: metrics.mode.is_descending(),
        }
    }

    #[must_use]
    pub fn total_pixel_width(self) -> f64 {
        self.total_pixel_width
    }

    fn is_degenerate(self) -> bool {
        self.span_years <= 0.0 || !self.span_years.is_finite()
    }

    /// Pixel offset of a display year; `None` maps to `0`.
    #[must_use]
    pub fn pixel_x(self, display_year: Option<f64>) -> f64 {
        let Some(year) = display_year else {
            return 0.0;
        };
        if self.is_degenerate() {
            return 0.0;
        }
        let offset = if self.descending {
            self.start_year - year
        } else {
            year - self.start_year
        };
        (offset / self.span_years) * self.total_pixel_width
    }

    /// Inverse of [`YearScale::pixel_x`].
    #[must_use]
    pub fn year_at(self, pixel: f64) -> f64 {
        if self.is_degenerate() || self.total_pixel_width <= 0.0 {
            return self.start_year;
        }
        let offset = (pixel / self.total_pixel_width) * self.span_years;
        if self.descending {
            self.start_year - offset
        } else {
            self.start_year + offset
        }
    }

    /// Horizontal pixel distance covering `years`.
    #[must_use]
    pub fn pixels_for_years(self, years: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (years / self.span_years) * self.total_pixel_width
    }
}
