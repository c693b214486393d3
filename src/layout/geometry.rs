use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in content pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment of a vertical line.
    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        x >= self.x && x <= self.right()
    }

    /// Open-interval overlap on the x axis; touching edges do not overlap.
    #[must_use]
    pub fn overlaps_horizontally(self, other: Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Overlap on the y axis after growing `other` by `gap` on both sides.
    #[must_use]
    pub fn overlaps_vertically_with_gap(self, other: Rect, gap: f64) -> bool {
        self.y < other.bottom() + gap && self.bottom() + gap > other.y
    }

    #[must_use]
    pub fn intersects(self, other: Rect) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically_with_gap(other, 0.0)
    }
}

/// Quadratic Bézier curve used for lineage and collateral connectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadCurve {
    #[must_use]
    pub fn point_at(self, t: f64) -> Point {
        let u = 1.0 - t;
        Point {
            x: u * u * self.start.x + 2.0 * u * t * self.control.x + t * t * self.end.x,
            y: u * u * self.start.y + 2.0 * u * t * self.control.y + t * t * self.end.y,
        }
    }

    /// SVG path data (`M .. Q ..`).
    #[must_use]
    pub fn to_svg_path(self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}
