//! Vertical placement of event labels.
//!
//! Events are processed left to right in a single pass. Each label tries the
//! slots right above and below the bars its line crosses, nearest first, then
//! falls back to a bounded downward scan. Placed labels are never revisited.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{ReferenceMode, TimelineEvent, YearScale, display_year};

use super::ScaledDimensions;
use super::geometry::Rect;

/// Worst-case number of positions tried by the downward scan for one label.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 200;

/// Score given to the top fallback candidate so anchored slots win.
const FALLBACK_SCORE: f64 = 10_000.0;

/// How a label position was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    /// Slot adjacent to a bar crossed by the event line.
    Anchored,
    /// Top fallback slot or a free slot found by the downward scan.
    Scanned,
    /// The scan ran out of attempts; the label may overlap other items.
    Exhausted,
}

/// Label position of one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedLabel {
    /// Index into the event slice given to [`LabelPlacer::place`].
    pub event_index: usize,
    pub display_year: f64,
    pub line_x: f64,
    pub label: Rect,
    pub outcome: PlacementOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    y: f64,
    score: f64,
    anchored: bool,
}

/// Collision-aware label placer for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacer {
    pub label_width: f64,
    pub label_height: f64,
    pub min_gap: f64,
    pub scan_step: f64,
    pub top_fallback_y: f64,
    /// Lines farther apart than this may share label rows.
    pub proximity_px: f64,
    pub max_attempts: usize,
}

impl LabelPlacer {
    #[must_use]
    pub fn new(dims: &ScaledDimensions, scale: YearScale, proximity_years: f64) -> Self {
        let top_fallback_y = dims
            .event_top_margin
            .max(dims.content_start_y - dims.event_label_height - dims.event_min_gap);
        Self {
            label_width: dims.event_label_width,
            label_height: dims.event_label_height,
            min_gap: dims.event_min_gap,
            scan_step: dims.event_scan_step,
            top_fallback_y,
            proximity_px: scale.pixels_for_years(proximity_years),
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Places a label for every event with a year; the rest are skipped.
    ///
    /// Output is ordered by line x; ties keep input order.
    #[must_use]
    pub fn place(
        &self,
        events: &[&TimelineEvent],
        mode: ReferenceMode,
        scale: YearScale,
        occupied: &[Rect],
    ) -> Vec<PlacedLabel> {
        let mut lines: Vec<(usize, f64, f64)> = events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| {
                let year = display_year(event.year, mode)?;
                Some((index, year, scale.pixel_x(Some(year))))
            })
            .collect();
        lines.sort_by_key(|(_, _, x)| OrderedFloat(*x));

        let mut placed: Vec<PlacedLabel> = Vec::with_capacity(lines.len());
        for (event_index, display_year, line_x) in lines {
            let (y, outcome) = self.place_one(line_x, occupied, &placed);
            if outcome == PlacementOutcome::Exhausted {
                warn!(
                    event = %events[event_index].id,
                    y,
                    attempts = self.max_attempts,
                    "label placement exhausted; keeping last scanned slot"
                );
            } else {
                trace!(event = %events[event_index].id, line_x, y, ?outcome, "label placed");
            }
            placed.push(PlacedLabel {
                event_index,
                display_year,
                line_x,
                label: self.label_rect(line_x, y),
                outcome,
            });
        }
        placed
    }

    fn label_rect(&self, line_x: f64, y: f64) -> Rect {
        Rect::new(
            line_x - self.label_width / 2.0,
            y,
            self.label_width,
            self.label_height,
        )
    }

    fn place_one(
        &self,
        line_x: f64,
        occupied: &[Rect],
        placed: &[PlacedLabel],
    ) -> (f64, PlacementOutcome) {
        let mut candidates: SmallVec<[Candidate; 8]> = SmallVec::new();
        for bar in occupied.iter().filter(|bar| bar.contains_x(line_x)) {
            let above = bar.y - self.label_height - self.min_gap;
            let below = bar.bottom() + self.min_gap;
            candidates.push(Candidate {
                y: above,
                score: (above - bar.y).abs(),
                anchored: true,
            });
            candidates.push(Candidate {
                y: below,
                score: (below - bar.bottom()).abs(),
                anchored: true,
            });
        }
        candidates.push(Candidate {
            y: self.top_fallback_y,
            score: FALLBACK_SCORE,
            anchored: false,
        });
        candidates.sort_by_key(|candidate| OrderedFloat(candidate.score));

        for candidate in &candidates {
            if candidate.y < 0.0 {
                continue;
            }
            if self.is_free(line_x, candidate.y, occupied, placed) {
                let outcome = if candidate.anchored {
                    PlacementOutcome::Anchored
                } else {
                    PlacementOutcome::Scanned
                };
                return (candidate.y, outcome);
            }
        }

        let mut y = self.top_fallback_y;
        let mut last_tested = y;
        for _ in 0..self.max_attempts {
            if self.is_free(line_x, y, occupied, placed) {
                return (y, PlacementOutcome::Scanned);
            }
            last_tested = y;
            y += self.scan_step;
        }
        (last_tested, PlacementOutcome::Exhausted)
    }

    fn is_free(&self, line_x: f64, y: f64, occupied: &[Rect], placed: &[PlacedLabel]) -> bool {
        let target = self.label_rect(line_x, y);
        let hits_bar = occupied
            .iter()
            .any(|bar| collides(target, *bar, self.min_gap));
        if hits_bar {
            return false;
        }
        !placed.iter().any(|other| {
            (line_x - other.line_x).abs() <= self.proximity_px
                && collides(target, other.label, self.min_gap)
        })
    }
}

fn collides(target: Rect, item: Rect, gap: f64) -> bool {
    target.overlaps_horizontally(item) && target.overlaps_vertically_with_gap(item, gap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placer() -> LabelPlacer {
        LabelPlacer {
            label_width: 20.0,
            label_height: 200.0,
            min_gap: 30.0,
            scan_step: 10.0,
            top_fallback_y: 5.0,
            proximity_px: 60.0,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    #[test]
    fn below_slot_wins_over_above_slot() {
        let bar = Rect::new(0.0, 300.0, 400.0, 50.0);
        let (y, outcome) = placer().place_one(100.0, &[bar], &[]);
        assert_eq!(outcome, PlacementOutcome::Anchored);
        assert_eq!(y, 380.0);
    }

    #[test]
    fn zero_attempts_keeps_fallback_slot() {
        // Overlaps the label column without containing the line, so no anchors.
        let blocker = Rect::new(101.0, 0.0, 400.0, 10_000.0);
        let (y, outcome) = placer()
            .with_max_attempts(0)
            .place_one(100.0, &[blocker], &[]);
        assert_eq!(outcome, PlacementOutcome::Exhausted);
        assert_eq!(y, 5.0);
    }
}
