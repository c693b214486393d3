//! lineage-timeline: deterministic layout engine for time-scaled genealogies.
//!
//! A catalog of people and events goes through a pure pipeline (chronology,
//! metrics, year scale, stacking, label placement, arcs, extent) and comes
//! out as a [`layout::LayoutFrame`] of absolute geometry. Drawing stays behind
//! the [`render::Renderer`] trait.

pub mod api;
pub mod core;
pub mod error;
pub mod layout;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
pub use layout::{LayoutConfig, LayoutFrame, LayoutParams, compute_layout};
