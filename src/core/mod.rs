pub mod catalog;
pub mod chronology;
pub mod metrics;
pub mod types;
pub mod year_markers;
pub mod year_scale;

pub use catalog::{Catalog, CatalogDocument, resolve_death_year};
pub use chronology::{DisplaySpan, REFERENCE_YEAR, ReferenceMode, display_span, display_year};
pub use metrics::{TimelineMetrics, compute_metrics};
pub use types::{EventCategory, Person, TimelineEvent};
pub use year_markers::{YearMarker, build_year_markers, minor_interval_for_scale};
pub use year_scale::YearScale;
