use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::layout::{LayoutConfig, LayoutParams};
use crate::render::Theme;

/// Bootstrap configuration of a [`TimelineEngine`](super::TimelineEngine).
///
/// Serializable so hosts can persist the user's view (scales, hidden people,
/// expanded groups) between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub params: LayoutParams,
    #[serde(default)]
    pub theme: Theme,
    /// Explicit event selection; `None` selects every principal event.
    #[serde(default)]
    pub selected_event_ids: Option<Vec<String>>,
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_selected_events<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_event_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidData(format!("failed to parse config: {e}")))
    }
}
