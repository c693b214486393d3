use serde::{Deserialize, Serialize};

/// Calendar year that relative year `0` maps to in [`ReferenceMode::Absolute`].
pub const REFERENCE_YEAR: f64 = 3848.0;

/// How relative catalog years are shown on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferenceMode {
    /// Countdown to a fixed historical point: larger numbers are earlier.
    #[default]
    #[serde(rename = "AC")]
    Absolute,
    /// Raw offsets from the epoch: larger numbers are later.
    Relative,
}

impl ReferenceMode {
    /// `true` when display years decrease as time moves forward.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Absolute)
    }

    /// Unit suffix appended to formatted years.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Absolute => "aC",
            Self::Relative => "",
        }
    }

    #[must_use]
    pub fn display_year(self, relative_year: Option<f64>) -> Option<f64> {
        display_year(relative_year, self)
    }
}

/// Converts a relative catalog year into the year shown under `mode`.
///
/// Absence propagates: `None` never turns into the epoch.
#[must_use]
pub fn display_year(relative_year: Option<f64>, mode: ReferenceMode) -> Option<f64> {
    let relative_year = relative_year?;
    Some(match mode {
        ReferenceMode::Absolute => REFERENCE_YEAR - relative_year,
        ReferenceMode::Relative => relative_year,
    })
}

/// Birth/death pair of one person in display years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySpan {
    pub birth: Option<f64>,
    pub death: Option<f64>,
    /// End used only for bar width when no death information exists.
    pub bar_end: Option<f64>,
}

/// Resolves the display span of a catalog person.
///
/// `death_year` is expected to be already derived by the catalog; the
/// synthetic `fallback_lifespan` only feeds `bar_end`.
#[must_use]
pub fn display_span(
    birth_year: Option<f64>,
    death_year: Option<f64>,
    fallback_lifespan: f64,
    mode: ReferenceMode,
) -> DisplaySpan {
    let birth = display_year(birth_year, mode);
    let death = display_year(death_year, mode);
    let bar_end = death.or_else(|| display_year(birth_year.map(|b| b + fallback_lifespan), mode));
    DisplaySpan {
        birth,
        death,
        bar_end,
    }
}
