use crate::core::{Person, ReferenceMode};

/// Placeholder for a death year that cannot be shown for another reason.
pub const UNKNOWN_LIFE_TEXT: &str = "Vida desconhecida";
/// Prefix of the death tag drawn by life-line overlays.
pub const DEATH_MARK: char = '\u{271D}';

/// Rounds half up, matching how year labels are shown everywhere else.
#[must_use]
pub fn round_year(year: f64) -> f64 {
    (year + 0.5).floor()
}

fn year_text(year: f64) -> String {
    format!("{}", round_year(year))
}

/// `1848aC`, `930`, ...
#[must_use]
pub fn format_year(year: f64, mode: ReferenceMode) -> String {
    format!("{}{}", year_text(year), mode.suffix())
}

/// Ruler tick text: `3500 aC` or `500`.
#[must_use]
pub fn format_marker_year(year: f64, mode: ReferenceMode) -> String {
    match mode.suffix() {
        "" => year_text(year),
        suffix => format!("{} {suffix}", year_text(year)),
    }
}

/// Lifespan in years: the catalog lifespan, else the explicit death minus birth.
#[must_use]
pub fn lifespan_years(person: &Person) -> Option<f64> {
    let birth = person.birth_year?;
    person
        .total_lifespan
        .or_else(|| person.death_year.map(|death| death - birth))
}

/// Bar subtitle: `{birth} - {death} ({n} anos)`.
#[must_use]
pub fn format_life_range(
    person: &Person,
    display_birth: Option<f64>,
    display_death: Option<f64>,
    mode: ReferenceMode,
) -> String {
    let birth = display_birth.map_or_else(|| "?".to_owned(), |year| format_year(year, mode));
    let death = match display_death {
        Some(year) => format_year(year, mode),
        None if person.is_death_unknown() => "?".to_owned(),
        None => UNKNOWN_LIFE_TEXT.to_owned(),
    };
    match lifespan_years(person) {
        Some(years) => format!("{birth} - {death} ({years} anos)"),
        None => format!("{birth} - {death}"),
    }
}

/// Hover text of an event line.
#[must_use]
pub fn format_event_title(name: &str, display_year: f64, mode: ReferenceMode) -> String {
    format!("{name} (Ano {})", format_marker_year(display_year, mode))
}

#[must_use]
pub fn format_death_tag(display_death: Option<f64>, mode: ReferenceMode) -> String {
    let year = display_death
        .map_or_else(|| format!("?{}", mode.suffix()), |year| format_year(year, mode));
    format!("{DEATH_MARK} {year}")
}
