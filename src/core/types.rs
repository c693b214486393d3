use serde::{Deserialize, Serialize};

/// One node of the genealogy.
///
/// Years are offsets from the catalog epoch (the first lineage birth). They
/// are `f64` because several estimates in real catalogs fall on half years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_lifespan: Option<f64>,
    /// Age when the next lineage member was born. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_at_parenthood: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouse_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_event_ids: Vec<String>,
    #[serde(default)]
    pub is_covenant_line: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bible_reference: Option<String>,
}

impl Person {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_year: None,
            death_year: None,
            total_lifespan: None,
            age_at_parenthood: None,
            father_id: None,
            mother_id: None,
            spouse_ids: Vec::new(),
            children_ids: Vec::new(),
            key_event_ids: Vec::new(),
            is_covenant_line: false,
            name_meaning: None,
            description: None,
            bible_reference: None,
        }
    }

    #[must_use]
    pub fn with_birth_year(mut self, year: f64) -> Self {
        self.birth_year = Some(year);
        self
    }

    #[must_use]
    pub fn with_death_year(mut self, year: f64) -> Self {
        self.death_year = Some(year);
        self
    }

    #[must_use]
    pub fn with_lifespan(mut self, years: f64) -> Self {
        self.total_lifespan = Some(years);
        self
    }

    #[must_use]
    pub fn with_age_at_parenthood(mut self, years: f64) -> Self {
        self.age_at_parenthood = Some(years);
        self
    }

    #[must_use]
    pub fn with_father(mut self, father_id: impl Into<String>) -> Self {
        self.father_id = Some(father_id.into());
        self
    }

    #[must_use]
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children_ids = children.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the person as a member of the primary lineage.
    #[must_use]
    pub fn in_lineage(mut self) -> Self {
        self.is_covenant_line = true;
        self
    }

    /// `true` when neither an explicit death year nor a lifespan is known.
    #[must_use]
    pub fn is_death_unknown(&self) -> bool {
        self.death_year.is_none() && self.total_lifespan.is_none()
    }
}

/// UI grouping for events. Does not influence layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "principal")]
    Principal,
    #[serde(rename = "secundario")]
    Secondary,
    #[serde(rename = "menor")]
    Minor,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [Self::Principal, Self::Secondary, Self::Minor];
}

/// Point-in-time occurrence drawn as a vertical line with a vertical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub character_ids: Vec<String>,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bible_reference: Option<String>,
}

impl TimelineEvent {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: EventCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year: None,
            description: String::new(),
            character_ids: Vec::new(),
            category,
            chapter: None,
            bible_reference: None,
        }
    }

    #[must_use]
    pub fn at_year(mut self, year: f64) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_characters<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.character_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}
