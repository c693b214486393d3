use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Person, TimelineEvent};
use crate::error::{TimelineError, TimelineResult};

/// Serialized shape of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

/// Immutable people/event catalog.
///
/// People live in an id-keyed arena that keeps insertion order; relations are
/// plain id lookups. Construction resolves derived death years and validates
/// the `father_id` graph, so every parent-chain walk performed by the layout
/// engine terminates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    people: IndexMap<String, Person>,
    events: Vec<TimelineEvent>,
    /// Father id -> first lineage child (by birth year, then catalog order).
    lineage_child: IndexMap<String, String>,
    /// Person id -> position among all people sorted by birth year.
    birth_rank: IndexMap<String, usize>,
}

impl Catalog {
    pub fn new(people: Vec<Person>, events: Vec<TimelineEvent>) -> TimelineResult<Self> {
        let mut arena = IndexMap::with_capacity(people.len());
        for mut person in people {
            validate_person_years(&person)?;
            resolve_death_year(&mut person);
            if arena.contains_key(&person.id) {
                return Err(TimelineError::DuplicateId(person.id));
            }
            arena.insert(person.id.clone(), person);
        }

        for event in &events {
            if event.year.is_some_and(|year| !year.is_finite()) {
                return Err(TimelineError::InvalidData(format!(
                    "event `{}` year must be finite",
                    event.id
                )));
            }
        }

        validate_references(&arena)?;
        validate_acyclic(&arena)?;
        let lineage_child = index_lineage_children(&arena);
        let birth_rank = rank_by_birth(&arena);

        debug!(
            people = arena.len(),
            events = events.len(),
            lineage_links = lineage_child.len(),
            "catalog loaded"
        );

        Ok(Self {
            people: arena,
            events,
            lineage_child,
            birth_rank,
        })
    }

    pub fn from_document(document: CatalogDocument) -> TimelineResult<Self> {
        Self::new(document.people, document.events)
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let document: CatalogDocument = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse catalog json: {e}"))
        })?;
        Self::from_document(document)
    }

    #[must_use]
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            people: self.people.values().cloned().collect(),
            events: self.events.clone(),
        }
    }

    #[must_use]
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    #[must_use]
    pub fn people_len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    #[must_use]
    pub fn event(&self, id: &str) -> Option<&TimelineEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Lineage members ordered by birth year; an unknown birth sorts as `0`.
    ///
    /// The sort is stable, so ties keep catalog order.
    #[must_use]
    pub fn lineage_by_birth(&self) -> Vec<&Person> {
        let mut lineage: Vec<&Person> = self
            .people
            .values()
            .filter(|person| person.is_covenant_line)
            .collect();
        lineage.sort_by(|a, b| compare_birth(a, b));
        lineage
    }

    /// Position of `id` among all people ordered by birth year.
    ///
    /// Same ordering as [`Catalog::lineage_by_birth`], collaterals included.
    #[must_use]
    pub fn birth_rank(&self, id: &str) -> Option<usize> {
        self.birth_rank.get(id).copied()
    }

    /// Direct lineage child of `id`, if any.
    #[must_use]
    pub fn lineage_child_of(&self, id: &str) -> Option<&Person> {
        self.lineage_child
            .get(id)
            .and_then(|child_id| self.people.get(child_id))
    }

    /// Children of `id` that are not lineage members, in `children_ids` order.
    ///
    /// Ids with no catalog entry are skipped.
    #[must_use]
    pub fn collateral_children_of(&self, id: &str) -> Vec<&Person> {
        let Some(person) = self.people.get(id) else {
            return Vec::new();
        };
        person
            .children_ids
            .iter()
            .filter_map(|child_id| self.people.get(child_id))
            .filter(|child| !child.is_covenant_line)
            .collect()
    }
}

fn rank_by_birth(arena: &IndexMap<String, Person>) -> IndexMap<String, usize> {
    let mut ordered: Vec<&Person> = arena.values().collect();
    ordered.sort_by(|a, b| compare_birth(a, b));
    ordered
        .into_iter()
        .enumerate()
        .map(|(rank, person)| (person.id.clone(), rank))
        .collect()
}

pub(crate) fn compare_birth(a: &Person, b: &Person) -> Ordering {
    a.birth_year
        .unwrap_or(0.0)
        .total_cmp(&b.birth_year.unwrap_or(0.0))
}

/// Fills `death_year` from `birth_year + total_lifespan` when it is absent.
///
/// An explicit death year is never replaced, so applying this twice is a no-op.
pub fn resolve_death_year(person: &mut Person) {
    if person.death_year.is_some() {
        return;
    }
    if let (Some(birth), Some(lifespan)) = (person.birth_year, person.total_lifespan) {
        person.death_year = Some(birth + lifespan);
    }
}

fn validate_person_years(person: &Person) -> TimelineResult<()> {
    for (value, name) in [
        (person.birth_year, "birth year"),
        (person.death_year, "death year"),
        (person.total_lifespan, "lifespan"),
        (person.age_at_parenthood, "age at parenthood"),
    ] {
        if value.is_some_and(|value| !value.is_finite()) {
            return Err(TimelineError::InvalidData(format!(
                "person `{}` {name} must be finite",
                person.id
            )));
        }
    }
    if person.total_lifespan.is_some_and(|lifespan| lifespan < 0.0) {
        return Err(TimelineError::InvalidData(format!(
            "person `{}` lifespan must be >= 0",
            person.id
        )));
    }
    Ok(())
}

fn validate_references(people: &IndexMap<String, Person>) -> TimelineResult<()> {
    for person in people.values() {
        if let Some(father_id) = &person.father_id {
            if !people.contains_key(father_id) {
                return Err(TimelineError::UnknownReference {
                    id: person.id.clone(),
                    reference: father_id.clone(),
                });
            }
        }
        for child_id in &person.children_ids {
            if !people.contains_key(child_id) {
                warn!(
                    person = %person.id,
                    child = %child_id,
                    "ignoring child id with no catalog entry"
                );
            }
        }
    }
    Ok(())
}

fn validate_acyclic(people: &IndexMap<String, Person>) -> TimelineResult<()> {
    let limit = people.len();
    for person in people.values() {
        let mut current = person.father_id.as_deref();
        let mut steps = 0usize;
        while let Some(father_id) = current {
            steps += 1;
            if father_id == person.id || steps > limit {
                return Err(TimelineError::LineageCycle(person.id.clone()));
            }
            current = people
                .get(father_id)
                .and_then(|father| father.father_id.as_deref());
        }
    }
    Ok(())
}

fn index_lineage_children(people: &IndexMap<String, Person>) -> IndexMap<String, String> {
    let mut lineage: Vec<&Person> = people
        .values()
        .filter(|person| person.is_covenant_line)
        .collect();
    lineage.sort_by(|a, b| compare_birth(a, b));

    let mut index = IndexMap::new();
    for child in lineage {
        if let Some(father_id) = &child.father_id {
            index
                .entry(father_id.clone())
                .or_insert_with(|| child.id.clone());
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineage_child_prefers_earliest_birth() {
        let people = vec![
            Person::new("a", "A").with_birth_year(0.0).in_lineage(),
            Person::new("late", "Late")
                .with_birth_year(200.0)
                .with_father("a")
                .in_lineage(),
            Person::new("early", "Early")
                .with_birth_year(100.0)
                .with_father("a")
                .in_lineage(),
        ];
        let catalog = Catalog::new(people, Vec::new()).expect("catalog");
        let child = catalog.lineage_child_of("a").expect("child");
        assert_eq!(child.id, "early");
    }

    #[test]
    fn acyclic_check_flags_self_parent() {
        let people = vec![Person::new("a", "A").with_father("a")];
        let err = Catalog::new(people, Vec::new()).expect_err("cycle");
        assert!(matches!(err, TimelineError::LineageCycle(id) if id == "a"));
    }
}
