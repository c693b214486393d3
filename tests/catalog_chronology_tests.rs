use lineage_timeline::TimelineError;
use lineage_timeline::core::{
    Catalog, EventCategory, Person, REFERENCE_YEAR, ReferenceMode, TimelineEvent, display_span,
    display_year, resolve_death_year,
};

#[test]
fn display_year_converts_per_mode_and_propagates_absence() {
    assert_eq!(display_year(Some(0.0), ReferenceMode::Absolute), Some(REFERENCE_YEAR));
    assert_eq!(display_year(Some(1656.0), ReferenceMode::Absolute), Some(2192.0));
    assert_eq!(display_year(Some(1656.0), ReferenceMode::Relative), Some(1656.0));
    assert_eq!(display_year(None, ReferenceMode::Absolute), None);
    assert_eq!(display_year(None, ReferenceMode::Relative), None);
}

#[test]
fn display_span_uses_fallback_only_for_bar_end() {
    let span = display_span(Some(10.0), None, 100.0, ReferenceMode::Relative);
    assert_eq!(span.birth, Some(10.0));
    assert_eq!(span.death, None);
    assert_eq!(span.bar_end, Some(110.0));

    let span = display_span(Some(10.0), None, 100.0, ReferenceMode::Absolute);
    assert_eq!(span.bar_end, Some(REFERENCE_YEAR - 110.0));

    let span = display_span(None, None, 100.0, ReferenceMode::Relative);
    assert_eq!(span.bar_end, None);
}

#[test]
fn death_year_derivation_is_idempotent_and_never_overrides() {
    let mut derived = Person::new("adam", "Adão")
        .with_birth_year(0.0)
        .with_lifespan(930.0);
    resolve_death_year(&mut derived);
    assert_eq!(derived.death_year, Some(930.0));
    resolve_death_year(&mut derived);
    assert_eq!(derived.death_year, Some(930.0));

    let mut explicit = Person::new("x", "X")
        .with_birth_year(0.0)
        .with_lifespan(930.0)
        .with_death_year(900.0);
    resolve_death_year(&mut explicit);
    assert_eq!(explicit.death_year, Some(900.0));
}

#[test]
fn catalog_resolves_death_years_on_load() {
    let catalog = Catalog::new(
        vec![
            Person::new("adam", "Adão")
                .with_birth_year(0.0)
                .with_lifespan(930.0)
                .in_lineage(),
            Person::new("unknown", "Sem data").with_birth_year(50.0),
        ],
        Vec::new(),
    )
    .expect("catalog");

    let adam = catalog.person("adam").expect("adam");
    assert_eq!(adam.death_year, Some(930.0));
    assert!(!adam.is_death_unknown());
    assert!(catalog.person("unknown").expect("unknown").is_death_unknown());
}

#[test]
fn lineage_order_treats_missing_birth_as_epoch() {
    let catalog = Catalog::new(
        vec![
            Person::new("late", "Late").with_birth_year(300.0).in_lineage(),
            Person::new("undated", "Undated").in_lineage(),
            Person::new("negative", "Negative").with_birth_year(-20.0).in_lineage(),
            Person::new("first", "First").with_birth_year(0.0).in_lineage(),
            Person::new("collateral", "Collateral").with_birth_year(-100.0),
        ],
        Vec::new(),
    )
    .expect("catalog");

    let order: Vec<&str> = catalog
        .lineage_by_birth()
        .iter()
        .map(|person| person.id.as_str())
        .collect();
    // Stable sort: `undated` and `first` both sort as 0 and keep catalog order.
    assert_eq!(order, ["negative", "undated", "first", "late"]);
}

#[test]
fn collateral_children_skip_lineage_and_dangling_ids() {
    let catalog = Catalog::new(
        vec![
            Person::new("adam", "Adão")
                .with_birth_year(0.0)
                .with_children(["cain", "seth", "missing", "abel"])
                .in_lineage(),
            Person::new("cain", "Caim").with_father("adam"),
            Person::new("abel", "Abel").with_father("adam"),
            Person::new("seth", "Sete")
                .with_birth_year(130.0)
                .with_father("adam")
                .in_lineage(),
        ],
        Vec::new(),
    )
    .expect("dangling child ids are tolerated");

    let collaterals: Vec<&str> = catalog
        .collateral_children_of("adam")
        .iter()
        .map(|person| person.id.as_str())
        .collect();
    assert_eq!(collaterals, ["cain", "abel"]);
    assert_eq!(
        catalog.lineage_child_of("adam").map(|p| p.id.as_str()),
        Some("seth")
    );
    assert!(catalog.lineage_child_of("seth").is_none());
}

#[test]
fn catalog_rejects_contract_violations() {
    let duplicate = Catalog::new(
        vec![Person::new("a", "A"), Person::new("a", "Again")],
        Vec::new(),
    );
    assert!(matches!(duplicate, Err(TimelineError::DuplicateId(id)) if id == "a"));

    let unknown_father = Catalog::new(vec![Person::new("a", "A").with_father("ghost")], Vec::new());
    assert!(matches!(
        unknown_father,
        Err(TimelineError::UnknownReference { id, reference }) if id == "a" && reference == "ghost"
    ));

    let cycle = Catalog::new(
        vec![
            Person::new("a", "A").with_father("b"),
            Person::new("b", "B").with_father("a"),
        ],
        Vec::new(),
    );
    assert!(matches!(cycle, Err(TimelineError::LineageCycle(_))));

    let negative_lifespan = Catalog::new(
        vec![Person::new("a", "A").with_birth_year(0.0).with_lifespan(-1.0)],
        Vec::new(),
    );
    assert!(matches!(negative_lifespan, Err(TimelineError::InvalidData(_))));

    let nan_event = Catalog::new(
        Vec::new(),
        vec![TimelineEvent::new("e", "E", EventCategory::Minor).at_year(f64::NAN)],
    );
    assert!(matches!(nan_event, Err(TimelineError::InvalidData(_))));
}

#[test]
fn catalog_loads_from_camel_case_json() {
    let input = r#"{
        "people": [
            { "id": "adam", "name": "Adão", "birthYear": 0, "totalLifespan": 930,
              "childrenIds": ["seth"], "isCovenantLine": true },
            { "id": "seth", "name": "Sete", "birthYear": 130, "deathYear": 1042,
              "fatherId": "adam", "isCovenantLine": true }
        ],
        "events": [
            { "id": "flood", "name": "Dilúvio", "year": 1656, "category": "principal",
              "characterIds": ["noah"] },
            { "id": "undated", "name": "Sem ano", "category": "menor" }
        ]
    }"#;

    let catalog = Catalog::from_json_str(input).expect("catalog json");
    assert_eq!(catalog.people_len(), 2);
    assert_eq!(catalog.person("adam").and_then(|p| p.death_year), Some(930.0));
    assert_eq!(catalog.event("flood").and_then(|e| e.year), Some(1656.0));
    assert_eq!(
        catalog.event("undated").map(|e| e.category),
        Some(EventCategory::Minor)
    );

    let document = catalog.to_document();
    let reloaded = Catalog::from_document(document).expect("round trip");
    assert_eq!(reloaded, catalog);
}

#[test]
fn malformed_catalog_json_is_invalid_data() {
    let err = Catalog::from_json_str("{ \"people\": [ { \"name\": 1 } ] }").expect_err("bad json");
    assert!(matches!(err, TimelineError::InvalidData(_)));
}
