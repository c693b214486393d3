use approx::assert_abs_diff_eq;
use lineage_timeline::core::{Catalog, Person, ReferenceMode};
use lineage_timeline::layout::arcs::{indicator_t, next_visible_descendant};
use lineage_timeline::layout::{LayoutConfig, LayoutParams, compute_layout};

fn chain(b_birth: f64) -> Catalog {
    Catalog::new(
        vec![
            Person::new("a", "A")
                .with_birth_year(0.0)
                .with_lifespan(900.0)
                .with_children(["b", "side"])
                .in_lineage(),
            Person::new("b", "B")
                .with_birth_year(b_birth)
                .with_lifespan(800.0)
                .with_father("a")
                .in_lineage(),
            Person::new("c", "C")
                .with_birth_year(250.0)
                .with_lifespan(700.0)
                .with_father("b")
                .in_lineage(),
            Person::new("side", "Side")
                .with_birth_year(50.0)
                .with_lifespan(60.0)
                .with_father("a"),
        ],
        Vec::new(),
    )
    .expect("catalog")
}

fn relative() -> LayoutParams {
    LayoutParams::default().with_reference_mode(ReferenceMode::Relative)
}

#[test]
fn every_visible_member_connects_to_its_lineage_child() {
    let frame =
        compute_layout(&chain(100.0), &relative(), &LayoutConfig::default()).expect("layout");

    let pairs: Vec<(&str, &str)> = frame
        .arcs
        .iter()
        .map(|arc| (arc.parent_id.as_str(), arc.child_id.as_str()))
        .collect();
    assert_eq!(pairs, [("a", "b"), ("b", "c")]);
    assert!(frame.arcs.iter().all(|arc| arc.indicators.is_empty()));

    let a = frame.bar("a").expect("a").rect;
    let b = frame.bar("b").expect("b").rect;
    let arc = &frame.arcs[0];
    assert_abs_diff_eq!(arc.curve.start.x, a.x + 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.curve.start.y, a.y + 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.curve.end.x, b.x + 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.curve.end.y, b.y + 25.0, epsilon = 1e-9);
    assert!(arc.curve.control.y > arc.curve.end.y);
    assert_abs_diff_eq!(
        arc.curve.control.x,
        (arc.curve.start.x + arc.curve.end.x) / 2.0,
        epsilon = 1e-9
    );
    assert!(arc.stroke_width >= 1.0);
}

#[test]
fn hidden_intermediate_gets_a_reveal_indicator() {
    let params = relative().with_hidden(["b"]);
    let frame = compute_layout(&chain(100.0), &params, &LayoutConfig::default()).expect("layout");

    assert_eq!(frame.arcs.len(), 1);
    let arc = &frame.arcs[0];
    assert_eq!((arc.parent_id.as_str(), arc.child_id.as_str()), ("a", "c"));
    assert_eq!(arc.indicators.len(), 1);

    let indicator = &arc.indicators[0];
    assert_eq!(indicator.person_id, "b");
    assert_eq!(indicator.name, "B");
    assert_abs_diff_eq!(indicator.t, 0.4, epsilon = 1e-12);
    let expected = arc.curve.point_at(0.4);
    assert_abs_diff_eq!(indicator.center.x, expected.x, epsilon = 1e-9);
    assert_abs_diff_eq!(indicator.center.y, expected.y, epsilon = 1e-9);
    assert_abs_diff_eq!(indicator.radius, 6.0 * 0.8, epsilon = 1e-12);
}

#[test]
fn indicator_position_is_clamped_away_from_endpoints() {
    let params = relative().with_hidden(["b"]);
    let frame = compute_layout(&chain(0.0), &params, &LayoutConfig::default()).expect("layout");
    assert_abs_diff_eq!(frame.arcs[0].indicators[0].t, 0.05, epsilon = 1e-12);

    let catalog = chain(400.0);
    let a = catalog.person("a").expect("a");
    let b = catalog.person("b").expect("b");
    let c = catalog.person("c").expect("c");
    assert_eq!(indicator_t(a, c, b), Some(0.95));
    assert_eq!(indicator_t(a, a, b), None);
}

#[test]
fn hidden_tail_produces_no_arc() {
    let params = relative().with_hidden(["c"]);
    let frame = compute_layout(&chain(100.0), &params, &LayoutConfig::default()).expect("layout");
    let pairs: Vec<(&str, &str)> = frame
        .arcs
        .iter()
        .map(|arc| (arc.parent_id.as_str(), arc.child_id.as_str()))
        .collect();
    assert_eq!(pairs, [("a", "b")]);
}

#[test]
fn descendant_walk_collects_skipped_members_in_chain_order() {
    let catalog = chain(100.0);
    let walk = next_visible_descendant(&catalog, "a", |person| person.id == "c").expect("walk");
    assert_eq!(walk.descendant.id, "c");
    let hidden: Vec<&str> = walk.hidden.iter().map(|person| person.id.as_str()).collect();
    assert_eq!(hidden, ["b"]);

    assert!(next_visible_descendant(&catalog, "a", |_| false).is_none());
    assert!(next_visible_descendant(&catalog, "side", |_| true).is_none());
}

#[test]
fn expanded_collaterals_get_shallow_arcs() {
    let params = relative().with_expanded("a");
    let frame = compute_layout(&chain(100.0), &params, &LayoutConfig::default()).expect("layout");

    assert_eq!(frame.collateral_arcs.len(), 1);
    let arc = &frame.collateral_arcs[0];
    assert_eq!(arc.parent_id, "a");
    assert_eq!(arc.person_id, "side");

    let a = frame.bar("a").expect("a").rect;
    let side = frame.bar("side").expect("side").rect;
    assert_abs_diff_eq!(arc.curve.start.x, a.x + a.width / 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.curve.start.y, a.y + 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.curve.end.x, side.x, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.curve.end.y, side.y + 12.0, epsilon = 1e-9);
    let expected_control_y = arc.curve.start.y + (arc.curve.end.y - arc.curve.start.y) * 0.7;
    assert_abs_diff_eq!(arc.curve.control.y, expected_control_y, epsilon = 1e-9);
    assert_eq!(arc.stroke_width, 1.0);

    let collapsed = compute_layout(&chain(100.0), &relative(), &LayoutConfig::default())
        .expect("layout");
    assert!(collapsed.collateral_arcs.is_empty());
}

#[test]
fn lineage_arcs_still_skip_over_an_expanded_block() {
    let params = relative().with_expanded("a");
    let frame = compute_layout(&chain(100.0), &params, &LayoutConfig::default()).expect("layout");
    let first = &frame.arcs[0];
    let b = frame.bar("b").expect("b").rect;
    assert_eq!(first.child_id, "b");
    assert_abs_diff_eq!(first.curve.end.y, b.y + 25.0, epsilon = 1e-9);
    // 105 + 60 for the parent row, then 24 + 5 + 10 for the block.
    assert_eq!(b.y, 204.0);
}
