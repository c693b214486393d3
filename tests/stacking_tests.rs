use approx::assert_abs_diff_eq;
use lineage_timeline::core::{Catalog, Person, ReferenceMode};
use lineage_timeline::layout::{BarKind, LayoutConfig, LayoutParams, compute_layout};

fn family() -> Catalog {
    Catalog::new(
        vec![
            Person::new("adam", "Adão")
                .with_birth_year(0.0)
                .with_lifespan(930.0)
                .with_children(["seth", "cain", "abel"])
                .in_lineage(),
            Person::new("cain", "Caim").with_father("adam"),
            Person::new("abel", "Abel")
                .with_birth_year(2.0)
                .with_lifespan(20.0)
                .with_father("adam"),
            Person::new("seth", "Sete")
                .with_birth_year(130.0)
                .with_lifespan(912.0)
                .with_father("adam")
                .in_lineage(),
            Person::new("enos", "Enos")
                .with_birth_year(235.0)
                .with_lifespan(905.0)
                .with_father("seth")
                .in_lineage(),
        ],
        Vec::new(),
    )
    .expect("catalog")
}

fn relative() -> LayoutParams {
    LayoutParams::default().with_reference_mode(ReferenceMode::Relative)
}

#[test]
fn lineage_bars_stack_in_birth_order_below_the_pinned_ruler() {
    let frame = compute_layout(&family(), &relative(), &LayoutConfig::default()).expect("layout");

    let ys: Vec<(&str, f64)> = frame
        .lineage_bars()
        .map(|bar| (bar.id.as_str(), bar.rect.y))
        .collect();
    // Ruler 80 + gap 25, then one 50 + 10 pitch per bar.
    assert_eq!(ys, [("adam", 105.0), ("seth", 165.0), ("enos", 225.0)]);
    assert!(frame.lineage_bars().all(|bar| bar.rect.height == 50.0));
    assert_eq!(frame.bars.len(), 3, "collapsed groups stay out of the frame");
}

#[test]
fn scrolling_ruler_starts_content_near_the_top() {
    let params = relative().with_ruler_pinned(false);
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");
    assert_eq!(frame.bar("adam").map(|bar| bar.rect.y), Some(15.0));
}

#[test]
fn expanded_group_reserves_a_block_under_its_parent() {
    let params = relative().with_expanded("adam");
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");

    let order: Vec<&str> = frame.bars.iter().map(|bar| bar.id.as_str()).collect();
    assert_eq!(order, ["adam", "cain", "abel", "seth", "enos"]);

    let cain = frame.bar("cain").expect("cain");
    let abel = frame.bar("abel").expect("abel");
    assert_eq!(cain.rect.y, 165.0);
    assert_eq!(abel.rect.y, 194.0);
    assert_eq!(cain.rect.height, 24.0);
    // Two slots of 24 + 5 plus the 10 px gap after the block.
    assert_eq!(frame.bar("seth").map(|bar| bar.rect.y), Some(233.0));
    assert_eq!(frame.bar("enos").map(|bar| bar.rect.y), Some(293.0));

    assert_eq!(
        cain.kind,
        BarKind::Collateral {
            parent_id: "adam".to_owned()
        }
    );
    assert_eq!(cain.palette_index, 1);
    assert_eq!(abel.palette_index, 2);
    assert_eq!(frame.bar("seth").map(|bar| bar.palette_index), Some(1));
}

#[test]
fn collateral_palette_follows_birth_order_across_the_catalog() {
    let catalog = Catalog::new(
        vec![
            Person::new("adam", "Adão")
                .with_birth_year(0.0)
                .with_lifespan(930.0)
                .with_children(["abel", "seth"])
                .in_lineage(),
            Person::new("abel", "Abel")
                .with_birth_year(2.0)
                .with_lifespan(20.0)
                .with_father("adam"),
            Person::new("seth", "Sete")
                .with_birth_year(130.0)
                .with_lifespan(912.0)
                .with_children(["noam", "enos"])
                .with_father("adam")
                .in_lineage(),
            Person::new("noam", "Noam")
                .with_birth_year(200.0)
                .with_lifespan(50.0)
                .with_father("seth"),
            Person::new("enos", "Enos")
                .with_birth_year(235.0)
                .with_lifespan(905.0)
                .with_father("seth")
                .in_lineage(),
        ],
        Vec::new(),
    )
    .expect("catalog");
    assert_eq!(catalog.birth_rank("noam"), Some(3));
    assert_eq!(catalog.birth_rank("ghost"), None);

    let params = relative().with_expanded("adam").with_expanded("seth");
    let frame = compute_layout(&catalog, &params, &LayoutConfig::default()).expect("layout");
    assert_eq!(frame.bar("abel").map(|bar| bar.palette_index), Some(1));
    assert_eq!(frame.bar("noam").map(|bar| bar.palette_index), Some(3));
    // Lineage bars keep their lineage position.
    assert_eq!(frame.bar("seth").map(|bar| bar.palette_index), Some(1));
    assert_eq!(frame.bar("enos").map(|bar| bar.palette_index), Some(2));
}

#[test]
fn undated_collateral_starts_at_its_parent_with_minimum_width() {
    let params = relative().with_expanded("adam");
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");

    let adam = frame.bar("adam").expect("adam");
    let cain = frame.bar("cain").expect("cain");
    assert_eq!(cain.rect.x, adam.rect.x);
    assert_eq!(cain.rect.width, 30.0);
    assert!(cain.death_unknown);

    let abel = frame.bar("abel").expect("abel");
    assert!(abel.rect.width >= 30.0);
}

#[test]
fn hidden_collaterals_shrink_the_block() {
    let params = relative().with_expanded("adam").with_hidden(["cain"]);
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");

    assert!(frame.bar("cain").is_none());
    let abel = frame.bar("abel").expect("abel");
    assert_eq!(abel.rect.y, 165.0);
    assert_eq!(abel.palette_index, 2, "palette keeps the birth rank");
    assert_eq!(frame.bar("seth").map(|bar| bar.rect.y), Some(204.0));
}

#[test]
fn expanded_group_without_visible_members_takes_no_space() {
    let params = relative()
        .with_expanded("adam")
        .with_hidden(["cain", "abel"]);
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");

    assert_eq!(frame.bar("seth").map(|bar| bar.rect.y), Some(165.0));
    let adam = frame.bar("adam").expect("adam");
    assert!(adam.expanded);
    assert!(!adam.has_expandable_collaterals);
}

#[test]
fn hidden_lineage_members_leave_no_gap() {
    let params = relative().with_hidden(["seth"]);
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");

    assert!(frame.bar("seth").is_none());
    assert_eq!(frame.bar("enos").map(|bar| bar.rect.y), Some(165.0));
    // Palette follows the full lineage order, hidden members included.
    assert_eq!(frame.bar("enos").map(|bar| bar.palette_index), Some(2));
}

#[test]
fn bar_controls_flag_expandable_groups() {
    let frame = compute_layout(&family(), &relative(), &LayoutConfig::default()).expect("layout");
    assert_eq!(
        frame.bar("adam").map(|bar| bar.has_expandable_collaterals),
        Some(true)
    );
    assert_eq!(
        frame.bar("seth").map(|bar| bar.has_expandable_collaterals),
        Some(false)
    );

    let mut params = relative();
    params.show_bar_controls = false;
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");
    assert_eq!(
        frame.bar("adam").map(|bar| bar.has_expandable_collaterals),
        Some(false)
    );
}

#[test]
fn vertical_scale_multiplies_heights_and_gaps() {
    let params = relative().with_scales(1.0, 2.0, 1.0);
    let frame = compute_layout(&family(), &params, &LayoutConfig::default()).expect("layout");

    let adam = frame.bar("adam").expect("adam");
    let seth = frame.bar("seth").expect("seth");
    assert_abs_diff_eq!(adam.rect.height, 100.0, epsilon = 1e-9);
    // Ruler height follows only the UI scale; the gap below it follows v.
    assert_abs_diff_eq!(adam.rect.y, 80.0 + 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(seth.rect.y - adam.rect.y, 120.0, epsilon = 1e-9);
}

#[test]
fn bar_width_spans_birth_to_death() {
    let frame = compute_layout(&family(), &relative(), &LayoutConfig::default()).expect("layout");
    let adam = frame.bar("adam").expect("adam");
    // 2 px per year at the default scale.
    assert_abs_diff_eq!(adam.rect.width, 1860.0, epsilon = 1e-6);
    assert_eq!(adam.display_birth, Some(0.0));
    assert_eq!(adam.display_death, Some(930.0));
}
