use criterion::{Criterion, criterion_group, criterion_main};
use lineage_timeline::api::{TimelineEngine, TimelineEngineConfig};
use lineage_timeline::core::{Catalog, EventCategory, Person, ReferenceMode, TimelineEvent};
use lineage_timeline::layout::{LayoutConfig, LayoutParams, compute_layout};
use lineage_timeline::render::NullRenderer;
use std::hint::black_box;

fn generated_catalog(lineage_len: usize, collaterals: usize, events: usize) -> Catalog {
    let mut people = Vec::with_capacity(lineage_len * (collaterals + 1));
    for i in 0..lineage_len {
        let birth = i as f64 * 90.0;
        let mut children: Vec<String> = (0..collaterals).map(|c| format!("c{i}_{c}")).collect();
        if i + 1 < lineage_len {
            children.push(format!("l{}", i + 1));
        }
        let mut person = Person::new(format!("l{i}"), format!("Lineage {i}"))
            .with_birth_year(birth)
            .with_lifespan(400.0 + (i % 7) as f64 * 60.0)
            .with_children(children)
            .in_lineage();
        if i > 0 {
            person = person.with_father(format!("l{}", i - 1));
        }
        people.push(person);
        for c in 0..collaterals {
            people.push(
                Person::new(format!("c{i}_{c}"), format!("Collateral {i}.{c}"))
                    .with_birth_year(birth + 30.0 + c as f64 * 10.0)
                    .with_lifespan(120.0)
                    .with_father(format!("l{i}")),
            );
        }
    }

    let span = lineage_len as f64 * 90.0;
    let events = (0..events)
        .map(|i| {
            TimelineEvent::new(format!("e{i}"), format!("Event {i}"), EventCategory::Principal)
                .at_year((i as f64 * 37.0) % span)
        })
        .collect();

    Catalog::new(people, events).expect("generated catalog")
}

fn bench_layout_pass(catalog: &Catalog, c: &mut Criterion, name: &str) {
    let expanded = (0..5).fold(
        LayoutParams::default().with_reference_mode(ReferenceMode::Relative),
        |params, i| params.with_expanded(format!("l{}", i * 3)),
    );
    let config = LayoutConfig::default();

    c.bench_function(name, |b| {
        b.iter(|| {
            let _ = compute_layout(black_box(catalog), black_box(&expanded), black_box(&config))
                .expect("layout should succeed");
        })
    });
}

fn bench_layout_small(c: &mut Criterion) {
    let catalog = generated_catalog(30, 3, 40);
    bench_layout_pass(&catalog, c, "layout_pass_30_lineage_40_events");
}

fn bench_layout_large(c: &mut Criterion) {
    let catalog = generated_catalog(200, 4, 400);
    bench_layout_pass(&catalog, c, "layout_pass_200_lineage_400_events");
}

fn bench_engine_render(c: &mut Criterion) {
    let catalog = generated_catalog(60, 2, 120);
    let mut engine = TimelineEngine::new(
        NullRenderer::default(),
        catalog,
        TimelineEngineConfig::default(),
    )
    .expect("engine init");

    c.bench_function("engine_render_60_lineage", |b| {
        b.iter(|| {
            let _ = engine.render().expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_layout_small,
    bench_layout_large,
    bench_engine_render
);
criterion_main!(benches);
