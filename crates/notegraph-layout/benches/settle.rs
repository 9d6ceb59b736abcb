use criterion::{Criterion, criterion_group, criterion_main};
use notegraph_core::{Entity, GraphBuilder, GraphConfig, LayoutConfig, Note};
use notegraph_layout::LayoutEngine;
use std::hint::black_box;

const LABELS: &[&str] = &[
    "PERSON", "ORG", "GPE", "LOC", "DATE", "EVENT", "PRODUCT", "WORK_OF_ART", "NORP", "FAC",
];

/// 120 notes over 10 labels, roughly what a busy notebook looks like.
fn mid_size_notes() -> Vec<Note> {
    (0..120usize)
        .map(|i| {
            let entities = (0..3usize).map(|k| {
                let label = LABELS[(i * 7 + k * 3) % LABELS.len()];
                Entity::new(format!("e{i}-{k}"), label)
            });
            Note::new(format!("n{i}"), format!("Note {i}")).with_entities(entities)
        })
        .collect()
}

fn bench_settle(c: &mut Criterion) {
    let graph = GraphBuilder::new(GraphConfig::default()).build(&mid_size_notes());
    let config = LayoutConfig::default();

    let mut group = c.benchmark_group("layout");
    group.sample_size(20);

    group.bench_function("settle_mid_size_graph", |b| {
        b.iter(|| {
            let mut engine = LayoutEngine::new(black_box(&graph), &config).expect("engine");
            let ticks = engine.run_until_settled(1_000);
            black_box((ticks, engine.position(0)));
        });
    });

    group.bench_function("single_tick_mid_size_graph", |b| {
        let mut engine = LayoutEngine::new(&graph, &config).expect("engine");
        b.iter(|| {
            black_box(engine.step());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_settle);
criterion_main!(benches);
