use criterion::{Criterion, criterion_group, criterion_main};
use notegraph::view::HeadlessRenderer;
use notegraph::{GraphBuilder, GraphConfig, notes_from_json};
use std::hint::black_box;

const BASIC: &str = include_str!("../../../fixtures/notes/basic.json");

fn bench_pipeline(c: &mut Criterion) {
    let notes = notes_from_json(BASIC).expect("fixture notes");
    let renderer = HeadlessRenderer::new();

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(30);

    group.bench_function("build_graph", |b| {
        let builder = GraphBuilder::new(GraphConfig::default());
        b.iter(|| black_box(builder.build(black_box(&notes))));
    });

    group.bench_function("settle_and_render_svg", |b| {
        b.iter(|| {
            let svg = renderer
                .render_svg(black_box(notes.clone()))
                .expect("render");
            black_box(svg.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
