//! Benchmarks for render-state derivation and the proposal cycle.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rangeslider_core::{
    data_to_state, options_to_data, GridConfig, GridOption, HandleId, Model, OneOrMany, Options,
    Orientation, Proposal, TooltipId, ValueFormat,
};

fn options(handles: usize) -> Options {
    Options {
        value: OneOrMany::Many((0..handles).map(|i| i as f64 * 10.0).collect()),
        min: 0.0,
        max: handles as f64 * 10.0,
        step: 1.0,
        orientation: Orientation::Horizontal,
        tooltips: OneOrMany::One(true),
        intervals: OneOrMany::One(true),
        grid: GridOption::Config(GridConfig {
            is_visible: true,
            num_cells: vec![4, 5, 2],
        }),
        css_class: "range-slider".to_string(),
        tooltip_format: ValueFormat::Plain,
        grid_format: ValueFormat::Plain,
    }
}

fn bench_data_to_state(c: &mut Criterion) {
    let data = options_to_data(&options(8));

    c.bench_function("data_to_state", |b| b.iter(|| data_to_state(black_box(&data))));
}

fn bench_data_to_state_merged(c: &mut Criterion) {
    let mut data = options_to_data(&options(8));
    data.tooltip_collisions = vec![
        (0..4).map(TooltipId).collect(),
        (4..8).map(TooltipId).collect(),
    ];

    c.bench_function("data_to_state_merged", |b| {
        b.iter(|| data_to_state(black_box(&data)))
    });
}

fn bench_propose_drag_move(c: &mut Criterion) {
    let mut model = Model::from_options(&options(8));
    let mut raw = 0.0;

    c.bench_function("propose_drag_move", |b| {
        b.iter(|| {
            raw = if raw >= 9.0 { 0.0 } else { raw + 1.0 };
            model.propose(Proposal::drag_move(HandleId(0), black_box(raw)))
        })
    });
}

criterion_group!(
    benches,
    bench_data_to_state,
    bench_data_to_state_merged,
    bench_propose_drag_move,
);
criterion_main!(benches);
