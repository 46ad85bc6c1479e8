//! Benchmarks for the grid layout pass.
//!
//! Run with: cargo bench -p gridkit-layout

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gridkit_layout::{
    Axis, Edges, Grid, GridConfig, Host, HostError, ItemHandle, Placement, PushOptions,
    SlotConfig, Spacing, TargetRect, compute_cells,
};

/// An axis of `n` slots cycling through fixed and weighted sizing.
fn make_axis(label: &str, n: usize) -> Axis {
    let mut axis = Axis::new(label, n);
    for i in 0..n {
        let config = match i % 3 {
            0 => SlotConfig::default().size(24.0),
            1 => SlotConfig::default().weight(2.0),
            _ => SlotConfig::default().weight(1.0).padding(Some(2.0), Some(2.0)),
        };
        axis.configure_slot(i, config).expect("slot in range");
    }
    axis
}

fn bench_compute_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/compute_cells");
    for n in [2, 8, 32, 64] {
        let cols = make_axis("x", n);
        let rows = make_axis("y", n);
        group.bench_with_input(BenchmarkId::new("square", n), &(cols, rows), |b, (cols, rows)| {
            b.iter(|| {
                black_box(compute_cells(
                    cols,
                    rows,
                    1920.0,
                    1080.0,
                    Edges::all(4.0),
                    Edges::all(1.0),
                    Spacing::new(2.0, 2.0),
                ))
            })
        });
    }
    group.finish();
}

fn bench_redraw(c: &mut Criterion) {
    gridkit_core::context::initialize();
    let mut group = c.benchmark_group("layout/redraw");

    for items in [10u64, 100, 1000] {
        let provider = |_: Option<&ItemHandle>| -> Result<TargetRect, HostError> {
            Ok(TargetRect::visible(1920, 1080))
        };
        let consumer = |item: &ItemHandle, placement: Placement| -> Result<(), HostError> {
            black_box((item, placement));
            Ok(())
        };
        let host = Host::new(Arc::new(provider), Arc::new(consumer));
        let grid = Grid::new(
            host,
            GridConfig::new()
                .cols(12)
                .rows(12)
                .spacing(4.0, 4.0)
                .target("window"),
        )
        .expect("grid");
        for id in 0..items {
            let col = (id % 12) as i32;
            let row = ((id / 12) % 12) as i32;
            grid.push(id, ((col, row), (col + 1, row)), PushOptions::new().max_size(80.0, 0.0))
                .expect("push");
        }

        group.bench_with_input(BenchmarkId::new("items", items), &grid, |b, grid| {
            b.iter(|| black_box(grid.redraw().expect("redraw")))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_cells, bench_redraw);
criterion_main!(benches);
