// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_reorder::controller::ReorderController;
use understory_reorder::engine::ReorderEngine;
use understory_reorder::registry::ItemRegistry;
use understory_reorder::types::{PRIMARY_POINTER, PointerKind};

const ROW: f64 = 32.0;

fn row(i: usize) -> impl Fn() -> Option<Rect> {
    let y0 = i as f64 * ROW;
    move || Some(Rect::new(0.0, y0, 480.0, y0 + ROW))
}

fn gen_registry(n: usize) -> ItemRegistry<usize, impl Fn() -> Option<Rect>> {
    let mut reg = ItemRegistry::new();
    for i in 0..n {
        reg.register(i, row(i));
    }
    reg
}

/// Pointer path sweeping from the first row to the last in `steps` moves.
fn sweep(n: usize, steps: usize) -> Vec<f64> {
    let span = (n as f64 - 1.0) * ROW;
    (0..steps).map(|s| span * s as f64 / steps as f64).collect()
}

fn bench_engine_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_update");
    for &n in &[16_usize, 256, 4096] {
        let reg = gen_registry(n);
        let path = sweep(n, 120);
        group.throughput(Throughput::Elements(path.len() as u64));
        group.bench_function(format!("sweep_{n}"), |b| {
            b.iter_batched(
                || {
                    let mut e = ReorderEngine::new();
                    e.begin(&reg, PRIMARY_POINTER, 0, ROW / 2.0, 0).unwrap();
                    e
                },
                |mut e| {
                    for (t, &dy) in path.iter().enumerate() {
                        black_box(e.update(&reg, dy, t as u64).unwrap());
                    }
                    black_box(e.end().unwrap())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_controller_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller_drag");
    for &n in &[16_usize, 256, 4096] {
        let path = sweep(n, 120);
        group.bench_function(format!("first_to_last_{n}"), |b| {
            b.iter_batched(
                || {
                    let mut list = ReorderController::new((0..n).collect::<Vec<_>>());
                    for i in 0..n {
                        list.register(i, row(i));
                    }
                    list
                },
                |mut list| {
                    list.press(None, PointerKind::Mouse, &0, ROW / 2.0, 0);
                    for (t, &dy) in path.iter().enumerate() {
                        black_box(list.move_to(None, ROW / 2.0 + dy, t as u64));
                    }
                    black_box(list.release(None))
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine_update, bench_controller_drag);
criterion_main!(benches);
