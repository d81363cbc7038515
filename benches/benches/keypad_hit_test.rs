// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_node_registry::{Borders, NodeManager};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A `cols` x `rows` keypad of `cell`-sized keys. Every fourth key carries a
/// two-key popover drawn over its upper half.
fn gen_keypad(cols: u32, rows: u32, cell: f64) -> NodeManager<u32, Rect> {
    let mut nodes = NodeManager::new();
    let mut next_child = cols * rows;
    for row in 0..rows {
        for col in 0..cols {
            let id = row * cols + col;
            let x0 = f64::from(col) * cell;
            let y0 = f64::from(row) * cell;
            let key = Rect::new(x0, y0, x0 + cell, y0 + cell);
            if id % 4 == 0 {
                let (a, b) = (next_child, next_child + 1);
                next_child += 2;
                let half = cell / 2.0;
                let left = Rect::new(x0, y0, x0 + half, y0 + half);
                let right = Rect::new(x0 + half, y0, x0 + cell, y0 + half);
                nodes.register_dom_node(a, left, vec![], Borders::ALL);
                nodes.register_dom_node(b, right, vec![], Borders::ALL);
                nodes.register_dom_node(id, key, vec![a, b], Borders::ALL);
            } else {
                nodes.register_dom_node(id, key, vec![], Borders::BOTTOM | Borders::RIGHT);
            }
        }
    }
    nodes
}

fn gen_points(count: usize, width: f64, height: f64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| (rng.next_f64() * width, rng.next_f64() * height))
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_manager");
    for &(cols, rows) in &[(5u32, 4u32), (8, 6), (16, 12)] {
        let cell = 60.0;
        let points = gen_points(256, f64::from(cols) * cell, f64::from(rows) * cell);
        let mut nodes = gen_keypad(cols, rows, cell);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("id_for_coords_{cols}x{rows}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for &(x, y) in &points {
                    if nodes.id_for_coords(x, y).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }
    group.bench_function("register_unregister_5x4", |b| {
        b.iter_batched(
            || gen_keypad(5, 4, 60.0),
            |mut nodes| {
                for id in 0..20u32 {
                    nodes.unregister_dom_node(&id);
                }
                black_box(nodes.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_hit_test);
criterion_main!(benches);
