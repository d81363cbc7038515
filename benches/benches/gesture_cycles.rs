// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_keypad_gesture::timer::TimerQueue;
use understory_keypad_gesture::touch::{TouchEvent, TouchPhase};
use understory_keypad_gesture::{Borders, GestureManager};

type Keypad = GestureManager<u32, Rect, TimerQueue>;

fn keypad() -> Keypad {
    let mut m = Keypad::new(TimerQueue::new());
    for id in 0..20u32 {
        let x0 = f64::from(id % 5) * 60.0;
        let y0 = f64::from(id / 5) * 60.0;
        let children = if id == 0 { vec![100, 101] } else { vec![] };
        let bounds = Rect::new(x0, y0, x0 + 60.0, y0 + 60.0);
        let _ = m.register_dom_node(id, bounds, children, Borders::ALL);
    }
    let _ = m.register_dom_node(100, Rect::new(0.0, -60.0, 60.0, 0.0), vec![], Borders::ALL);
    let _ = m.register_dom_node(101, Rect::new(60.0, -60.0, 120.0, 0.0), vec![], Borders::ALL);
    m
}

fn touch(m: &mut Keypad, phase: TouchPhase, x: f64, y: f64) -> usize {
    m.on_touch_event(&TouchEvent::single(phase, Point::new(x, y)))
        .events
        .len()
}

fn bench_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_manager");
    group.bench_function("tap", |b| {
        let mut m = keypad();
        b.iter(|| {
            let mut n = touch(&mut m, TouchPhase::Start, 150.0, 90.0);
            n += touch(&mut m, TouchPhase::Move, 152.0, 91.0);
            n += touch(&mut m, TouchPhase::End, 152.0, 91.0);
            black_box(n)
        });
    });
    group.bench_function("long_press_popover", |b| {
        b.iter_batched(
            keypad,
            |mut m| {
                let mut n = touch(&mut m, TouchPhase::Start, 30.0, 30.0);
                for token in m.scheduler_mut().advance(Duration::from_millis(500)) {
                    n += m.on_timer(token).len();
                }
                n += touch(&mut m, TouchPhase::Move, 30.0, -30.0);
                n += touch(&mut m, TouchPhase::Move, 90.0, -30.0);
                n += touch(&mut m, TouchPhase::End, 90.0, -30.0);
                black_box(n);
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("swipe", |b| {
        let mut m = keypad();
        b.iter(|| {
            let mut n = touch(&mut m, TouchPhase::Start, 10.0, 90.0);
            for step in 1..=16 {
                n += touch(&mut m, TouchPhase::Move, 10.0 + f64::from(step) * 15.0, 90.0);
            }
            n += touch(&mut m, TouchPhase::End, 250.0, 90.0);
            black_box(n)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_cycles);
criterion_main!(benches);
