// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal swipes between keypad pages.
//!
//! A drag past the swipe threshold becomes a swipe and reports displacement
//! until release. The same drag with swiping disabled just moves focus.
//!
//! Run:
//! - `cargo run -p understory_demos --example keypad_swipe`

use core::time::Duration;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_keypad_gesture::timer::TimerQueue;
use understory_keypad_gesture::touch::{TouchEvent, TouchPhase};
use understory_keypad_gesture::{Borders, GestureConfig, GestureManager, KeypadEvent};

type Keypad = GestureManager<u32, Rect, TimerQueue>;

fn page(config: GestureConfig) -> Keypad {
    let mut keypad = Keypad::with_config(config, TimerQueue::new());
    for id in 0..5u32 {
        let x0 = f64::from(id) * 64.0;
        let bounds = Rect::new(x0, 0.0, x0 + 64.0, 64.0);
        let _ = keypad.register_dom_node(id, bounds, vec![], Borders::ALL);
    }
    keypad
}

fn drag(keypad: &mut Keypad) -> Vec<KeypadEvent<u32>> {
    let at = |phase, x| TouchEvent::single(phase, Point::new(x, 32.0));
    let mut events = Vec::new();
    let mut x = 20.0;
    events.extend(keypad.on_touch_event(&at(TouchPhase::Start, x)).events);
    for _ in 0..10 {
        x += 12.0;
        events.extend(keypad.on_touch_event(&at(TouchPhase::Move, x)).events);
        for token in keypad.scheduler_mut().advance(Duration::from_millis(100)) {
            events.extend(keypad.on_timer(token));
        }
    }
    events.extend(keypad.on_touch_event(&at(TouchPhase::End, x)).events);
    events
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut keypad = page(GestureConfig::default());
    for event in drag(&mut keypad) {
        match event {
            KeypadEvent::SwipeChange { dx } => println!("swipe {dx:+.0}"),
            KeypadEvent::SwipeEnd { dx } => println!("swipe end at {dx:+.0}: switch page"),
            other => println!("{other:?}"),
        }
    }

    let mut keypad = page(GestureConfig::default().with_swipe_enabled(false));
    let events = drag(&mut keypad);
    println!("with swipes disabled: {events:?}");
}
