// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Taps on a small number pad.
//!
//! Registers a 3x3 grid of digits, taps a few of them, and slides a finger
//! from one key to another before lifting. Set `RUST_LOG=trace` to see hit
//! tests as well as gesture transitions.
//!
//! Run:
//! - `cargo run -p understory_demos --example keypad_tap`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_keypad_gesture::timer::TimerQueue;
use understory_keypad_gesture::touch::{TouchEvent, TouchPhase};
use understory_keypad_gesture::{Borders, GestureManager, KeypadEvent};

const DIGITS: [&str; 9] = ["7", "8", "9", "4", "5", "6", "1", "2", "3"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut keypad: GestureManager<&str, Rect, TimerQueue> = GestureManager::new(TimerQueue::new());
    for (i, digit) in DIGITS.iter().enumerate() {
        let col = (i % 3) as f64;
        let row = (i / 3) as f64;
        let rect = Rect::new(col * 60.0, row * 60.0, col * 60.0 + 60.0, row * 60.0 + 60.0);
        let _ = keypad.register_dom_node(*digit, rect, vec![], Borders::ALL);
    }
    tracing::info!(keys = keypad.nodes().len(), "keypad registered");

    let taps = [Point::new(30.0, 30.0), Point::new(150.0, 90.0), Point::new(90.0, 150.0)];
    for at in taps {
        let _ = keypad.on_touch_event(&TouchEvent::single(TouchPhase::Start, at));
        let _ = keypad.scheduler_mut().advance(core::time::Duration::from_millis(80));
        let end = keypad.on_touch_event(&TouchEvent::single(TouchPhase::End, at));
        report(&end.events);
    }

    // Slide from "5" to "6" slowly enough not to swipe: the key under the
    // finger at release is the one clicked.
    let _ = keypad.on_touch_event(&TouchEvent::single(TouchPhase::Start, Point::new(90.0, 90.0)));
    for x in [95.0, 100.0, 105.0] {
        let _ = keypad.on_touch_event(&TouchEvent::single(TouchPhase::Move, Point::new(x, 90.0)));
    }
    println!("focused after slide: {:?}", keypad.focused_node());
    let end = keypad.on_touch_event(&TouchEvent::single(TouchPhase::End, Point::new(105.0, 90.0)));
    report(&end.events);

    // Lifting outside every key clicks nothing.
    let _ = keypad.on_touch_event(&TouchEvent::single(TouchPhase::Start, Point::new(30.0, 30.0)));
    let end = keypad.on_touch_event(&TouchEvent::single(TouchPhase::End, Point::new(30.0, 400.0)));
    println!("release off the keypad: {} events", end.events.len());
}

fn report(events: &[KeypadEvent<&str>]) {
    for event in events {
        if let KeypadEvent::Click { key, layout } = event {
            let anchor = layout.map(|l| l.initial_bounds);
            println!("click {key} anchored at {anchor:?}");
        }
    }
}
