// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long press to open a popover of alternate keys.
//!
//! Holds "plus" past the long-press delay, slides into the popover, and lifts
//! over "approx-equal". The click is anchored to "plus", where the press
//! began.
//!
//! Run:
//! - `cargo run -p understory_demos --example keypad_popover`

use core::time::Duration;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_keypad_gesture::timer::TimerQueue;
use understory_keypad_gesture::touch::{TouchEvent, TouchPhase};
use understory_keypad_gesture::{Borders, GestureManager, KeypadEvent};

type Keypad = GestureManager<&'static str, Rect, TimerQueue>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut keypad = Keypad::new(TimerQueue::new());
    let _ = keypad.register_dom_node(
        "minus",
        Rect::new(0.0, 100.0, 60.0, 160.0),
        vec![],
        Borders::ALL,
    );
    let _ = keypad.register_dom_node(
        "plus",
        Rect::new(60.0, 100.0, 120.0, 160.0),
        vec!["plus-minus", "approx-equal"],
        Borders::ALL,
    );
    // The popover is drawn above its key.
    for (id, bounds) in [
        ("plus-minus", Rect::new(60.0, 40.0, 120.0, 100.0)),
        ("approx-equal", Rect::new(120.0, 40.0, 180.0, 100.0)),
    ] {
        let _ = keypad.register_dom_node(id, bounds, vec![], Borders::ALL);
    }

    let start = TouchEvent::single(TouchPhase::Start, Point::new(90.0, 130.0));
    let _ = keypad.on_touch_event(&start);
    let mut events = Vec::new();
    // Poll like a frame loop until the long press fires.
    while events.is_empty() && keypad.scheduler().next_deadline().is_some() {
        for token in keypad.scheduler_mut().advance(Duration::from_millis(16)) {
            events.extend(keypad.on_timer(token));
        }
    }
    println!("after {:?}: {events:?}", keypad.scheduler().now());

    for at in [Point::new(90.0, 70.0), Point::new(150.0, 70.0)] {
        let d = keypad.on_touch_event(&TouchEvent::single(TouchPhase::Move, at));
        println!(
            "move to {at:?}: focused {:?}, {} events",
            keypad.focused_node(),
            d.events.len()
        );
    }

    let end = TouchEvent::single(TouchPhase::End, Point::new(150.0, 70.0));
    let end = keypad.on_touch_event(&end);
    for event in &end.events {
        match event {
            KeypadEvent::Click { key, layout } => {
                println!("click {key} from {:?}", layout.map(|l| l.initial_bounds));
            }
            KeypadEvent::ActiveNodesChanged(None) => println!("popover closed"),
            other => println!("{other:?}"),
        }
    }

    // A long press on a key without a popover just clicks on release.
    let _ = keypad.on_touch_event(&TouchEvent::single(TouchPhase::Start, Point::new(30.0, 130.0)));
    let tokens = keypad.scheduler_mut().advance(Duration::from_secs(1));
    for token in tokens {
        println!("long press on minus: {:?}", keypad.on_timer(token));
    }
    let end = keypad.on_touch_event(&TouchEvent::single(TouchPhase::End, Point::new(30.0, 130.0)));
    println!("{:?}", end.events);
}
