// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for popover transitions and long-press timers.

use core::time::Duration;

use kurbo::{Point, Rect};
use proptest::prelude::*;
use understory_keypad_gesture::gesture::{GestureEvent, GesturePhase, GestureStateMachine};
use understory_keypad_gesture::popover::{PopoverEvent, PopoverStateMachine};
use understory_keypad_gesture::timer::{TimerQueue, TimerToken};
use understory_keypad_gesture::touch::{TouchEvent, TouchPhase};
use understory_keypad_gesture::{Borders, GestureManager, KeypadEvent};

const KEYS: [u8; 6] = [0, 1, 2, 3, 4, 5];

#[derive(Clone, Debug)]
enum PopoverOp {
    Focus(u8),
    LongPress(u8),
    TouchEnd(u8),
    Blur,
}

fn popover_op() -> impl Strategy<Value = PopoverOp> {
    prop_oneof![
        (0u8..6).prop_map(PopoverOp::Focus),
        (0u8..6).prop_map(PopoverOp::LongPress),
        (0u8..6).prop_map(PopoverOp::TouchEnd),
        Just(PopoverOp::Blur),
    ]
}

// Keys 0 and 1 have popovers; 2..=5 are plain keys or popover children.
fn popovers() -> PopoverStateMachine<u8> {
    let mut p = PopoverStateMachine::new();
    let _ = p.register_popover(0, vec![2, 3]);
    let _ = p.register_popover(1, vec![4]);
    p
}

#[derive(Clone, Debug)]
enum TouchOp {
    Start(f64),
    Move(f64),
    End(f64),
    Cancel,
    Wait(u64),
}

fn touch_op() -> impl Strategy<Value = TouchOp> {
    prop_oneof![
        1 => (0.0f64..300.0).prop_map(TouchOp::Start),
        3 => (0.0f64..300.0).prop_map(TouchOp::Move),
        1 => (0.0f64..300.0).prop_map(TouchOp::End),
        1 => Just(TouchOp::Cancel),
        2 => (0u64..800).prop_map(TouchOp::Wait),
    ]
}

// Six 50px keys in a row; keys 0 and 1 open popovers above the row.
fn keypad() -> GestureManager<u8, Rect, TimerQueue> {
    let mut m = GestureManager::new(TimerQueue::new());
    for id in KEYS {
        let x = f64::from(id) * 50.0;
        let _ = m.register_dom_node(id, Rect::new(x, 0.0, x + 50.0, 50.0), vec![], Borders::ALL);
    }
    let _ = m.register_dom_node(0, Rect::new(0.0, 0.0, 50.0, 50.0), vec![2, 3], Borders::ALL);
    let _ = m.register_dom_node(1, Rect::new(50.0, 0.0, 100.0, 50.0), vec![4], Borders::ALL);
    m
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn at_most_one_popover_and_one_change_per_transition(
        ops in prop::collection::vec(popover_op(), 0..64),
    ) {
        let mut p = popovers();
        for op in &ops {
            let before = p.active_popover();
            let events = match op {
                PopoverOp::Focus(id) => p.on_focus(id),
                PopoverOp::LongPress(id) => p.on_long_press(id),
                PopoverOp::TouchEnd(id) => p.on_touch_end(*id),
                PopoverOp::Blur => p.on_blur(),
            };
            let after = p.active_popover();
            let changes: Vec<_> = events
                .iter()
                .filter_map(|e| match e {
                    PopoverEvent::ActiveNodesChanged(a) => Some(a.clone()),
                    PopoverEvent::Click { .. } => None,
                })
                .collect();
            if before == after {
                prop_assert!(changes.is_empty(), "{op:?} emitted {changes:?} without a transition");
            } else {
                prop_assert_eq!(changes, vec![after.clone()]);
            }
            prop_assert_eq!(p.is_popover_visible(), after.is_some());
            // Clicks precede the close that ends them.
            if let Some(pos) = events.iter().position(|e| matches!(e, PopoverEvent::Click { .. })) {
                prop_assert_eq!(pos, 0);
            }
        }
    }

    #[test]
    fn stale_timers_never_fire(ops in prop::collection::vec(touch_op(), 0..48), stale in 0u64..64) {
        let mut g: GestureStateMachine<u8> = GestureStateMachine::default();
        let mut timers = TimerQueue::new();
        let key_at = |x: f64| (x < 250.0).then(|| (x / 50.0) as u8);
        for op in &ops {
            match op {
                TouchOp::Start(x) => { let _ = g.on_touch_start(key_at(*x), *x, &mut timers); }
                TouchOp::Move(x) => { let _ = g.on_touch_move(key_at(*x), *x, true, &mut timers); }
                TouchOp::End(x) => { let _ = g.on_touch_end(key_at(*x), *x, &mut timers); }
                TouchOp::Cancel => g.on_touch_cancel(&mut timers),
                TouchOp::Wait(ms) => {
                    for token in timers.advance(Duration::from_millis(*ms)) {
                        prop_assert_eq!(Some(token), g.pending_timer());
                        let events = g.on_timer(token);
                        let long_presses_only =
                            events.iter().all(|e| matches!(e, GestureEvent::LongPress(_)));
                        prop_assert!(long_presses_only);
                    }
                }
            }
            // A token that is not live never changes anything.
            let token = TimerToken::from_raw(stale);
            if Some(token) != g.pending_timer() {
                let phase_before = g.phase();
                prop_assert!(g.on_timer(token).is_empty());
                prop_assert_eq!(g.phase(), phase_before);
            }
            // At most one timer is ever pending, and it is the live one.
            prop_assert!(timers.len() <= 1);
            if let Some(t) = g.pending_timer() {
                prop_assert!(timers.is_pending(t));
            }
        }
    }

    #[test]
    fn swipes_and_long_presses_are_exclusive(ops in prop::collection::vec(touch_op(), 0..48)) {
        let mut m = keypad();
        let at = |phase, x: &f64| TouchEvent::single(phase, Point::new(*x, 25.0));
        let mut long_pressed = false;
        let mut swiped = false;
        for op in &ops {
            let events = match op {
                TouchOp::Start(x) => {
                    long_pressed = false;
                    swiped = false;
                    m.on_touch_event(&at(TouchPhase::Start, x)).events
                }
                TouchOp::Move(x) => m.on_touch_event(&at(TouchPhase::Move, x)).events,
                TouchOp::End(x) => m.on_touch_event(&at(TouchPhase::End, x)).events,
                TouchOp::Cancel => {
                    m.on_touch_event(&TouchEvent::single(TouchPhase::Cancel, Point::ZERO)).events
                }
                TouchOp::Wait(ms) => {
                    let mut out = Vec::new();
                    for token in m.scheduler_mut().advance(Duration::from_millis(*ms)) {
                        out.extend(m.on_timer(token));
                    }
                    out
                }
            };
            for e in &events {
                match e {
                    KeypadEvent::ActiveNodesChanged(Some(_)) => long_pressed = true,
                    KeypadEvent::SwipeChange { .. } => swiped = true,
                    KeypadEvent::SwipeEnd { .. } => prop_assert!(swiped),
                    KeypadEvent::Click { .. } => prop_assert!(!swiped),
                    KeypadEvent::ActiveNodesChanged(None) => {}
                }
            }
            prop_assert!(!(long_pressed && swiped));
            if m.gesture_phase() == GesturePhase::Swiping {
                prop_assert!(swiped);
            }
        }
    }
}
