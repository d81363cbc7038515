// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_keypad_gesture --heading-base-level=0

//! Understory Keypad Gesture: tap, long-press and swipe recognition for
//! on-screen keypads.
//!
//! A touch on a keypad means one of three things: a tap inserts the key, a
//! long press opens a popover of alternate keys, and a horizontal swipe pages
//! the keypad. This crate turns raw touch events into those intents.
//!
//! - [`gesture::GestureStateMachine`] classifies one touch lifecycle from the
//!   key under the finger and its horizontal position.
//! - [`popover::PopoverStateMachine`] opens and closes popovers and turns
//!   releases into clicks.
//! - [`GestureManager`] wires both to an
//!   [`understory_node_registry::NodeManager`] and returns [`KeypadEvent`]s.
//! - [`dismiss::DismissTracker`] decides when a touch outside the keypad
//!   should blur the math input.
//!
//! Everything is synchronous and deterministic. The long-press delay is the
//! only notion of time, and it goes through a host [`timer::Scheduler`];
//! [`timer::TimerQueue`] is a manual-clock implementation.
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_keypad_gesture::timer::TimerQueue;
//! use understory_keypad_gesture::touch::{TouchEvent, TouchPhase};
//! use understory_keypad_gesture::{ActivePopover, Borders, GestureManager, KeypadEvent};
//!
//! let mut keypad: GestureManager<&str, Rect, TimerQueue> = GestureManager::new(TimerQueue::new());
//! let _ = keypad.register_dom_node(
//!     "plus",
//!     Rect::new(0.0, 0.0, 50.0, 50.0),
//!     vec!["plus-minus"],
//!     Borders::ALL,
//! );
//! let popover = Rect::new(0.0, -50.0, 50.0, 0.0);
//! let _ = keypad.register_dom_node("plus-minus", popover, vec![], Borders::ALL);
//!
//! // Hold "plus" for the long-press delay.
//! let _ = keypad.on_touch_start(&TouchEvent::single(TouchPhase::Start, Point::new(25.0, 25.0)));
//! let mut events = Vec::new();
//! for token in keypad.scheduler_mut().advance(Duration::from_millis(500)) {
//!     events.extend(keypad.on_timer(token));
//! }
//! assert_eq!(
//!     events,
//!     vec![KeypadEvent::ActiveNodesChanged(Some(ActivePopover {
//!         primary: "plus",
//!         child_ids: vec!["plus-minus"],
//!     }))]
//! );
//!
//! // Release over the popover key.
//! let end = keypad.on_touch_end(&TouchEvent::single(TouchPhase::End, Point::new(25.0, -25.0)));
//! assert!(matches!(
//!     end.events.as_slice(),
//!     [KeypadEvent::Click { key: "plus-minus", .. }, KeypadEvent::ActiveNodesChanged(None)]
//! ));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `tracing` feature to
//! log gesture transitions.

#![no_std]

extern crate alloc;

// Diagnostics compile away unless the `tracing` feature is enabled.
macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

pub mod config;
pub mod dismiss;
pub mod gesture;
pub mod manager;
pub mod popover;
pub mod timer;
pub mod touch;

pub use config::GestureConfig;
pub use manager::{Dispatch, GestureManager, KeypadEvent};
pub use popover::ActivePopover;
pub use understory_node_registry::{Borders, LayoutProps, NodeBounds};
