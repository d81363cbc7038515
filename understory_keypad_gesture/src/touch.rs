// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw touch input and the disposition returned to the host.

use alloc::vec::Vec;

use kurbo::Point;

/// Lifecycle phase of a touch event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// A finger went down.
    Start,
    /// A finger moved.
    Move,
    /// A finger lifted.
    End,
    /// The platform took the touch away (scroll, system gesture, ...).
    Cancel,
}

/// One contact point of a touch event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Platform identifier for the finger.
    pub identifier: u64,
    /// Position relative to the page (document).
    pub page: Point,
    /// Position relative to the viewport.
    pub client: Point,
}

impl TouchPoint {
    /// A touch point whose page and client positions coincide.
    pub fn at(identifier: u64, point: Point) -> Self {
        Self {
            identifier,
            page: point,
            client: point,
        }
    }
}

/// A raw touch event as delivered by the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Which phase this event reports.
    pub phase: TouchPhase,
    /// The contact points that changed in this event.
    pub changed_touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// A single-finger event at `point` (page and client coincide).
    pub fn single(phase: TouchPhase, point: Point) -> Self {
        Self {
            phase,
            changed_touches: alloc::vec![TouchPoint::at(0, point)],
        }
    }

    /// The first changed touch point, which drives gesture classification.
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.changed_touches.first()
    }
}

bitflags::bitflags! {
    /// What the host should do with the platform event after dispatch.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Disposition: u8 {
        /// Suppress the platform's default handling (scrolling, synthesized mouse events).
        const PREVENT_DEFAULT  = 0b0000_0001;
        /// Stop the event from reaching ancestors, so listeners that dismiss
        /// the keypad on outside touches do not see keypad touches.
        const STOP_PROPAGATION = 0b0000_0010;
    }
}
