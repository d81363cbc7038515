// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap-outside dismissal for a focused math input.
//!
//! While the math input is focused, a tap anywhere outside both the input and
//! the keypad should blur it, but scrolling the page should not. Touches that
//! land in the keypad or below it never dismiss: the keypad may sit above a
//! toolbar whose buttons must not close it.
//!
//! Feed [`DismissTracker`] the host's window-level touches. Coordinates are
//! viewport-relative (client space), as are the keypad bounds.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_keypad_gesture::dismiss::DismissTracker;
//!
//! let mut tracker = DismissTracker::default();
//! tracker.set_keypad_bounds(Some(Rect::new(0.0, 400.0, 320.0, 600.0)));
//!
//! // A tap on the page above the keypad dismisses.
//! tracker.on_touch_start(&[Point::new(100.0, 100.0)], true, false);
//! assert!(tracker.on_touch_end(true));
//!
//! // A drag on the page is a scroll and does not.
//! tracker.on_touch_start(&[Point::new(100.0, 100.0)], true, false);
//! tracker.on_touch_move(Point::new(100.0, 160.0));
//! assert!(!tracker.on_touch_end(true));
//! ```

use kurbo::{Point, Rect};

/// Classifies outside touches as dismissal taps or scrolls.
#[derive(Clone, Debug, PartialEq)]
pub struct DismissTracker {
    scroll_threshold: f64,
    keypad_bounds: Option<Rect>,
    outside_start: Option<Point>,
    scrolled: bool,
}

impl Default for DismissTracker {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl DismissTracker {
    /// Create a tracker. Movement farther than `scroll_threshold` pixels from
    /// the touch start counts as a scroll.
    pub fn new(scroll_threshold: f64) -> Self {
        Self {
            scroll_threshold,
            keypad_bounds: None,
            outside_start: None,
            scrolled: false,
        }
    }

    /// Scroll threshold in pixels.
    pub fn scroll_threshold(&self) -> f64 {
        self.scroll_threshold
    }

    /// Cache the keypad's client-space bounds. `None` means no keypad is
    /// shown, so every touch outside the input is a candidate.
    pub fn set_keypad_bounds(&mut self, bounds: Option<Rect>) {
        self.keypad_bounds = bounds;
    }

    /// Drop the cached keypad bounds, for example on resize or orientation
    /// change.
    pub fn clear_keypad_bounds(&mut self) {
        self.keypad_bounds = None;
    }

    /// Cached keypad bounds.
    pub fn keypad_bounds(&self) -> Option<Rect> {
        self.keypad_bounds
    }

    /// Returns true while an outside touch is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.outside_start.is_some()
    }

    /// A touch started somewhere in the window.
    ///
    /// `points` are the changed touches' client positions. `inside_input` is
    /// whether the touch target is within the math input.
    pub fn on_touch_start(&mut self, points: &[Point], input_focused: bool, inside_input: bool) {
        if !input_focused || inside_input {
            return;
        }
        let Some(&first) = points.first() else {
            return;
        };
        if points.iter().any(|p| self.in_or_below_keypad(*p)) {
            return;
        }
        log_trace!(x = first.x, y = first.y, "outside touch");
        self.outside_start = Some(first);
        self.scrolled = false;
    }

    /// The tracked touch moved.
    pub fn on_touch_move(&mut self, point: Point) {
        if let Some(start) = self.outside_start {
            if !self.scrolled && start.distance(point) > self.scroll_threshold {
                log_trace!("outside touch scrolled");
                self.scrolled = true;
            }
        }
    }

    /// The page scrolled while the touch was down.
    pub fn on_scroll(&mut self) {
        if self.outside_start.is_some() {
            self.scrolled = true;
        }
    }

    /// A touch ended. Returns true if the input should blur.
    ///
    /// Any release counts, even one from a different finger than the one that
    /// started outside.
    pub fn on_touch_end(&mut self, input_focused: bool) -> bool {
        let blur = input_focused && self.outside_start.is_some() && !self.scrolled;
        if blur {
            log_debug!("dismiss input");
        }
        self.outside_start = None;
        self.scrolled = false;
        blur
    }

    /// A touch was cancelled. Same as [`on_touch_end`](Self::on_touch_end).
    pub fn on_touch_cancel(&mut self, input_focused: bool) -> bool {
        self.on_touch_end(input_focused)
    }

    fn in_or_below_keypad(&self, p: Point) -> bool {
        let Some(b) = self.keypad_bounds else {
            return false;
        };
        let inside = b.x0 <= p.x && p.x <= b.x1 && b.y0 <= p.y && p.y <= b.y1;
        inside || p.y > b.y1
    }
}
