// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor probing: decide where a caret goes when the math field is touched.
//!
//! ## Overview
//!
//! Rendered math is full of whitespace, so the node directly under a finger is
//! often not the one the caret should sit next to. [`CursorProbe`] samples a
//! short horizontal row of points, steps vertically until something is hit,
//! and prefers text-bearing leaves over containers.
//!
//! The probe never queries a global document. Hosts implement [`PointProbe`]
//! over whatever renders the math, which keeps the search deterministic under
//! test.
//!
//! ## Search order
//!
//! 1) Clamp the touch into the container vertically.
//! 2) Scan upwards from the touch, three probes per row.
//! 3) Scan downwards from the top of the container.
//! 4) Give up and place the caret at whichever end of the content is closer.
//!
//! ## Dragging the cursor handle
//!
//! The handle hangs below the caret, so while it is dragged the search runs
//! [`handle_lift`](ProbeConfig::handle_lift) above the finger
//! ([`CursorProbe::place_from_handle`]). The handle itself follows the finger
//! but resists leaving the container ([`CursorProbe::handle_position`],
//! [`constrain_to_bound`]).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_node_registry::probe::{
//!     ContentSpan, CursorPlacement, CursorProbe, PointProbe, ProbeHit,
//! };
//!
//! struct OneGlyph;
//! impl PointProbe for OneGlyph {
//!     type Id = u32;
//!     fn probe(&self, p: Point) -> Option<ProbeHit<u32>> {
//!         Rect::new(10.0, 10.0, 20.0, 30.0).contains(p).then_some(ProbeHit::Leaf(7))
//!     }
//! }
//!
//! let probe = CursorProbe::default();
//! let container = Rect::new(0.0, 0.0, 100.0, 40.0);
//! let span = Some(ContentSpan { left: 10.0, right: 20.0 });
//! let placement = probe.place(&OneGlyph, container, span, Point::new(15.0, 35.0));
//! assert!(matches!(placement, CursorPlacement::AtNode { node: 7, .. }));
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// Classification of a node found under a probe point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProbeHit<I> {
    /// A node that renders text; preferred caret anchor.
    Leaf(I),
    /// A node that only groups other nodes (fractions, roots, parens).
    Container(I),
}

/// Point query over rendered math.
///
/// Implementations return `None` for points outside the math content,
/// including the root block itself.
pub trait PointProbe {
    /// Identifier of a rendered node.
    type Id: Clone + Eq;
    /// Return the node under `point`, if any.
    fn probe(&self, point: Point) -> Option<ProbeHit<Self::Id>>;
}

/// Horizontal extent of the rendered content (first child's left edge to the
/// last child's right edge).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContentSpan {
    /// Left edge of the first rendered child.
    pub left: f64,
    /// Right edge of the last rendered child.
    pub right: f64,
}

/// Where the caret should go.
#[derive(Clone, Debug, PartialEq)]
pub enum CursorPlacement<I> {
    /// Before all content (also used when the field is empty).
    LeftEnd,
    /// After all content.
    RightEnd,
    /// Next to `node`, using the probe row `point` to pick the side.
    AtNode {
        /// Node the caret sits beside.
        node: I,
        /// The point whose row produced the hit.
        point: Point,
    },
}

/// Spacing used by [`CursorProbe`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeConfig {
    /// Horizontal offset of the side probes. Depends on font size; too small
    /// a gap pushes the caret to the end of the expression.
    pub dx: f64,
    /// Vertical step between rows. Must be positive.
    pub dy: f64,
    /// Offset below the container top used when a touch lands above it.
    pub top_inset: f64,
    /// Distance above the finger searched while dragging the cursor handle.
    pub handle_lift: f64,
    /// Fraction of out-of-bounds travel the handle keeps, in `[0, 1]`.
    pub handle_friction: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            dx: 5.0,
            dy: 8.0,
            top_inset: 10.0,
            handle_lift: 22.0,
            handle_friction: 0.8,
        }
    }
}

/// Pull `value` back towards `[min, max]`, keeping `friction` of the overshoot.
///
/// A friction of `0` clamps hard; `1` leaves the value untouched.
///
/// ```
/// use understory_node_registry::probe::constrain_to_bound;
///
/// assert_eq!(constrain_to_bound(50.0, 0.0, 100.0, 0.5), 50.0);
/// assert_eq!(constrain_to_bound(120.0, 0.0, 100.0, 0.5), 110.0);
/// assert_eq!(constrain_to_bound(-20.0, 0.0, 100.0, 0.5), -10.0);
/// ```
pub fn constrain_to_bound(value: f64, min: f64, max: f64, friction: f64) -> f64 {
    if value < min {
        min + (value - min) * friction
    } else if value > max {
        max + (value - max) * friction
    } else {
        value
    }
}

/// Scanning caret locator. See the [module docs](self).
#[derive(Copy, Clone, Debug, Default)]
pub struct CursorProbe {
    config: ProbeConfig,
}

impl CursorProbe {
    /// Create a probe with the given spacing.
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Spacing in use.
    pub fn config(&self) -> ProbeConfig {
        self.config
    }

    /// Find the caret placement for a touch at `point`.
    ///
    /// `container` is the math field's bounds in the same space as `point`;
    /// `content` is `None` when the field is empty.
    pub fn place<P: PointProbe>(
        &self,
        target: &P,
        container: Rect,
        content: Option<ContentSpan>,
        point: Point,
    ) -> CursorPlacement<P::Id> {
        let Some(content) = content else {
            return CursorPlacement::LeftEnd;
        };

        let x = point.x;
        let y = if point.y > container.y1 {
            container.y1
        } else if point.y < container.y0 {
            container.y0 + self.config.top_inset
        } else {
            point.y
        };

        if let Some((node, point)) = self.scan(target, container, x, y, -self.config.dy) {
            return CursorPlacement::AtNode { node, point };
        }
        if let Some((node, point)) = self.scan(target, container, x, container.y0, self.config.dy)
        {
            return CursorPlacement::AtNode { node, point };
        }

        if (x - content.right).abs() < (x - content.left).abs() {
            CursorPlacement::RightEnd
        } else {
            CursorPlacement::LeftEnd
        }
    }

    /// Like [`place`](Self::place), for a finger dragging the cursor handle.
    ///
    /// The caret sits above the handle, so the search starts
    /// [`handle_lift`](ProbeConfig::handle_lift) above `finger`.
    pub fn place_from_handle<P: PointProbe>(
        &self,
        target: &P,
        container: Rect,
        content: Option<ContentSpan>,
        finger: Point,
    ) -> CursorPlacement<P::Id> {
        let lifted = Point::new(finger.x, finger.y - self.config.handle_lift);
        self.place(target, container, content, lifted)
    }

    /// Position of a dragged cursor handle, relative to the container origin.
    ///
    /// `handle_height` is how far the handle's anchor sits above the finger so
    /// it stays visible. Each axis is pulled back into the container with
    /// [`handle_friction`](ProbeConfig::handle_friction).
    pub fn handle_position(&self, container: Rect, finger: Point, handle_height: f64) -> Point {
        let friction = self.config.handle_friction;
        let x = finger.x - container.x0;
        let y = finger.y - handle_height - container.y0;
        Point::new(
            constrain_to_bound(x, 0.0, container.width(), friction),
            constrain_to_bound(y, 0.0, container.height(), friction),
        )
    }

    /// Step `y` by `dy` while inside the container, probing three points per
    /// row. Leaves with the most hits win; ties keep the first seen.
    fn scan<P: PointProbe>(
        &self,
        target: &P,
        container: Rect,
        x: f64,
        mut y: f64,
        dy: f64,
    ) -> Option<(P::Id, Point)> {
        // A zero or NaN step would never leave the container.
        if !(dy.abs() > 0.0) {
            return None;
        }
        let dx = self.config.dx;
        let mut leaves: Vec<(P::Id, usize)> = Vec::with_capacity(3);
        let mut first_container: Option<P::Id> = None;

        while y >= container.y0 && y <= container.y1 {
            y += dy;
            leaves.clear();
            first_container = None;

            for px in [x - dx, x, x + dx] {
                match target.probe(Point::new(px, y)) {
                    Some(ProbeHit::Leaf(id)) => {
                        match leaves.iter_mut().find(|(seen, _)| *seen == id) {
                            Some((_, count)) => *count += 1,
                            None => leaves.push((id, 1)),
                        }
                    }
                    Some(ProbeHit::Container(id)) => {
                        if first_container.is_none() {
                            first_container = Some(id);
                        }
                    }
                    None => {}
                }
            }

            let mut best: Option<(usize, usize)> = None;
            for (i, (_, count)) in leaves.iter().enumerate() {
                if best.is_none_or(|(_, max)| *count > max) {
                    best = Some((i, *count));
                }
            }
            if let Some((i, _)) = best {
                let id = leaves.swap_remove(i).0;
                return Some((id, Point::new(x, y)));
            }
            if let Some(id) = first_container.take() {
                return Some((id, Point::new(x, y)));
            }
        }
        None
    }
}
