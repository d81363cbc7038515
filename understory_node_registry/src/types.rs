// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the registry: border descriptions, layout props, and the
//! bounds capability implemented by host node handles.

use alloc::rc::{Rc, Weak};
use core::cell::Cell;

use kurbo::Rect;

bitflags::bitflags! {
    /// Edges of a node that draw a border.
    ///
    /// The registry never interprets these; they are carried alongside a node
    /// and handed back in [`LayoutProps`] so the host can draw echo and
    /// popover animations that line up with the key they start from.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Borders: u8 {
        /// Left edge.
        const LEFT   = 0b0000_0001;
        /// Right edge.
        const RIGHT  = 0b0000_0010;
        /// Top edge.
        const TOP    = 0b0000_0100;
        /// Bottom edge.
        const BOTTOM = 0b0000_1000;
        /// All four edges.
        const ALL = Self::LEFT.bits() | Self::RIGHT.bits() | Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

impl Default for Borders {
    fn default() -> Self {
        Self::empty()
    }
}

/// Layout metadata for a registered node.
///
/// Returned by [`NodeManager::layout_props_for_id`](crate::NodeManager::layout_props_for_id).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutProps {
    /// Bounds of the node when it was first matched or looked up.
    ///
    /// These stay fixed until the node is re-registered, so an animation that
    /// starts after the node has moved still anchors to where the touch began.
    pub initial_bounds: Rect,
    /// Borders the node was registered with.
    pub borders: Borders,
}

/// Resolve the current page-space bounds of a host node.
///
/// The registry holds these handles without owning the underlying node.
/// Returning `None` means the node is detached or not laid out; such a node
/// never matches a hit test.
pub trait NodeBounds {
    /// Current bounds in page coordinates, if resolvable.
    fn bounds(&self) -> Option<Rect>;
}

impl NodeBounds for Rect {
    #[inline]
    fn bounds(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl NodeBounds for Option<Rect> {
    #[inline]
    fn bounds(&self) -> Option<Rect> {
        *self
    }
}

impl NodeBounds for Cell<Rect> {
    #[inline]
    fn bounds(&self) -> Option<Rect> {
        Some(self.get())
    }
}

impl<T: NodeBounds + ?Sized> NodeBounds for &T {
    #[inline]
    fn bounds(&self) -> Option<Rect> {
        (**self).bounds()
    }
}

impl<T: NodeBounds + ?Sized> NodeBounds for Rc<T> {
    #[inline]
    fn bounds(&self) -> Option<Rect> {
        (**self).bounds()
    }
}

/// A non-owning handle: once the host drops the node, it stops matching.
impl<T: NodeBounds> NodeBounds for Weak<T> {
    #[inline]
    fn bounds(&self) -> Option<Rect> {
        self.upgrade()?.bounds()
    }
}
