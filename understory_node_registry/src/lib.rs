// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_node_registry --heading-base-level=0

//! Understory Node Registry: touch targets for on-screen keypads.
//!
//! This crate keeps track of the interactive regions of a keypad (keys,
//! popover buttons, pages) and answers the question every touch event starts
//! with: which key is under this point?
//!
//! - Register nodes under an opaque identifier, with a bounds handle, an
//!   ordered list of child identifiers that take priority over the node, and
//!   the node's [`Borders`].
//! - Resolve a page-space coordinate to the most specific registered node with
//!   [`NodeManager::id_for_coords`].
//! - Look up [`LayoutProps`] for a node to anchor click and popover animations.
//! - Place a caret inside rendered math from a touch with [`probe::CursorProbe`].
//!
//! The registry does not own nodes. Hosts pass a [`NodeBounds`] handle, for
//! example a `Weak` reference to their own node, and a handle that stops
//! resolving simply stops matching.
//!
//! ## Priority
//!
//! Children listed at registration are tested before their parent. This is
//! how a popover's keys win over the key that opened it, even though the
//! popover is drawn over the parent's area. Nodes registered later are tested
//! before nodes registered earlier.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_node_registry::{Borders, NodeManager};
//!
//! let mut nodes: NodeManager<&str, Rect> = NodeManager::new();
//! nodes.register_dom_node(
//!     "plus",
//!     Rect::new(0.0, 0.0, 50.0, 50.0),
//!     vec!["plus-minus"],
//!     Borders::ALL,
//! );
//! nodes.register_dom_node("plus-minus", Rect::new(0.0, 0.0, 50.0, 25.0), vec![], Borders::ALL);
//!
//! assert_eq!(nodes.id_for_coords(10.0, 10.0), Some("plus-minus"));
//! assert_eq!(nodes.id_for_coords(10.0, 40.0), Some("plus"));
//! assert_eq!(nodes.id_for_coords(90.0, 90.0), None);
//!
//! let props = nodes.layout_props_for_id(&"plus").unwrap();
//! assert_eq!(props.borders, Borders::ALL);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

// Diagnostics compile away unless the `tracing` feature is enabled.
macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

pub mod manager;
pub mod probe;
pub mod types;

pub use manager::NodeManager;
pub use types::{Borders, LayoutProps, NodeBounds};
