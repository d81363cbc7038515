// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node registry: registration, priority ordering, hit testing, layout props.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect};

use crate::types::{Borders, LayoutProps, NodeBounds};

#[derive(Clone, Debug)]
struct Entry<K, N> {
    node: N,
    child_ids: Vec<K>,
    borders: Borders,
}

/// Registry of touchable nodes keyed by an opaque identifier.
///
/// ## Priority
///
/// Hit testing walks a priority list and returns the first node whose bounds
/// contain the point. Registering a node moves it, preceded by its children,
/// to the front of the list. A child is therefore always tested before the
/// parent that listed it, and more recently registered nodes are tested before
/// older ones. When registrations nest (a grandparent registered after the
/// parent that listed the child), the match then descends through registered
/// children that also contain the point, so the innermost node wins.
///
/// Child identifiers do not need to be registered up front. Entries in the
/// priority list that are not (or no longer) registered are skipped, so a hit
/// test never returns an unregistered identifier.
///
/// ## Bounds
///
/// Bounds are resolved through the [`NodeBounds`] handle supplied at
/// registration, so the host can move nodes without re-registering them.
/// Containment is half-open: `left <= x < right` and `top <= y < bottom`.
pub struct NodeManager<K, N> {
    nodes: HashMap<K, Entry<K, N>>,
    order: Vec<K>,
    cached_bounds: HashMap<K, Rect>,
}

impl<K, N> Default for NodeManager<K, N> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            cached_bounds: HashMap::new(),
        }
    }
}

impl<K, N> Debug for NodeManager<K, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeManager")
            .field("registered", &self.nodes.len())
            .field("order_len", &self.order.len())
            .field("cached_bounds", &self.cached_bounds.len())
            .finish_non_exhaustive()
    }
}

impl<K, N> NodeManager<K, N>
where
    K: Clone + Eq + Hash + Debug,
    N: NodeBounds,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `id`, replacing any previous registration.
    ///
    /// `child_ids` take hit-test priority over `id`; they may be registered
    /// before or after this call.
    pub fn register_dom_node(&mut self, id: K, node: N, child_ids: Vec<K>, borders: Borders) {
        log_trace!(id = ?id, children = child_ids.len(), "register node");

        // Children first, then the node itself, then everything older.
        let mut seen: HashSet<K> = HashSet::with_capacity(self.order.len() + child_ids.len() + 1);
        let mut order = Vec::with_capacity(self.order.len() + child_ids.len() + 1);
        for k in child_ids
            .iter()
            .chain(core::iter::once(&id))
            .chain(self.order.iter())
        {
            if seen.insert(k.clone()) {
                order.push(k.clone());
            }
        }
        self.order = order;

        self.cached_bounds.remove(&id);
        self.nodes.insert(
            id,
            Entry {
                node,
                child_ids,
                borders,
            },
        );
    }

    /// Remove the registration for `id`. Unknown identifiers are ignored.
    pub fn unregister_dom_node(&mut self, id: &K) {
        self.cached_bounds.remove(id);
        let Some(entry) = self.nodes.remove(id) else {
            return;
        };
        log_trace!(id = ?id, "unregister node");

        // Drop the node and any of its children that never registered
        // themselves; registered children keep their slots.
        let nodes = &self.nodes;
        self.order
            .retain(|k| k != id && (nodes.contains_key(k) || !entry.child_ids.contains(k)));
    }

    /// Returns true if `id` is currently registered.
    pub fn is_registered(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child identifiers `id` was registered with.
    pub fn child_ids(&self, id: &K) -> Option<&[K]> {
        self.nodes.get(id).map(|e| e.child_ids.as_slice())
    }

    /// Registered identifiers in hit-test priority order.
    pub fn ids_by_priority(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter().filter(|k| self.nodes.contains_key(*k))
    }

    /// Remove every registration and cached bound.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.cached_bounds.clear();
    }

    /// Forget cached bounds, for example after a resize or orientation change.
    pub fn clear_layout_cache(&mut self) {
        self.cached_bounds.clear();
    }

    /// Resolve a page-space coordinate to the most specific registered node.
    ///
    /// The bounds of the matched node are cached for
    /// [`layout_props_for_id`](Self::layout_props_for_id).
    pub fn id_for_coords(&mut self, x: f64, y: f64) -> Option<K> {
        self.hit_test(Point::new(x, y))
    }

    /// Point form of [`id_for_coords`](Self::id_for_coords).
    pub fn hit_test(&mut self, point: Point) -> Option<K> {
        let (mut id, mut bounds) = self.order.iter().find_map(|k| {
            let bounds = self.nodes.get(k)?.node.bounds()?;
            bounds.contains(point).then_some((k, bounds))
        })?;
        // Nested registrations can leave a grandchild behind its ancestors in
        // the priority list; descend into registered children that also
        // contain the point. Bounded by the node count so child cycles end.
        for _ in 0..self.nodes.len() {
            let Some(entry) = self.nodes.get(id) else {
                break;
            };
            let child = entry.child_ids.iter().find_map(|c| {
                let (c, entry) = self.nodes.get_key_value(c)?;
                let bounds = entry.node.bounds()?;
                bounds.contains(point).then_some((c, bounds))
            });
            match child {
                Some((c, b)) => (id, bounds) = (c, b),
                None => break,
            }
        }
        let id = id.clone();
        log_trace!(id = ?id, x = point.x, y = point.y, "hit");
        self.cached_bounds.insert(id.clone(), bounds);
        Some(id)
    }

    /// Layout props for `id`, or `None` if it is not registered or its
    /// bounds cannot be resolved.
    pub fn layout_props_for_id(&mut self, id: &K) -> Option<LayoutProps> {
        let entry = self.nodes.get(id)?;
        let initial_bounds = match self.cached_bounds.get(id) {
            Some(bounds) => *bounds,
            None => {
                let bounds = entry.node.bounds()?;
                self.cached_bounds.insert(id.clone(), bounds);
                bounds
            }
        };
        Some(LayoutProps {
            initial_bounds,
            borders: entry.borders,
        })
    }
}
