// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover visibility and click translation.
//!
//! ## Usage
//!
//! 1) Register each key that has alternate symbols with
//!    [`PopoverStateMachine::register_popover`].
//! 2) Feed it the classified gesture: focus, long press, touch end, blur.
//! 3) Forward the returned [`PopoverEvent`]s to the host.
//!
//! At most one popover is open at a time, and
//! [`ActiveNodesChanged`](PopoverEvent::ActiveNodesChanged) fires exactly once
//! per open or close.
//!
//! ## Minimal example
//!
//! ```
//! use understory_keypad_gesture::popover::{ActivePopover, PopoverEvent, PopoverStateMachine};
//!
//! let mut p: PopoverStateMachine<&str> = PopoverStateMachine::new();
//! let _ = p.register_popover("plus", vec!["plus-minus"]);
//!
//! assert_eq!(
//!     p.on_long_press(&"plus"),
//!     vec![PopoverEvent::ActiveNodesChanged(Some(ActivePopover {
//!         primary: "plus",
//!         child_ids: vec!["plus-minus"],
//!     }))]
//! );
//! assert_eq!(
//!     p.on_touch_end("plus-minus"),
//!     vec![
//!         PopoverEvent::Click { key: "plus-minus", anchor: "plus" },
//!         PopoverEvent::ActiveNodesChanged(None),
//!     ]
//! );
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

/// The visible popover: the key that opened it and the keys it shows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActivePopover<K> {
    /// The key whose long press opened the popover.
    pub primary: K,
    /// The popover's keys, in display order.
    pub child_ids: Vec<K>,
}

/// Output of the popover machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopoverEvent<K> {
    /// A key was activated. `anchor` is the key whose layout the click
    /// animation should start from: the popover's primary key for popover
    /// clicks, the key itself otherwise. Releasing on the open popover's
    /// primary clicks its first child.
    Click {
        /// The key that was activated.
        key: K,
        /// The key to anchor feedback to.
        anchor: K,
    },
    /// The popover opened (`Some`) or closed (`None`).
    ActiveNodesChanged(Option<ActivePopover<K>>),
}

/// Tracks popover associations and which popover, if any, is open.
#[derive(Clone)]
pub struct PopoverStateMachine<K> {
    popovers: HashMap<K, Vec<K>>,
    active: Option<K>,
}

impl<K> Default for PopoverStateMachine<K> {
    fn default() -> Self {
        Self {
            popovers: HashMap::new(),
            active: None,
        }
    }
}

impl<K: Debug> Debug for PopoverStateMachine<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PopoverStateMachine")
            .field("popovers", &self.popovers.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Hash + Debug> PopoverStateMachine<K> {
    /// Create a machine with no popovers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `child_ids` with `id`. Empty `child_ids` removes the
    /// association.
    pub fn register_popover(&mut self, id: K, child_ids: Vec<K>) -> Vec<PopoverEvent<K>> {
        let mut out = Vec::new();
        let is_open = self.active.as_ref() == Some(&id);
        if child_ids.is_empty() {
            if self.popovers.remove(&id).is_some() && is_open {
                self.close(&mut out);
            }
            return out;
        }
        let changed = self.popovers.get(&id) != Some(&child_ids);
        self.popovers.insert(id.clone(), child_ids.clone());
        if is_open && changed {
            log_debug!(primary = ?id, "open popover children changed");
            out.push(PopoverEvent::ActiveNodesChanged(Some(ActivePopover {
                primary: id,
                child_ids,
            })));
        }
        out
    }

    /// Remove the association for `id`, closing it if it is open.
    pub fn unregister_popover(&mut self, id: &K) -> Vec<PopoverEvent<K>> {
        let mut out = Vec::new();
        self.popovers.remove(id);
        if self.active.as_ref() == Some(id) {
            self.close(&mut out);
        }
        out
    }

    /// The finger moved onto `id`. Focusing anything outside the open popover
    /// closes it.
    pub fn on_focus(&mut self, id: &K) -> Vec<PopoverEvent<K>> {
        let mut out = Vec::new();
        if let Some(primary) = &self.active {
            let inside = primary == id
                || self
                    .popovers
                    .get(primary)
                    .is_some_and(|children| children.contains(id));
            if !inside {
                self.close(&mut out);
            }
        }
        out
    }

    /// `id` was held for the long-press delay. Opens its popover if it has
    /// one.
    pub fn on_long_press(&mut self, id: &K) -> Vec<PopoverEvent<K>> {
        let mut out = Vec::new();
        if self.active.as_ref() == Some(id) {
            return out;
        }
        let Some(children) = self.popovers.get(id).filter(|c| !c.is_empty()) else {
            log_trace!(id = ?id, "long press without popover");
            return out;
        };
        let opened = ActivePopover {
            primary: id.clone(),
            child_ids: children.clone(),
        };
        // Opening replaces any other open popover in one transition.
        self.active = Some(id.clone());
        log_debug!(primary = ?id, "popover open");
        out.push(PopoverEvent::ActiveNodesChanged(Some(opened)));
        out
    }

    /// The finger lifted over `id`.
    pub fn on_touch_end(&mut self, id: K) -> Vec<PopoverEvent<K>> {
        let mut out = Vec::new();
        let Some(primary) = self.active.clone() else {
            out.push(PopoverEvent::Click {
                key: id.clone(),
                anchor: id,
            });
            return out;
        };
        let children = self.popovers.get(&primary).map_or(&[][..], Vec::as_slice);
        // Releasing on the popover's own button acts as its first child.
        let key = if children.contains(&id) {
            Some(id)
        } else if id == primary {
            children.first().cloned()
        } else {
            None
        };
        if let Some(key) = key {
            out.push(PopoverEvent::Click {
                key,
                anchor: primary,
            });
        }
        // Any release dismisses the popover.
        self.close(&mut out);
        out
    }

    /// The finger lifted away from all keys.
    pub fn on_blur(&mut self) -> Vec<PopoverEvent<K>> {
        let mut out = Vec::new();
        if self.active.is_some() {
            self.close(&mut out);
        }
        out
    }

    /// Returns true if a popover is open.
    pub fn is_popover_visible(&self) -> bool {
        self.active.is_some()
    }

    /// The open popover, if any.
    pub fn active_popover(&self) -> Option<ActivePopover<K>> {
        let primary = self.active.as_ref()?;
        Some(ActivePopover {
            primary: primary.clone(),
            child_ids: self.popovers.get(primary).cloned().unwrap_or_default(),
        })
    }

    /// Children registered for `id`, if it has a popover.
    pub fn popover_children(&self, id: &K) -> Option<&[K]> {
        self.popovers.get(id).map(Vec::as_slice)
    }

    fn close(&mut self, out: &mut Vec<PopoverEvent<K>>) {
        if self.active.take().is_some() {
            log_debug!("popover close");
            out.push(PopoverEvent::ActiveNodesChanged(None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type P = PopoverStateMachine<&'static str>;

    fn keypad() -> P {
        let mut p = P::new();
        assert!(p.register_popover("plus", vec!["plus-minus", "approx-equal"]).is_empty());
        assert!(p.register_popover("x", vec!["y", "z"]).is_empty());
        p
    }

    fn opened(primary: &'static str, children: &[&'static str]) -> PopoverEvent<&'static str> {
        PopoverEvent::ActiveNodesChanged(Some(ActivePopover {
            primary,
            child_ids: children.to_vec(),
        }))
    }

    #[test]
    fn closed_release_clicks_the_key_itself() {
        let mut p = keypad();
        assert_eq!(
            p.on_touch_end("7"),
            vec![PopoverEvent::Click { key: "7", anchor: "7" }]
        );
        assert!(!p.is_popover_visible());
    }

    #[test]
    fn long_press_without_children_is_noop() {
        let mut p = keypad();
        assert!(p.on_long_press(&"7").is_empty());
        assert!(!p.is_popover_visible());
    }

    #[test]
    fn long_press_opens_once() {
        let mut p = keypad();
        assert_eq!(
            p.on_long_press(&"plus"),
            vec![opened("plus", &["plus-minus", "approx-equal"])]
        );
        assert!(p.on_long_press(&"plus").is_empty());
        assert_eq!(
            p.active_popover(),
            Some(ActivePopover {
                primary: "plus",
                child_ids: vec!["plus-minus", "approx-equal"],
            })
        );
    }

    #[test]
    fn release_on_child_clicks_child_anchored_to_primary() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert_eq!(
            p.on_touch_end("approx-equal"),
            vec![
                PopoverEvent::Click {
                    key: "approx-equal",
                    anchor: "plus"
                },
                PopoverEvent::ActiveNodesChanged(None),
            ]
        );
        assert!(!p.is_popover_visible());
    }

    #[test]
    fn release_on_primary_clicks_first_child_anchored_to_primary() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert_eq!(
            p.on_touch_end("plus"),
            vec![
                PopoverEvent::Click {
                    key: "plus-minus",
                    anchor: "plus"
                },
                PopoverEvent::ActiveNodesChanged(None),
            ]
        );
    }

    #[test]
    fn release_elsewhere_only_closes() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert_eq!(
            p.on_touch_end("7"),
            vec![PopoverEvent::ActiveNodesChanged(None)]
        );
    }

    #[test]
    fn focus_inside_popover_keeps_it_open() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert!(p.on_focus(&"plus-minus").is_empty());
        assert!(p.on_focus(&"plus").is_empty());
        assert!(p.is_popover_visible());
        assert_eq!(
            p.on_focus(&"7"),
            vec![PopoverEvent::ActiveNodesChanged(None)]
        );
        assert!(p.on_focus(&"8").is_empty());
    }

    #[test]
    fn blur_closes_only_when_open() {
        let mut p = keypad();
        assert!(p.on_blur().is_empty());
        let _ = p.on_long_press(&"x");
        assert_eq!(p.on_blur(), vec![PopoverEvent::ActiveNodesChanged(None)]);
        assert!(p.on_blur().is_empty());
    }

    #[test]
    fn second_long_press_switches_in_one_transition() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert_eq!(p.on_long_press(&"x"), vec![opened("x", &["y", "z"])]);
        assert_eq!(p.active_popover().map(|a| a.primary), Some("x"));
    }

    #[test]
    fn unregister_open_popover_closes_it() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert!(p.unregister_popover(&"x").is_empty());
        assert_eq!(
            p.unregister_popover(&"plus"),
            vec![PopoverEvent::ActiveNodesChanged(None)]
        );
        assert!(p.unregister_popover(&"plus").is_empty());
        assert!(p.on_long_press(&"plus").is_empty());
    }

    #[test]
    fn reregistering_with_no_children_removes_association() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert_eq!(
            p.register_popover("plus", vec![]),
            vec![PopoverEvent::ActiveNodesChanged(None)]
        );
        assert_eq!(p.popover_children(&"plus"), None);
        assert!(p.register_popover("plus", vec![]).is_empty());
    }

    #[test]
    fn reregistering_open_popover_reports_new_children() {
        let mut p = keypad();
        let _ = p.on_long_press(&"plus");
        assert!(
            p.register_popover("plus", vec!["plus-minus", "approx-equal"])
                .is_empty()
        );
        assert_eq!(
            p.register_popover("plus", vec!["minus-plus"]),
            vec![opened("plus", &["minus-plus"])]
        );
        assert_eq!(
            p.on_touch_end("minus-plus"),
            vec![
                PopoverEvent::Click {
                    key: "minus-plus",
                    anchor: "plus"
                },
                PopoverEvent::ActiveNodesChanged(None),
            ]
        );
    }
}
