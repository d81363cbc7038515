// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composition root: touch events in, keypad events out.
//!
//! [`GestureManager`] owns a [`NodeManager`], a [`GestureStateMachine`], a
//! [`PopoverStateMachine`] and the host's [`Scheduler`]. For each raw touch
//! event it resolves the primary touch point to a key, classifies the gesture,
//! routes the classification through the popover machine, and returns the
//! application-level [`KeypadEvent`]s together with a [`Disposition`] for the
//! platform event.
//!
//! | Gesture event   | Routed to                                      |
//! |-----------------|------------------------------------------------|
//! | `Focus(id)`     | [`PopoverStateMachine::on_focus`]              |
//! | `LongPress(id)` | [`PopoverStateMachine::on_long_press`]         |
//! | `TouchEnd(id)`  | [`PopoverStateMachine::on_touch_end`]          |
//! | `Blur`          | [`PopoverStateMachine::on_blur`]               |
//! | `SwipeChange`   | host, as [`KeypadEvent::SwipeChange`]          |
//! | `SwipeEnd`      | host, as [`KeypadEvent::SwipeEnd`]             |
//!
//! Popover clicks reach the host as [`KeypadEvent::Click`], carrying the
//! layout of the anchor key so the press animation starts from the key the
//! finger went down on.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use understory_node_registry::{Borders, LayoutProps, NodeBounds, NodeManager};

use crate::config::GestureConfig;
use crate::gesture::{GestureEvent, GesturePhase, GestureStateMachine};
use crate::popover::{ActivePopover, PopoverEvent, PopoverStateMachine};
use crate::timer::{Scheduler, TimerToken};
use crate::touch::{Disposition, TouchEvent, TouchPhase};

/// Application-level output of the keypad.
#[derive(Clone, Debug, PartialEq)]
pub enum KeypadEvent<K> {
    /// A popover opened (`Some`) or closed (`None`).
    ActiveNodesChanged(Option<ActivePopover<K>>),
    /// A key was activated.
    Click {
        /// The key to insert.
        key: K,
        /// Where the press animation should start, if the anchor key is
        /// still registered and resolvable.
        layout: Option<LayoutProps>,
    },
    /// Horizontal displacement of an ongoing swipe.
    SwipeChange {
        /// Current `x - start_x`.
        dx: f64,
    },
    /// The swipe finished.
    SwipeEnd {
        /// Final `x - start_x`.
        dx: f64,
    },
}

/// Result of dispatching one touch event.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch<K> {
    /// Events for the host, in order.
    pub events: Vec<KeypadEvent<K>>,
    /// What to do with the platform event.
    pub disposition: Disposition,
}

impl<K> Default for Dispatch<K> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            disposition: Disposition::empty(),
        }
    }
}

/// Routes touches through node lookup, gesture classification and popovers.
///
/// - `K`: key identifier.
/// - `N`: node handle; see [`NodeBounds`].
/// - `S`: the host's timer service.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use kurbo::{Point, Rect};
/// use understory_keypad_gesture::timer::TimerQueue;
/// use understory_keypad_gesture::touch::{TouchEvent, TouchPhase};
/// use understory_keypad_gesture::{Borders, GestureManager, KeypadEvent};
///
/// let mut keypad: GestureManager<&str, Rect, TimerQueue> = GestureManager::new(TimerQueue::new());
/// let _ = keypad.register_dom_node("7", Rect::new(0.0, 0.0, 50.0, 50.0), vec![], Borders::ALL);
///
/// let at = Point::new(25.0, 25.0);
/// let _ = keypad.on_touch_start(&TouchEvent::single(TouchPhase::Start, at));
/// let end = keypad.on_touch_end(&TouchEvent::single(TouchPhase::End, at));
/// assert!(matches!(end.events.as_slice(), [KeypadEvent::Click { key: "7", .. }]));
/// ```
pub struct GestureManager<K, N, S> {
    config: GestureConfig,
    nodes: NodeManager<K, N>,
    popover: PopoverStateMachine<K>,
    gesture: GestureStateMachine<K>,
    scheduler: S,
}

impl<K, N, S> Debug for GestureManager<K, N, S>
where
    K: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureManager")
            .field("config", &self.config)
            .field("phase", &self.gesture.phase())
            .field("focused", &self.gesture.active_node())
            .field("popover", &self.popover)
            .finish_non_exhaustive()
    }
}

impl<K, N, S> GestureManager<K, N, S>
where
    K: Clone + Eq + Hash + Debug,
    N: NodeBounds,
    S: Scheduler,
{
    /// Create a manager with the default [`GestureConfig`].
    pub fn new(scheduler: S) -> Self {
        Self::with_config(GestureConfig::default(), scheduler)
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(config: GestureConfig, scheduler: S) -> Self {
        Self {
            config,
            nodes: NodeManager::new(),
            popover: PopoverStateMachine::new(),
            gesture: GestureStateMachine::from_config(&config),
            scheduler,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Enable or disable page swipes. Takes effect on the next move.
    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        self.config.swipe_enabled = enabled;
    }

    /// The host's scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the host's scheduler, for example to advance a
    /// [`TimerQueue`](crate::timer::TimerQueue).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The node registry.
    pub fn nodes(&self) -> &NodeManager<K, N> {
        &self.nodes
    }

    /// Register a key. Non-empty `child_ids` also become the key's popover.
    pub fn register_dom_node(
        &mut self,
        id: K,
        node: N,
        child_ids: Vec<K>,
        borders: Borders,
    ) -> Vec<KeypadEvent<K>> {
        self.nodes
            .register_dom_node(id.clone(), node, child_ids.clone(), borders);
        let popover = self.popover.register_popover(id, child_ids);
        self.route_popover(popover)
    }

    /// Unregister a key and its popover. Closes the popover if it was open.
    pub fn unregister_dom_node(&mut self, id: &K) -> Vec<KeypadEvent<K>> {
        self.nodes.unregister_dom_node(id);
        let popover = self.popover.unregister_popover(id);
        self.route_popover(popover)
    }

    /// Layout of a registered key, for anchoring animations.
    pub fn layout_props_for_id(&mut self, id: &K) -> Option<LayoutProps> {
        self.nodes.layout_props_for_id(id)
    }

    /// Dispatch by [`TouchEvent::phase`].
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> Dispatch<K> {
        match event.phase {
            TouchPhase::Start => self.on_touch_start(event),
            TouchPhase::Move => self.on_touch_move(event),
            TouchPhase::End => self.on_touch_end(event),
            TouchPhase::Cancel => self.on_touch_cancel(event),
        }
    }

    /// A touch started in a managed node.
    ///
    /// The keypad handles the touch all the way through, so the platform
    /// default is suppressed and the event must not reach ancestors.
    pub fn on_touch_start(&mut self, event: &TouchEvent) -> Dispatch<K> {
        let disposition = Disposition::PREVENT_DEFAULT | Disposition::STOP_PROPAGATION;
        let Some(touch) = event.primary() else {
            return Dispatch {
                events: Vec::new(),
                disposition,
            };
        };
        let page = touch.page;
        let id = self.nodes.hit_test(page);
        let gesture = self.gesture.on_touch_start(id, page.x, &mut self.scheduler);
        Dispatch {
            events: self.route_gesture(gesture),
            disposition,
        }
    }

    /// The finger moved.
    pub fn on_touch_move(&mut self, event: &TouchEvent) -> Dispatch<K> {
        let Some(touch) = event.primary() else {
            return Dispatch::default();
        };
        let page = touch.page;
        let swipe_enabled = self.swipe_enabled();
        let id = self.nodes.hit_test(page);
        let gesture = self
            .gesture
            .on_touch_move(id, page.x, swipe_enabled, &mut self.scheduler);
        Dispatch {
            events: self.route_gesture(gesture),
            disposition: Disposition::empty(),
        }
    }

    /// The finger lifted.
    pub fn on_touch_end(&mut self, event: &TouchEvent) -> Dispatch<K> {
        let Some(touch) = event.primary() else {
            return Dispatch::default();
        };
        let page = touch.page;
        let id = self.nodes.hit_test(page);
        let gesture = self.gesture.on_touch_end(id, page.x, &mut self.scheduler);
        Dispatch {
            events: self.route_gesture(gesture),
            disposition: Disposition::empty(),
        }
    }

    /// The platform cancelled the touch. Nothing is emitted.
    pub fn on_touch_cancel(&mut self, _event: &TouchEvent) -> Dispatch<K> {
        self.gesture.on_touch_cancel(&mut self.scheduler);
        Dispatch::default()
    }

    /// The host's timer for `token` fired.
    pub fn on_timer(&mut self, token: TimerToken) -> Vec<KeypadEvent<K>> {
        let gesture = self.gesture.on_timer(token);
        self.route_gesture(gesture)
    }

    /// Abandon any in-flight gesture, for example when the keypad unmounts.
    pub fn reset(&mut self) {
        self.gesture.reset(&mut self.scheduler);
    }

    /// Whether a move right now could start a swipe: swipes are configured on
    /// and no popover is open.
    pub fn swipe_enabled(&self) -> bool {
        self.config.swipe_enabled && !self.popover.is_popover_visible()
    }

    /// Returns true if a popover is open.
    pub fn is_popover_visible(&self) -> bool {
        self.popover.is_popover_visible()
    }

    /// The open popover, if any.
    pub fn active_popover(&self) -> Option<ActivePopover<K>> {
        self.popover.active_popover()
    }

    /// The key under the finger in the current gesture.
    pub fn focused_node(&self) -> Option<&K> {
        self.gesture.active_node()
    }

    /// Classification of the current gesture.
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    fn route_gesture(&mut self, events: Vec<GestureEvent<K>>) -> Vec<KeypadEvent<K>> {
        let mut out = Vec::new();
        for event in events {
            log_trace!(event = ?event, "route");
            let popover = match event {
                GestureEvent::Focus(id) => self.popover.on_focus(&id),
                GestureEvent::LongPress(id) => self.popover.on_long_press(&id),
                GestureEvent::TouchEnd(id) => self.popover.on_touch_end(id),
                GestureEvent::Blur => self.popover.on_blur(),
                GestureEvent::SwipeChange { dx } => {
                    out.push(KeypadEvent::SwipeChange { dx });
                    continue;
                }
                GestureEvent::SwipeEnd { dx } => {
                    out.push(KeypadEvent::SwipeEnd { dx });
                    continue;
                }
            };
            out.extend(self.route_popover(popover));
        }
        out
    }

    fn route_popover(&mut self, events: Vec<PopoverEvent<K>>) -> Vec<KeypadEvent<K>> {
        events
            .into_iter()
            .map(|event| match event {
                PopoverEvent::Click { key, anchor } => KeypadEvent::Click {
                    key,
                    layout: self.nodes.layout_props_for_id(&anchor),
                },
                PopoverEvent::ActiveNodesChanged(active) => KeypadEvent::ActiveNodesChanged(active),
            })
            .collect()
    }
}
