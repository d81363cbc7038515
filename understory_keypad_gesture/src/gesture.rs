// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classification: tap, long press, and horizontal swipe.
//!
//! ## Overview
//!
//! [`GestureStateMachine`] consumes one touch lifecycle at a time, already
//! resolved to node identifiers, and emits [`GestureEvent`]s. It tracks a
//! single session from touch start to touch end or cancel.
//!
//! ## Phases
//!
//! - [`TouchDown`](GesturePhase::TouchDown): the finger is down and the touch
//!   is still a tap candidate. Focus follows the finger from key to key, and
//!   each newly focused key re-arms the long-press timer. Moving farther than
//!   the swipe threshold while swiping is disabled disarms it for the rest
//!   of the session.
//! - [`LongPressArmed`](GesturePhase::LongPressArmed): the timer fired while
//!   the finger rested on a key. Focus still follows the finger (so it can
//!   slide into a popover), but the touch can no longer become a swipe.
//! - [`Swiping`](GesturePhase::Swiping): horizontal displacement passed the
//!   threshold while swiping was enabled. This is one-way for the session.
//!
//! ## Invariants
//!
//! 1. A swipe and a long press never both fire in one session.
//! 2. A session that swiped ends with `SwipeEnd`, never `TouchEnd`.
//! 3. Cancel emits nothing.
//! 4. At most one long-press timer is pending, and only the live session's
//!    token is honoured by [`on_timer`](GestureStateMachine::on_timer).
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use understory_keypad_gesture::gesture::{GestureEvent, GestureStateMachine};
//! use understory_keypad_gesture::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let mut g: GestureStateMachine<&str> = GestureStateMachine::default();
//!
//! assert_eq!(g.on_touch_start(Some("7"), 100.0, &mut timers), vec![GestureEvent::Focus("7")]);
//! assert_eq!(g.on_touch_end(Some("7"), 100.0, &mut timers), vec![GestureEvent::TouchEnd("7")]);
//! // The long-press timer was cancelled by the release.
//! assert!(timers.advance(Duration::from_secs(1)).is_empty());
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use core::time::Duration;

use crate::config::GestureConfig;
use crate::timer::{Scheduler, TimerToken};

/// Classified gesture output.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent<K> {
    /// The finger is now over this key.
    Focus(K),
    /// The finger rested on this key for the long-press delay.
    LongPress(K),
    /// The finger lifted over this key without swiping.
    TouchEnd(K),
    /// The finger is no longer over any key.
    Blur,
    /// Horizontal displacement from the touch start during a swipe.
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

/// Classification of the current session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No touch in progress.
    Idle,
    /// Finger down; still a tap candidate.
    TouchDown,
    /// Long press fired; swiping is no longer possible.
    LongPressArmed,
    /// Committed to a horizontal swipe.
    Swiping,
}

#[derive(Clone, Debug)]
struct Session<K> {
    active: Option<K>,
    start_x: f64,
    last_x: f64,
    /// Moved past the threshold while in `TouchDown` without swiping.
    displaced: bool,
    phase: GesturePhase,
    pending: Option<TimerToken>,
}

/// Per-touch gesture classifier. See the [module docs](self).
#[derive(Clone, Debug)]
pub struct GestureStateMachine<K> {
    long_press_delay: Duration,
    swipe_threshold: f64,
    next_token: u64,
    session: Option<Session<K>>,
}

impl<K> Default for GestureStateMachine<K> {
    fn default() -> Self {
        let config = GestureConfig::default();
        Self::new(config.long_press_delay, config.swipe_threshold)
    }
}

impl<K> GestureStateMachine<K> {
    /// Create a classifier with explicit thresholds.
    pub fn new(long_press_delay: Duration, swipe_threshold: f64) -> Self {
        Self {
            long_press_delay,
            swipe_threshold,
            next_token: 0,
            session: None,
        }
    }

    /// Create a classifier using the thresholds from `config`.
    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(config.long_press_delay, config.swipe_threshold)
    }

    /// Phase of the current session, or [`GesturePhase::Idle`].
    pub fn phase(&self) -> GesturePhase {
        self.session
            .as_ref()
            .map_or(GesturePhase::Idle, |s| s.phase)
    }

    /// Key currently under the finger, if any.
    pub fn active_node(&self) -> Option<&K> {
        self.session.as_ref()?.active.as_ref()
    }

    /// The pending long-press timer, if any.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.session.as_ref()?.pending
    }
}

impl<K: Clone + PartialEq + Debug> GestureStateMachine<K> {
    /// Begin a session. `id` is the key under the finger, if any.
    ///
    /// An unfinished previous session (for example after a lost touch end) is
    /// discarded without events.
    pub fn on_touch_start<S: Scheduler + ?Sized>(
        &mut self,
        id: Option<K>,
        x: f64,
        scheduler: &mut S,
    ) -> Vec<GestureEvent<K>> {
        self.discard(scheduler);
        log_debug!(id = ?id, x, "touch start");

        let mut out = Vec::new();
        let mut session = Session {
            active: None,
            start_x: x,
            last_x: x,
            displaced: false,
            phase: GesturePhase::TouchDown,
            pending: None,
        };
        if let Some(id) = id {
            session.pending = Some(self.arm(scheduler));
            session.active = Some(id.clone());
            out.push(GestureEvent::Focus(id));
        }
        self.session = Some(session);
        out
    }

    /// Track the finger. `swipe_enabled` gates swipe detection for this move.
    pub fn on_touch_move<S: Scheduler + ?Sized>(
        &mut self,
        id: Option<K>,
        x: f64,
        swipe_enabled: bool,
        scheduler: &mut S,
    ) -> Vec<GestureEvent<K>> {
        let mut out = Vec::new();
        let threshold = self.swipe_threshold;
        let Some(session) = self.session.as_mut() else {
            return out;
        };
        let dx = x - session.start_x;
        session.last_x = x;

        match session.phase {
            GesturePhase::Swiping => {
                out.push(GestureEvent::SwipeChange { dx });
            }
            GesturePhase::TouchDown if swipe_enabled && dx.abs() > threshold => {
                if let Some(token) = session.pending.take() {
                    scheduler.cancel(token);
                }
                session.phase = GesturePhase::Swiping;
                log_debug!(dx, "swipe committed");
                if session.active.take().is_some() {
                    out.push(GestureEvent::Blur);
                }
                out.push(GestureEvent::SwipeChange { dx });
            }
            phase => {
                // A touch that travelled past the threshold never long-presses.
                if phase == GesturePhase::TouchDown && dx.abs() > threshold {
                    session.displaced = true;
                    if let Some(token) = session.pending.take() {
                        log_trace!(dx, "long press disarmed by movement");
                        scheduler.cancel(token);
                    }
                }
                if session.active == id {
                    return out;
                }
                if let Some(token) = session.pending.take() {
                    scheduler.cancel(token);
                }
                session.active = id.clone();
                let rearm = phase == GesturePhase::TouchDown && !session.displaced;
                match id {
                    Some(id) => {
                        out.push(GestureEvent::Focus(id));
                        if rearm {
                            let token = self.arm(scheduler);
                            if let Some(session) = self.session.as_mut() {
                                session.pending = Some(token);
                            }
                        }
                    }
                    // Once the long press is armed the popover owns the
                    // gesture; gaps between its keys do not blur.
                    None if phase == GesturePhase::TouchDown => out.push(GestureEvent::Blur),
                    None => {}
                }
            }
        }
        out
    }

    /// Finish the session. `id` is the key under the finger at release.
    pub fn on_touch_end<S: Scheduler + ?Sized>(
        &mut self,
        id: Option<K>,
        x: f64,
        scheduler: &mut S,
    ) -> Vec<GestureEvent<K>> {
        let mut out = Vec::new();
        let Some(session) = self.session.take() else {
            return out;
        };
        if let Some(token) = session.pending {
            scheduler.cancel(token);
        }
        log_debug!(id = ?id, x, phase = ?session.phase, "touch end");

        if session.phase == GesturePhase::Swiping {
            out.push(GestureEvent::SwipeEnd {
                dx: x - session.start_x,
            });
        } else {
            match id {
                Some(id) => out.push(GestureEvent::TouchEnd(id)),
                None => out.push(GestureEvent::Blur),
            }
        }
        out
    }

    /// Abandon the session without emitting anything.
    pub fn on_touch_cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.session.is_some() {
            log_debug!("touch cancel");
        }
        self.discard(scheduler);
    }

    /// Cancel any in-flight session, for example when the keypad unmounts.
    pub fn reset<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.discard(scheduler);
    }

    /// Handle a fired timer. Tokens other than the live session's pending
    /// long-press timer are ignored.
    pub fn on_timer(&mut self, token: TimerToken) -> Vec<GestureEvent<K>> {
        let mut out = Vec::new();
        let Some(session) = self.session.as_mut() else {
            log_trace!(token = token.into_raw(), "timer without session");
            return out;
        };
        if session.pending != Some(token) {
            log_trace!(token = token.into_raw(), "stale timer");
            return out;
        }
        session.pending = None;
        if session.phase != GesturePhase::TouchDown
            || session.displaced
            || (session.last_x - session.start_x).abs() > self.swipe_threshold
        {
            return out;
        }
        if let Some(id) = session.active.clone() {
            session.phase = GesturePhase::LongPressArmed;
            log_debug!(id = ?id, "long press");
            out.push(GestureEvent::LongPress(id));
        }
        out
    }

    fn arm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> TimerToken {
        self.next_token = self.next_token.wrapping_add(1);
        let token = TimerToken::from_raw(self.next_token);
        scheduler.schedule(token, self.long_press_delay);
        token
    }

    fn discard<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(token) = self.session.take().and_then(|s| s.pending) {
            scheduler.cancel(token);
        }
    }
}
