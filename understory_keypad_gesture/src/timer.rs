// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable timers for long-press detection.
//!
//! ## Overview
//!
//! The gesture machine never reads a clock. When a touch lands on a key it
//! asks a [`Scheduler`] to call back after the long-press delay, identified by
//! a [`TimerToken`]. Any transition that invalidates the long press cancels
//! that token. When the host's timer fires it hands the token back through
//! [`GestureManager::on_timer`](crate::GestureManager::on_timer); tokens that
//! are no longer the live session's pending timer are ignored, so a callback
//! that races a cancellation is harmless.
//!
//! [`TimerQueue`] is a deterministic scheduler driven by an explicit clock. It
//! suits hosts that run timers from a frame loop, and tests.
//!
//! ```
//! use core::time::Duration;
//! use understory_keypad_gesture::timer::{Scheduler, TimerQueue, TimerToken};
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(TimerToken::from_raw(1), Duration::from_millis(500));
//! timers.schedule(TimerToken::from_raw(2), Duration::from_millis(100));
//! timers.cancel(TimerToken::from_raw(2));
//!
//! assert!(timers.advance(Duration::from_millis(499)).is_empty());
//! assert_eq!(timers.advance(Duration::from_millis(1)), vec![TimerToken::from_raw(1)]);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Create a token from a raw value.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value for a token.
    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

/// Host timer service.
///
/// Implementations call back into the gesture layer with the token once
/// `delay` has elapsed, unless the token was cancelled first. Cancelling an
/// unknown or already-fired token must be a no-op.
pub trait Scheduler {
    /// Arrange for `token` to fire after `delay`.
    fn schedule(&mut self, token: TimerToken, delay: Duration);
    /// Cancel a pending token.
    fn cancel(&mut self, token: TimerToken);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        (**self).schedule(token, delay);
    }

    fn cancel(&mut self, token: TimerToken) {
        (**self).cancel(token);
    }
}

/// A scheduler driven by an explicit monotonic clock.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    pending: Vec<(Duration, TimerToken)>,
}

impl TimerQueue {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still pending.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns true if `token` is pending.
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|(_, t)| *t == token)
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|(d, _)| *d).min()
    }

    /// Advance the clock by `by` and return the tokens that came due, ordered
    /// by deadline (then token).
    pub fn advance(&mut self, by: Duration) -> Vec<TimerToken> {
        self.advance_to(self.now.saturating_add(by))
    }

    /// Move the clock to `now` (never backwards) and return due tokens.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerToken> {
        self.now = self.now.max(now);
        let mut due = Vec::new();
        let clock = self.now;
        self.pending.retain(|&(deadline, token)| {
            if deadline <= clock {
                due.push((deadline, token));
                false
            } else {
                true
            }
        });
        due.sort_unstable();
        due.into_iter().map(|(_, token)| token).collect()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        let deadline = self.now.saturating_add(delay);
        self.pending.retain(|(_, t)| *t != token);
        self.pending.push((deadline, token));
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|(_, t)| *t != token);
    }
}
