// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture configuration.

use core::time::Duration;

/// Thresholds and switches for gesture classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Whether horizontal swipes may switch keypad pages (default: true).
    ///
    /// Swipes are also locked out while a popover is visible, regardless of
    /// this setting.
    pub swipe_enabled: bool,
    /// How long a touch must rest on a key before it counts as a long press
    /// (default: 500ms).
    pub long_press_delay: Duration,
    /// Horizontal displacement, in page pixels, a touch must exceed before it
    /// becomes a swipe (default: 20).
    pub swipe_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_enabled: true,
            long_press_delay: Duration::from_millis(500),
            swipe_threshold: 20.0,
        }
    }
}

impl GestureConfig {
    /// Set [`swipe_enabled`](Self::swipe_enabled).
    #[must_use]
    pub fn with_swipe_enabled(mut self, enabled: bool) -> Self {
        self.swipe_enabled = enabled;
        self
    }

    /// Set [`long_press_delay`](Self::long_press_delay).
    #[must_use]
    pub fn with_long_press_delay(mut self, delay: Duration) -> Self {
        self.long_press_delay = delay;
        self
    }

    /// Set [`swipe_threshold`](Self::swipe_threshold).
    #[must_use]
    pub fn with_swipe_threshold(mut self, px: f64) -> Self {
        self.swipe_threshold = px;
        self
    }
}
