// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncing as explicit, time-indexed state.
//!
//! [`Debounce`] defers delivery of a value until a quiet period has elapsed
//! since the last signal. Each [`signal`](Debounce::signal) replaces the
//! pending value and restarts the window (the cancel-and-restart timer of a
//! classic debounce, modeled without a timer); [`poll`](Debounce::poll)
//! releases the value once the deadline passes. A continuous signal stream
//! therefore coalesces into a single delivery carrying the most recent
//! value, which bounds redundant downstream work.
//!
//! Backends pair this with a real deferred callback: on each signal they
//! cancel the outstanding timeout, re-arm it for the window, and call `poll`
//! when it fires.

use crate::time::{Duration, HostTime};

/// Defers delivery of the most recent value until a quiet window elapses.
#[derive(Clone, Copy, Debug)]
pub struct Debounce<T> {
    window: Duration,
    deadline: Option<HostTime>,
    pending: Option<T>,
}

impl<T> Debounce<T> {
    /// Creates a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            pending: None,
        }
    }

    /// Records a signal at `now`, replacing any pending value and restarting
    /// the quiet window.
    pub fn signal(&mut self, now: HostTime, value: T) {
        self.pending = Some(value);
        self.deadline = Some(now.checked_add(self.window).unwrap_or(now));
    }

    /// Releases the pending value if the quiet window has elapsed by `now`.
    pub fn poll(&mut self, now: HostTime) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Whether a value is waiting for its window to elapse.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The current release deadline, if a value is pending.
    #[must_use]
    pub const fn deadline(&self) -> Option<HostTime> {
        self.deadline
    }

    /// The configured quiet window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const WINDOW: Duration = Duration::from_millis(10);

    #[test]
    fn rapid_stream_coalesces_to_one_delivery() {
        let mut debounce = Debounce::new(WINDOW);
        let mut deliveries = 0;
        let mut last = None;

        // Signals at 1ms intervals for 50ms, polled every millisecond.
        for ms in 0..50_u64 {
            let now = HostTime::from_millis(ms);
            debounce.signal(now, ms);
            if let Some(v) = debounce.poll(now) {
                deliveries += 1;
                last = Some(v);
            }
        }
        // Quiet period: keep polling for another 20ms.
        for ms in 50..70_u64 {
            if let Some(v) = debounce.poll(HostTime::from_millis(ms)) {
                deliveries += 1;
                last = Some(v);
            }
        }

        // At most once per 10ms window over 50ms of signals; the trailing
        // edge fires exactly once here, with the final value.
        assert!(deliveries <= 6, "fired {deliveries} times");
        assert_eq!(deliveries, 1);
        assert_eq!(last, Some(49));
    }

    #[test]
    fn separated_bursts_deliver_latest_of_each() {
        let mut debounce = Debounce::new(WINDOW);

        debounce.signal(HostTime::from_millis(0), "a1");
        debounce.signal(HostTime::from_millis(2), "a2");
        assert_eq!(debounce.poll(HostTime::from_millis(5)), None);
        assert_eq!(debounce.poll(HostTime::from_millis(12)), Some("a2"));

        debounce.signal(HostTime::from_millis(40), "b1");
        assert_eq!(debounce.poll(HostTime::from_millis(50)), Some("b1"));
        // Nothing left once delivered.
        assert_eq!(debounce.poll(HostTime::from_millis(90)), None);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn signal_restarts_the_window() {
        let mut debounce = Debounce::new(WINDOW);
        debounce.signal(HostTime::from_millis(0), 1);
        // A new signal at 9ms pushes the deadline to 19ms.
        debounce.signal(HostTime::from_millis(9), 2);
        assert_eq!(debounce.poll(HostTime::from_millis(10)), None);
        assert_eq!(debounce.poll(HostTime::from_millis(19)), Some(2));
    }

    proptest! {
        /// A delivery only ever happens at least one window after the most
        /// recent signal, and always carries the most recent value.
        #[test]
        fn delivery_respects_quiet_window(gaps in proptest::collection::vec(0_u64..30, 1..40)) {
            let mut debounce = Debounce::new(WINDOW);
            let mut now_ms = 0;
            let mut last_signal = 0;
            let mut last_value = 0;

            for (i, gap) in gaps.iter().enumerate() {
                now_ms += gap;
                // Poll first, as a timer firing between signals would.
                if let Some(v) = debounce.poll(HostTime::from_millis(now_ms)) {
                    prop_assert!(now_ms - last_signal >= WINDOW.as_millis());
                    prop_assert_eq!(v, last_value);
                }
                debounce.signal(HostTime::from_millis(now_ms), i);
                last_signal = now_ms;
                last_value = i;
            }

            // The trailing edge always delivers the final value.
            let end = HostTime::from_millis(now_ms + WINDOW.as_millis());
            prop_assert_eq!(debounce.poll(end), Some(last_value));
        }
    }
}
