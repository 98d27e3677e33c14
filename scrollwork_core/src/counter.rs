// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-interval counter animation for stat displays.
//!
//! A [`Counter`] animates a display value from zero to a fixed target over a
//! fixed duration, advancing by a constant increment on each interval tick.
//! The displayed value is the integer floor of the running value with a `+`
//! suffix (`"7+"`, `"13+"`). Once the target is reached the animation is
//! done and the backend stops its interval timer.

use alloc::format;
use alloc::string::String;

use crate::time::Duration;

/// The interval between counter ticks (one display frame at ~60Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// One step of the counter animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    /// The text to display after this tick.
    pub display: String,
    /// Whether the target has been reached and the timer should stop.
    pub done: bool,
}

/// Animates a displayed count from zero to `target`.
#[derive(Clone, Debug)]
pub struct Counter {
    target: u64,
    current: f64,
    increment: f64,
    done: bool,
}

impl Counter {
    /// Creates a counter that reaches `target` after `duration` of
    /// [`TICK_INTERVAL`] ticks.
    #[must_use]
    pub fn new(target: u64, duration: Duration) -> Self {
        let ticks = (duration.ticks() / TICK_INTERVAL.ticks()).max(1);
        Self {
            target,
            current: 0.0,
            increment: target as f64 / ticks as f64,
            done: false,
        }
    }

    /// Creates a counter with the page's stock two-second duration.
    #[must_use]
    pub fn with_default_duration(target: u64) -> Self {
        Self::new(target, Duration::from_millis(2000))
    }

    /// Advances one interval tick.
    ///
    /// Frames after the target is reached keep reporting the final value
    /// with `done` set, so a late timer callback is harmless.
    pub fn tick(&mut self) -> CounterFrame {
        if self.done {
            return CounterFrame {
                display: format!("{}+", self.target),
                done: true,
            };
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.done = true;
            return CounterFrame {
                display: format!("{}+", self.target),
                done: true,
            };
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "current is in [0, target] and target fits in u64"
        )]
        let shown = self.current as u64;
        CounterFrame {
            display: format!("{shown}+"),
            done: false,
        }
    }

    /// The target value.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_in_exact_tick_count() {
        // 256ms / 16ms = 16 ticks, increment exactly 1.0.
        let mut counter = Counter::new(16, Duration::from_millis(256));
        let mut frames = 0;
        loop {
            frames += 1;
            let frame = counter.tick();
            if frame.done {
                assert_eq!(frame.display, "16+");
                break;
            }
        }
        assert_eq!(frames, 16);
    }

    #[test]
    fn stock_stat_counter_finishes() {
        // 2000ms / 16ms = 125 ticks; float accumulation may need one extra.
        let mut counter = Counter::with_default_duration(13);
        let mut frames = 0;
        loop {
            frames += 1;
            let frame = counter.tick();
            if frame.done {
                assert_eq!(frame.display, "13+");
                break;
            }
            assert!(frames <= 126, "counter never finished");
        }
    }

    #[test]
    fn intermediate_frames_floor_the_running_value() {
        let mut counter = Counter::new(100, Duration::from_millis(160));
        // increment = 100 / 10 = 10 per tick.
        assert_eq!(counter.tick().display, "10+");
        assert_eq!(counter.tick().display, "20+");
    }

    #[test]
    fn ticks_after_done_are_stable() {
        let mut counter = Counter::new(5, Duration::from_millis(16));
        let first = counter.tick();
        assert!(first.done);
        let late = counter.tick();
        assert!(late.done);
        assert_eq!(late.display, "5+");
    }

    #[test]
    fn zero_length_duration_finishes_in_one_tick() {
        let mut counter = Counter::new(7, Duration::ZERO);
        let frame = counter.tick();
        assert!(frame.done);
        assert_eq!(frame.display, "7+");
    }
}
