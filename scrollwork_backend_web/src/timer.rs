// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer-driven animation loops over `setTimeout`/`setInterval`.
//!
//! [`TickLoop`] drives animations whose pacing varies per step (the typing
//! effect holds after a word, rests between words): its callback returns the
//! delay until the next tick, and the loop re-registers itself with
//! `setTimeout`, mirroring how the `requestAnimationFrame` loop of a frame
//! pipeline re-registers each frame.
//!
//! [`IntervalLoop`] drives fixed-cadence animations (the stat counter) with
//! `setInterval`; its callback returns `false` to stop.
//!
//! [`Timeout`] is a re-armable one-shot, used for the auto-expiring form
//! banner.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use scrollwork_core::time::Duration;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every tick.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    pub(crate) fn set_timeout(callback: &JsValue, millis: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    pub(crate) fn clear_timeout(id: i32);

    #[wasm_bindgen(js_name = "setInterval")]
    fn set_interval(callback: &JsValue, millis: i32) -> i32;

    #[wasm_bindgen(js_name = "clearInterval")]
    fn clear_interval(id: i32);
}

/// Converts a core [`Duration`] (µs ticks) to `setTimeout` milliseconds.
#[expect(
    clippy::cast_possible_truncation,
    reason = "animation delays are a few seconds at most; ms fits in i32"
)]
pub(crate) fn duration_to_millis(duration: Duration) -> i32 {
    duration.as_millis() as i32
}

type TickClosure = Closure<dyn FnMut()>;

/// A self-rescheduling `setTimeout` loop with per-tick delays.
///
/// Create with [`TickLoop::new`], then call [`start`](Self::start) with the
/// initial delay. After each tick the callback's returned [`Duration`]
/// schedules the next one; returning `None` ends the loop.
pub struct TickLoop {
    inner: Rc<TickInner>,
}

struct TickInner {
    /// The JS closure registered with `setTimeout`.
    ///
    /// Stored in its own `RefCell` so it can be set once in `start()` and
    /// referenced from inside itself without conflicting with `callback`.
    closure: RefCell<Option<TickClosure>>,

    /// The user-supplied callback; returns the delay until the next tick.
    callback: RefCell<Box<dyn FnMut() -> Option<Duration>>>,

    /// Whether the loop is currently running.
    running: Cell<bool>,

    /// The ID of the most recent `setTimeout` registration.
    timeout_id: Cell<i32>,
}

impl TickLoop {
    /// Creates a loop that is **not yet running**.
    pub fn new(callback: impl FnMut() -> Option<Duration> + 'static) -> Self {
        Self {
            inner: Rc::new(TickInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                running: Cell::new(false),
                timeout_id: Cell::new(0),
            }),
        }
    }

    /// Starts the loop, first firing after `initial_delay`.
    ///
    /// If already running, this is a no-op.
    pub fn start(&self, initial_delay: Duration) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move || {
            if !inner.running.get() {
                return;
            }

            // Invoke the user callback. The borrow is scoped so it doesn't
            // overlap with the `closure` RefCell.
            let next = inner.callback.borrow_mut()();

            match next {
                Some(delay) if inner.running.get() => {
                    if let Some(ref closure) = *inner.closure.borrow() {
                        let id = set_timeout(closure.as_ref(), duration_to_millis(delay));
                        inner.timeout_id.set(id);
                    }
                }
                _ => inner.running.set(false),
            }
        }) as Box<dyn FnMut()>);

        // Register the first tick.
        let id = set_timeout(closure.as_ref(), duration_to_millis(initial_delay));
        self.inner.timeout_id.set(id);
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    /// Stops the loop, cancelling the pending timeout.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        clear_timeout(self.inner.timeout_id.get());
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for TickLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for TickLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickLoop")
            .field("running", &self.inner.running.get())
            .finish()
    }
}

/// A `setInterval` loop with a fixed cadence.
///
/// The callback returns `false` to stop the interval (e.g. a counter
/// reaching its target).
pub struct IntervalLoop {
    inner: Rc<IntervalInner>,
}

struct IntervalInner {
    closure: RefCell<Option<TickClosure>>,
    callback: RefCell<Box<dyn FnMut() -> bool>>,
    running: Cell<bool>,
    interval_id: Cell<i32>,
}

impl IntervalLoop {
    /// Creates a loop that is **not yet running**.
    pub fn new(callback: impl FnMut() -> bool + 'static) -> Self {
        Self {
            inner: Rc::new(IntervalInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                running: Cell::new(false),
                interval_id: Cell::new(0),
            }),
        }
    }

    /// Starts firing every `interval`.
    ///
    /// If already running, this is a no-op.
    pub fn start(&self, interval: Duration) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move || {
            if !inner.running.get() {
                return;
            }
            let keep_going = inner.callback.borrow_mut()();
            if !keep_going {
                inner.running.set(false);
                clear_interval(inner.interval_id.get());
            }
        }) as Box<dyn FnMut()>);

        let id = set_interval(closure.as_ref(), duration_to_millis(interval));
        self.inner.interval_id.set(id);
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    /// Stops the interval.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        clear_interval(self.inner.interval_id.get());
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for IntervalLoop {
    fn drop(&mut self) {
        self.stop();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for IntervalLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalLoop")
            .field("running", &self.inner.running.get())
            .finish()
    }
}

/// A re-armable one-shot timeout.
///
/// Arming while a previous shot is pending cancels it, so only the most
/// recent deadline fires — the behavior an auto-expiring banner needs when
/// submissions arrive in quick succession.
pub struct Timeout {
    closure: TickClosure,
    timeout_id: Cell<Option<i32>>,
}

impl Timeout {
    /// Creates a timeout that runs `callback` when it fires.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        Self {
            closure: Closure::wrap(Box::new(callback) as Box<dyn FnMut()>),
            timeout_id: Cell::new(None),
        }
    }

    /// Arms (or re-arms) the timeout to fire after `delay`.
    pub fn arm(&self, delay: Duration) {
        self.cancel();
        let id = set_timeout(self.closure.as_ref(), duration_to_millis(delay));
        self.timeout_id.set(Some(id));
    }

    /// Cancels the pending shot, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.timeout_id.take() {
            clear_timeout(id);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("armed", &self.timeout_id.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_to_millis_truncates_ticks() {
        assert_eq!(duration_to_millis(Duration::from_millis(100)), 100);
        assert_eq!(duration_to_millis(Duration(1500)), 1);
        assert_eq!(duration_to_millis(Duration::ZERO), 0);
    }
}
