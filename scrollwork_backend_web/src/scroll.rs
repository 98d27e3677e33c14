// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced window-scroll signal source.
//!
//! [`ScrollSource`] attaches a `scroll` listener to the window and delivers
//! [`ScrollTick`]s through the core [`Debounce`]: each raw event records the
//! current offset and re-arms a trailing-edge timeout for the configured
//! window, so the user callback runs once per quiet period with the most
//! recent offset. This bounds redundant downstream DOM writes no matter how
//! fast the browser dispatches scroll events.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use scrollwork_core::debounce::Debounce;
use scrollwork_core::scroll::{ScrollPosition, ScrollTick};
use scrollwork_core::time::Duration;

use crate::timer::{clear_timeout, duration_to_millis, set_timeout};

type ListenerClosure = Closure<dyn FnMut()>;

/// A debounced `scroll` event listener that emits [`ScrollTick`]s.
///
/// Create with [`ScrollSource::new`], then call [`attach`](Self::attach) to
/// begin receiving ticks. The listener stays attached until
/// [`detach`](Self::detach) is called or the `ScrollSource` is dropped.
pub struct ScrollSource {
    inner: Rc<ScrollInner>,
}

struct ScrollInner {
    /// The `scroll` listener registered on the window.
    listener: RefCell<Option<ListenerClosure>>,

    /// The trailing-edge timeout closure that releases the pending tick.
    release: RefCell<Option<ListenerClosure>>,

    /// The user-supplied callback receiving debounced ticks.
    callback: RefCell<Box<dyn FnMut(ScrollTick)>>,

    /// Pending-value state shared with the timeout.
    debounce: RefCell<Debounce<ScrollTick>>,

    /// The ID of the armed trailing-edge timeout, if any.
    timeout_id: Cell<Option<i32>>,

    /// Whether the listener is currently attached.
    attached: Cell<bool>,
}

impl ScrollSource {
    /// Creates a source that is **not yet attached**.
    ///
    /// `window` is the debounce quiet window; `callback` receives one
    /// [`ScrollTick`] per quiet period, carrying the most recent offset.
    pub fn new(window: Duration, callback: impl FnMut(ScrollTick) + 'static) -> Self {
        Self {
            inner: Rc::new(ScrollInner {
                listener: RefCell::new(None),
                release: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                debounce: RefCell::new(Debounce::new(window)),
                timeout_id: Cell::new(None),
                attached: Cell::new(false),
            }),
        }
    }

    /// Attaches the `scroll` listener to the window.
    ///
    /// If already attached, this is a no-op.
    pub fn attach(&self) {
        if self.inner.attached.get() {
            return;
        }
        self.inner.attached.set(true);

        // Trailing edge: release the pending tick to the user callback.
        let inner = Rc::clone(&self.inner);
        let release = Closure::wrap(Box::new(move || {
            inner.timeout_id.set(None);
            let due = inner.debounce.borrow_mut().poll(crate::now());
            if let Some(tick) = due {
                inner.callback.borrow_mut()(tick);
            }
        }) as Box<dyn FnMut()>);

        // Raw event: record the current offset and re-arm the timeout.
        let inner = Rc::clone(&self.inner);
        let listener = Closure::wrap(Box::new(move || {
            if !inner.attached.get() {
                return;
            }
            let tick = ScrollTick {
                now: crate::now(),
                offset: current_offset(),
            };
            let window = {
                let mut debounce = inner.debounce.borrow_mut();
                debounce.signal(tick.now, tick);
                debounce.window()
            };

            if let Some(id) = inner.timeout_id.take() {
                clear_timeout(id);
            }
            if let Some(ref release) = *inner.release.borrow() {
                let id = set_timeout(release.as_ref(), duration_to_millis(window));
                inner.timeout_id.set(Some(id));
            }
        }) as Box<dyn FnMut()>);

        let window = web_sys::window().expect("no global window");
        window
            .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())
            .expect("attaching scroll listener failed");

        *self.inner.listener.borrow_mut() = Some(listener);
        *self.inner.release.borrow_mut() = Some(release);
    }

    /// Detaches the listener and cancels any pending trailing edge.
    pub fn detach(&self) {
        if !self.inner.attached.get() {
            return;
        }
        self.inner.attached.set(false);

        if let Some(id) = self.inner.timeout_id.take() {
            clear_timeout(id);
        }
        if let Some(listener) = self.inner.listener.borrow_mut().take()
            && let Some(window) = web_sys::window()
        {
            let _ = window
                .remove_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref());
        }
        self.inner.release.borrow_mut().take();
    }

    /// Returns `true` if the listener is currently attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }
}

impl Drop for ScrollSource {
    fn drop(&mut self) {
        self.detach();
    }
}

impl core::fmt::Debug for ScrollSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollSource")
            .field("attached", &self.inner.attached.get())
            .finish()
    }
}

/// Reads the window's current vertical scroll offset.
#[must_use]
pub fn current_offset() -> ScrollPosition {
    let px = web_sys::window()
        .and_then(|w| w.page_y_offset().ok())
        .unwrap_or(0.0);
    ScrollPosition::new(px)
}
