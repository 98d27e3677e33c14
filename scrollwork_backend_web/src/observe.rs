// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element visibility signals from `IntersectionObserver`.
//!
//! [`VisibilityWatcher`] wraps one observer configured with a threshold and
//! bottom root margin, and maps observed elements back to the registration
//! indices the synchronizer hands out. One-shot consumers call
//! [`unwatch`](VisibilityWatcher::unwatch) after an element fires; the
//! browser then never notifies for it again.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use scrollwork_core::reveal::VisibilityThreshold;

type EntriesClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Watches a set of elements and reports visibility ratios by slot index.
///
/// The callback receives `(index, ratio)` whenever the browser reports an
/// intersection change for a watched element. Entries that are intersecting
/// always report at least the configured threshold ratio, absorbing the
/// browser's crossing-ratio rounding slack.
pub struct VisibilityWatcher {
    observer: IntersectionObserver,
    targets: Rc<RefCell<Vec<Option<Element>>>>,
    // Kept alive for the observer's lifetime.
    _callback: EntriesClosure,
}

impl VisibilityWatcher {
    /// Creates a watcher for the given threshold.
    ///
    /// # Errors
    ///
    /// Fails if the browser rejects the observer options.
    pub fn new(
        threshold: VisibilityThreshold,
        mut callback: impl FnMut(u32, f64) + 'static,
    ) -> Result<Self, JsValue> {
        let targets: Rc<RefCell<Vec<Option<Element>>>> = Rc::new(RefCell::new(Vec::new()));

        let targets_cb = Rc::clone(&targets);
        let floor = threshold.ratio;
        let entries_cb = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    let slot = targets_cb
                        .borrow()
                        .iter()
                        .position(|t| t.as_ref() == Some(&target));
                    if let Some(slot) = slot {
                        let ratio = entry.intersection_ratio().max(floor);
                        #[expect(
                            clippy::cast_possible_truncation,
                            reason = "slot count is bounded by registered elements"
                        )]
                        callback(slot as u32, ratio);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold.ratio));
        options.set_root_margin(&root_margin(threshold.bottom_margin));

        let observer = IntersectionObserver::new_with_options(
            entries_cb.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            observer,
            targets,
            _callback: entries_cb,
        })
    }

    /// Starts observing `element` under the given slot index.
    ///
    /// The index is the one the synchronizer returned at registration; the
    /// slot vec grows as needed.
    pub fn watch(&self, index: u32, element: &Element) {
        let slot = index as usize;
        let mut targets = self.targets.borrow_mut();
        if targets.len() <= slot {
            targets.resize_with(slot + 1, || None);
        }
        targets[slot] = Some(element.clone());
        self.observer.observe(element);
    }

    /// Stops observing the element at `index`.
    ///
    /// Unknown or already-unwatched indices are a no-op.
    pub fn unwatch(&self, index: u32) {
        let removed = self
            .targets
            .borrow_mut()
            .get_mut(index as usize)
            .and_then(Option::take);
        if let Some(element) = removed {
            self.observer.unobserve(&element);
        }
    }

    /// Stops observing everything.
    pub fn disconnect(&self) {
        self.observer.disconnect();
        self.targets.borrow_mut().clear();
    }
}

impl Drop for VisibilityWatcher {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl core::fmt::Debug for VisibilityWatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityWatcher")
            .field("targets", &self.targets.borrow().len())
            .finish()
    }
}

/// Formats a bottom-margin shrink as an `IntersectionObserver` root margin.
fn root_margin(bottom_margin: f64) -> alloc::string::String {
    format!("0px 0px -{bottom_margin}px 0px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_margin_formats_bottom_shrink() {
        assert_eq!(root_margin(50.0), "0px 0px -50px 0px");
        assert_eq!(root_margin(0.0), "0px 0px -0px 0px");
    }
}
