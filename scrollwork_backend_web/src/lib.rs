// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for scrollwork.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`ScrollSource`]: debounced window-scroll signal source
//! - [`VisibilityWatcher`]: `IntersectionObserver` visibility signals
//! - [`TickLoop`] / [`IntervalLoop`] / [`Timeout`]: timer-driven animation
//! - [`DomPresenter`]: one-way DOM projection of synchronizer state

#![no_std]

extern crate alloc;

mod observe;
mod presenter;
mod scroll;
mod timer;

pub use observe::VisibilityWatcher;
pub use presenter::{BannerKind, DomPresenter, smooth_scroll_to};
pub use scroll::{ScrollSource, current_offset};
pub use scrollwork_core::backend::Presenter;
pub use timer::{IntervalLoop, TickLoop, Timeout};

use alloc::boxed::Box;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use scrollwork_core::scroll::SectionBoundary;
use scrollwork_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks, the unit the whole
/// core model uses.
#[must_use]
pub fn now() -> HostTime {
    let ms = timer::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns a small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Measures the boundary of every `section[id]` element in document order.
///
/// Called on each (debounced) scroll observation so boundaries always
/// reflect live layout; nothing is cached across layout changes.
#[must_use]
pub fn measure_sections(document: &Document) -> Vec<SectionBoundary> {
    let mut boundaries = Vec::new();
    let Ok(sections) = document.query_selector_all("section[id]") else {
        return boundaries;
    };
    for i in 0..sections.length() {
        let Some(node) = sections.item(i) else {
            continue;
        };
        let section: HtmlElement = node.unchecked_into();
        let Some(id) = section.get_attribute("id") else {
            continue;
        };
        boundaries.push(SectionBoundary {
            id,
            top: f64::from(section.offset_top()),
            height: f64::from(section.offset_height()),
        });
    }
    boundaries
}

/// Measures the hero element's rendered height, if the page has one.
#[must_use]
pub fn measure_hero_height(document: &Document) -> Option<f64> {
    let hero = document.query_selector(".hero").ok().flatten()?;
    let hero: HtmlElement = hero.unchecked_into();
    Some(f64::from(hero.offset_height()))
}

/// Redirects the browser to `uri` (e.g. a `mailto:` link).
///
/// Fire-and-forget: navigation to a mail handler does not unload the page,
/// and no completion is awaited.
///
/// # Errors
///
/// Fails if the browser rejects the navigation.
pub fn redirect(uri: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    window.location().set_href(uri)
}

/// Installs a window `error` listener that logs uncaught faults.
///
/// No recovery is attempted and nothing is surfaced to the user; at worst a
/// decorative effect has silently failed. The listener stays installed for
/// the life of the page.
pub fn install_fault_hook() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let hook = Closure::wrap(Box::new(move |event: web_sys::ErrorEvent| {
        web_sys::console::error_2(&JsValue::from_str("An error occurred:"), &event.error());
    }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
    let _ = window.add_event_listener_with_callback("error", hook.as_ref().unchecked_ref());
    // The page-lifetime listener is intentionally leaked.
    hook.forget();
}
