// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Scrollwork splits browser-specific work into a *backend* crate. A backend
//! provides the following pieces:
//!
//! - **Signal sources** — Deliver [`ScrollTick`] values from scroll events
//!   (debounced), visibility ratios from intersection observation, and timer
//!   ticks for the typing and counter animations. These are backend-specific
//!   and not abstracted by traits because their setup and lifecycle differ
//!   fundamentally (event listeners vs. observers vs. timeouts).
//!
//! - **Time** — A `now() -> HostTime` free function that reads the
//!   platform's monotonic clock.
//!
//! - **Layout measurement** — Free functions that read section boundaries
//!   and the hero height from live layout at observation time.
//!
//! - **Presenter** — Implements the [`Presenter`] trait to apply
//!   [`SyncChanges`] to the page as one-way class/style/text projections.
//!
//! # Crate boundaries
//!
//! `scrollwork_core` owns the data model, the synchronizer, and this
//! contract module. The backend crate depends on `scrollwork_core` and
//! provides browser glue. Application code depends on both and wires them
//! together:
//!
//! ```rust,ignore
//! fn on_scroll(tick: ScrollTick) {
//!     // Measure: read boundaries and hero height from live layout.
//!     let boundaries = measure_sections(&document);
//!
//!     // Reduce: derive the projection delta from the signal.
//!     let changes = page.observe_scroll(tick, &boundaries, hero, &mut tracer);
//!
//!     // Present: apply the delta to the DOM.
//!     presenter.apply(&page, &changes);
//! }
//! ```
//!
//! [`ScrollTick`]: crate::scroll::ScrollTick

use crate::page::{PageSync, SyncChanges};

/// Applies synchronizer change sets to a presentation surface.
///
/// Both the DOM presenter and the harness's recording presenter implement
/// this trait, enabling generic wiring and deterministic tests.
pub trait Presenter {
    /// Applies the given [`SyncChanges`], reading registration metadata
    /// (reveal kinds, thresholds) from `page` as needed.
    fn apply(&mut self, page: &PageSync, changes: &SyncChanges);
}
