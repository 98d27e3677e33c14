// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core model for scroll-driven UI state synchronization.
//!
//! `scrollwork_core` derives a page's discrete UI state — which nav entry is
//! active, which elements have revealed, how far the hero has parallaxed,
//! what the typing banner shows — from explicit signal values, and emits the
//! minimal projections a backend must apply. All browser specifics live in
//! backend crates; everything here is deterministic and testable by feeding
//! synthetic signal sequences.
//!
//! # Architecture
//!
//! Signals flow through a reduce-then-project pipeline:
//!
//! ```text
//!   Backend (signal sources)
//!       │
//!       ▼
//!   ScrollTick ──────────┐
//!   Visibility ratios ───┼──► PageSync ──► SyncChanges ──► Presenter::apply()
//!   Menu/key inputs ─────┘
//!
//!   Timer ticks ──► Typewriter / Counter ──► frames ──► Presenter
//! ```
//!
//! **[`scroll`]** — Scroll-position types, the active-section resolver,
//! pixel thresholds, and parallax math. Pure functions over explicit layout
//! inputs.
//!
//! **[`reveal`]** — Visibility-ratio computation and monotonic one-shot
//! reveal gates.
//!
//! **[`page`]** — The synchronizer: consumes signals, diffs desired state
//! against the last applied projection, and emits [`SyncChanges`](page::SyncChanges).
//!
//! **[`typing`]** / **[`counter`]** — Timer-driven animation state machines
//! for the hero banner and stat counters.
//!
//! **[`debounce`]** — Trailing-edge rate limiting as explicit, time-indexed
//! state.
//!
//! **[`form`]** — Contact form validation and `mailto:` composition.
//!
//! **[`effects`]** — Pointer-tilt and stagger-delay math for decorative
//! effects.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that
//! backends implement to apply change sets to the page.
//!
//! **[`time`]** — Monotonic microsecond [`HostTime`](time::HostTime) and
//! [`Duration`](time::Duration).
//!
//! **[`trace`]** — [`SyncTraceSink`](trace::SyncTraceSink) trait and event
//! types for loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod backend;
pub mod counter;
pub mod debounce;
pub mod effects;
pub mod form;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod time;
pub mod trace;
pub mod typing;
