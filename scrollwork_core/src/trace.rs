// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the synchronization loop.
//!
//! [`SyncTraceSink`] has per-event methods with default no-op bodies, so a
//! sink implements only the events it cares about. [`Tracer`] wraps an
//! optional `&mut dyn SyncTraceSink`: when the `trace` feature is **off**,
//! every `Tracer` method compiles to nothing; when **on**, each method is a
//! single `Option` branch before dispatch.

use crate::form::FormError;
use crate::scroll::ScrollPosition;
use crate::time::HostTime;

/// Emitted when a (debounced) scroll signal reaches the synchronizer.
#[derive(Clone, Copy, Debug)]
pub struct ScrollTickEvent {
    /// Host time of the signal.
    pub now: HostTime,
    /// Scroll offset carried by the signal.
    pub offset: ScrollPosition,
}

/// Emitted when the active nav section changes.
#[derive(Clone, Copy, Debug)]
pub struct ActiveSectionEvent {
    /// Previously projected section index, if any.
    pub from: Option<usize>,
    /// Newly resolved section index, if any.
    pub to: Option<usize>,
}

/// Emitted when an element fires its one-shot reveal.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// The element's registration index.
    pub element: u32,
    /// The visibility ratio that crossed the threshold.
    pub ratio: f64,
}

/// Emitted when a contact form submission is validated.
#[derive(Clone, Copy, Debug)]
pub struct FormEvent {
    /// The rejection, or `None` for an accepted submission.
    pub error: Option<FormError>,
}

/// Receives trace events from the synchronization loop.
///
/// All methods have default no-op implementations.
pub trait SyncTraceSink {
    /// Called for each scroll signal the synchronizer observes.
    fn on_scroll_tick(&mut self, e: &ScrollTickEvent) {
        _ = e;
    }

    /// Called when the projected active section changes.
    fn on_active_section(&mut self, e: &ActiveSectionEvent) {
        _ = e;
    }

    /// Called when an element reveals.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called when a form submission is validated.
    fn on_form(&mut self, e: &FormEvent) {
        _ = e;
    }

    /// Called for uncaught page faults. No recovery is attempted.
    fn on_fault(&mut self, message: &str) {
        _ = message;
    }
}

/// A [`SyncTraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl SyncTraceSink for NoopSink {}

/// Thin wrapper around an optional [`SyncTraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn SyncTraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn SyncTraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn SyncTraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ScrollTickEvent`].
    #[inline]
    pub fn scroll_tick(&mut self, e: &ScrollTickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_scroll_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ActiveSectionEvent`].
    #[inline]
    pub fn active_section(&mut self, e: &ActiveSectionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_active_section(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FormEvent`].
    #[inline]
    pub fn form(&mut self, e: &FormEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_form(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an uncaught fault message.
    #[inline]
    pub fn fault(&mut self, message: &str) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fault(message);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = message;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_scroll_tick(&ScrollTickEvent {
            now: HostTime(0),
            offset: ScrollPosition::TOP,
        });
        sink.on_active_section(&ActiveSectionEvent {
            from: None,
            to: Some(1),
        });
        sink.on_fault("boom");
    }

    #[test]
    fn none_tracer_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.scroll_tick(&ScrollTickEvent {
            now: HostTime(0),
            offset: ScrollPosition::TOP,
        });
        tracer.fault("boom");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        #[derive(Default)]
        struct Recording {
            reveals: Vec<u32>,
        }
        impl SyncTraceSink for Recording {
            fn on_reveal(&mut self, e: &RevealEvent) {
                self.reveals.push(e.element);
            }
        }

        let mut sink = Recording::default();
        let mut tracer = Tracer::new(&mut sink);
        tracer.reveal(&RevealEvent {
            element: 3,
            ratio: 0.4,
        });
        drop(tracer);
        assert_eq!(sink.reveals, &[3]);
    }
}
