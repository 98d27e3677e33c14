// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic harness for driving the synchronizer without a browser.
//!
//! The harness replaces the two browser-specific ends of the pipeline with
//! in-memory doubles: [`ScrollScript`] produces the synthetic signal
//! sequences a scroll listener would, and [`RecordingPresenter`] records
//! every projection a DOM presenter would have written. [`run_script`] wires
//! them through the real debouncer and synchronizer, so tests observe
//! exactly the writes a page would see.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use scrollwork_core::backend::Presenter;
use scrollwork_core::debounce::Debounce;
use scrollwork_core::page::{MenuState, PageSync, SyncChanges};
use scrollwork_core::scroll::{ScrollPosition, ScrollTick, SectionBoundary};
use scrollwork_core::time::{Duration, HostTime};
use scrollwork_core::trace::Tracer;

/// Produces evenly spaced synthetic scroll ticks.
#[derive(Clone, Debug)]
pub struct ScrollScript {
    start: HostTime,
    spacing: Duration,
    offsets: Vec<f64>,
}

impl ScrollScript {
    /// Creates a script that emits one tick per offset, `spacing` apart,
    /// beginning at `start`.
    #[must_use]
    pub const fn new(start: HostTime, spacing: Duration, offsets: Vec<f64>) -> Self {
        Self {
            start,
            spacing,
            offsets,
        }
    }

    /// A script sweeping linearly from `from` to `to` in `steps` ticks.
    #[must_use]
    pub fn sweep(from: f64, to: f64, steps: usize, spacing: Duration) -> Self {
        let offsets = (0..steps)
            .map(|i| from + (to - from) * i as f64 / steps.max(1) as f64)
            .collect();
        Self::new(HostTime(0), spacing, offsets)
    }

    /// Yields the scripted ticks in order.
    pub fn ticks(&self) -> impl Iterator<Item = ScrollTick> + '_ {
        self.offsets.iter().enumerate().map(|(i, &offset)| ScrollTick {
            now: self.start + self.spacing.saturating_mul(i as u64),
            offset: ScrollPosition::new(offset),
        })
    }

    /// The time just after the last tick plus one debounce window of `extra`.
    #[must_use]
    pub fn end(&self, extra: Duration) -> HostTime {
        self.start + self.spacing.saturating_mul(self.offsets.len() as u64) + extra
    }
}

/// A [`Presenter`] that records applied projections instead of writing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    /// Every nav marker write, in order (`None` = cleared with no active).
    pub nav_writes: Vec<Option<usize>>,
    /// Every raised-style toggle, in order.
    pub raised_writes: Vec<bool>,
    /// Every back-to-top visibility toggle, in order.
    pub back_to_top_writes: Vec<bool>,
    /// Every parallax translate written, in order.
    pub parallax_writes: Vec<f64>,
    /// Every menu projection, in order.
    pub menu_writes: Vec<MenuState>,
    /// Every revealed element index, in order.
    pub revealed: Vec<u32>,
    /// Every unsubscribe request, in order.
    pub unobserved: Vec<u32>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recorded writes across all channels.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.nav_writes.len()
            + self.raised_writes.len()
            + self.back_to_top_writes.len()
            + self.parallax_writes.len()
            + self.menu_writes.len()
            + self.revealed.len()
    }
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, _page: &PageSync, changes: &SyncChanges) {
        if changes.nav_changed {
            self.nav_writes.push(changes.active_nav);
        }
        if let Some(raised) = changes.navbar_raised {
            self.raised_writes.push(raised);
        }
        if let Some(visible) = changes.back_to_top {
            self.back_to_top_writes.push(visible);
        }
        if let Some(offset) = changes.parallax {
            self.parallax_writes.push(offset);
        }
        if let Some(menu) = changes.menu {
            self.menu_writes.push(menu);
        }
        self.revealed.extend_from_slice(&changes.revealed);
        self.unobserved.extend_from_slice(&changes.unobserve);
    }
}

/// Write-amplification accounting, reported as per-1000-signal rates.
#[derive(Clone, Copy, Debug, Default)]
pub struct WriteStats {
    /// Signals fed into the pipeline.
    pub signals: u64,
    /// Handler executions that survived the debouncer.
    pub executions: u64,
    /// DOM writes the presenter recorded.
    pub writes: u64,
}

impl WriteStats {
    /// Writes per 1000 signals (0 when no signals were observed).
    #[must_use]
    pub fn writes_per_1000(&self) -> f64 {
        if self.signals == 0 {
            0.0
        } else {
            self.writes as f64 * 1000.0 / self.signals as f64
        }
    }
}

/// Drives a scripted scroll sequence through the debouncer, the
/// synchronizer, and a presenter, returning write accounting.
///
/// Each scripted signal passes through `debounce` exactly as a browser
/// scroll listener would feed it; the debouncer is polled at each signal
/// time and once after the stream ends.
pub fn run_script(
    script: &ScrollScript,
    page: &mut PageSync,
    presenter: &mut RecordingPresenter,
    boundaries: &[SectionBoundary],
    hero_height: Option<f64>,
) -> WriteStats {
    let mut stats = WriteStats::default();
    let mut debounce: Debounce<ScrollTick> = Debounce::new(page.config().debounce_window);
    let mut changes = SyncChanges::default();
    let mut tracer = Tracer::none();

    let mut deliver = |tick: ScrollTick,
                       page: &mut PageSync,
                       presenter: &mut RecordingPresenter,
                       changes: &mut SyncChanges,
                       tracer: &mut Tracer<'_>| {
        page.observe_scroll_into(tick, boundaries, hero_height, changes, tracer);
        presenter.apply(page, changes);
    };

    for tick in script.ticks() {
        stats.signals += 1;
        // A timer armed by the previous signal would have fired during the
        // gap; poll before the new signal replaces the pending value.
        if let Some(due) = debounce.poll(tick.now) {
            stats.executions += 1;
            deliver(due, page, presenter, &mut changes, &mut tracer);
        }
        debounce.signal(tick.now, tick);
    }

    // Trailing edge after the stream goes quiet.
    let end = script.end(page.config().debounce_window);
    if let Some(due) = debounce.poll(end) {
        stats.executions += 1;
        deliver(due, page, presenter, &mut changes, &mut tracer);
    }

    stats.writes = presenter.write_count() as u64;
    stats
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use scrollwork_core::scroll::SyncConfig;

    use super::*;

    fn boundaries() -> Vec<SectionBoundary> {
        [
            SectionBoundary {
                id: "home".to_string(),
                top: 0.0,
                height: 600.0,
            },
            SectionBoundary {
                id: "about".to_string(),
                top: 600.0,
                height: 400.0,
            },
        ]
        .into()
    }

    #[test]
    fn rapid_stream_executes_at_most_once_per_window() {
        // Signals at 1ms intervals for 50ms against a 10ms window.
        let script = ScrollScript::sweep(0.0, 500.0, 50, Duration::from_millis(1));
        let mut page = PageSync::new(SyncConfig::portfolio());
        let mut presenter = RecordingPresenter::new();

        let stats = run_script(&script, &mut page, &mut presenter, &boundaries(), None);

        assert_eq!(stats.signals, 50);
        assert!(stats.executions <= 6, "executed {} times", stats.executions);
        // The trailing edge delivers the final offset: 0 + 500*49/50 = 490.
        assert_eq!(stats.executions, 1);
        assert_eq!(presenter.nav_writes.last(), Some(&Some(0)));
        assert_eq!(presenter.raised_writes, &[true]);
        assert_eq!(presenter.back_to_top_writes, &[true]);
    }

    #[test]
    fn slow_scroll_writes_only_on_state_changes() {
        // One tick per 20ms — every signal survives a 10ms debounce window.
        let script = ScrollScript::sweep(0.0, 800.0, 40, Duration::from_millis(20));
        let mut page = PageSync::new(SyncConfig::portfolio());
        let mut presenter = RecordingPresenter::new();

        let stats = run_script(&script, &mut page, &mut presenter, &boundaries(), None);

        assert_eq!(stats.executions, stats.signals);
        // 40 executions, but only a handful of distinct projections: the nav
        // marker moves home → about once, and each threshold trips once.
        assert_eq!(presenter.nav_writes, &[Some(0), Some(1)]);
        assert_eq!(presenter.raised_writes, &[true]);
        assert_eq!(presenter.back_to_top_writes, &[true]);
        assert!(stats.writes_per_1000() < 1000.0, "write amplification");
    }

    #[test]
    fn sweep_endpoints_are_inclusive_exclusive() {
        let script = ScrollScript::sweep(0.0, 100.0, 4, Duration::from_millis(5));
        let offsets: Vec<f64> = script.ticks().map(|t| t.offset.px()).collect();
        assert_eq!(offsets, &[0.0, 25.0, 50.0, 75.0]);
        assert_eq!(script.end(Duration::ZERO), HostTime::from_millis(20));
    }
}
