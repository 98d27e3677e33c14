// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll/intersection synchronizer.
//!
//! [`PageSync`] consumes typed signals — debounced scroll ticks, element
//! visibility ratios, menu inputs — and emits [`SyncChanges`], the minimal
//! set of projections a [`Presenter`](crate::backend::Presenter) must apply
//! to bring the page in line with the derived state.
//!
//! The synchronizer is a pure reducer over its inputs: section boundaries
//! and the hero height are passed fresh on every observation (layout is
//! never cached), and the only state carried between signals is
//!
//! - the last **applied** projection, used to suppress redundant writes so a
//!   steady signal stream produces no DOM churn, and
//! - the monotonic per-element reveal gates, and
//! - the explicit [`MenuState`], of which the menu's DOM classes are a
//!   one-way projection (never read back).

use alloc::vec::Vec;

use crate::reveal::{RevealSet, VisibilityThreshold};
use crate::scroll::{
    self, ScrollTick, SectionBoundary, SyncConfig, resolve_active_section,
};
use crate::trace::{ActiveSectionEvent, RevealEvent, ScrollTickEvent, Tracer};

/// Whether the mobile nav menu is open.
///
/// The `active` classes on the hamburger and menu elements are projections
/// of this value; they are never consulted to answer "is the menu open?".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    /// Menu is expanded.
    Open,
    /// Menu is collapsed.
    #[default]
    Closed,
}

impl MenuState {
    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// What a revealed element's one-shot payload is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    /// Apply the persistent visible style.
    FadeIn,
    /// Start the skill-tag stagger animation.
    SkillStagger,
    /// Start the stat counter animation.
    Counter,
    /// Slide a timeline item into place.
    Timeline,
}

/// The set of projections produced by one synchronizer observation.
///
/// Every field is a delta against the last applied state; an empty change
/// set means the signal required no DOM writes at all.
#[derive(Clone, Debug, Default)]
pub struct SyncChanges {
    /// The active nav marker changed: clear it from every entry, then set it
    /// on `active_nav` if present.
    pub nav_changed: bool,
    /// The newly active section index, valid when `nav_changed` is set.
    pub active_nav: Option<usize>,
    /// The navbar's raised style toggled.
    pub navbar_raised: Option<bool>,
    /// The back-to-top control's visibility toggled.
    pub back_to_top: Option<bool>,
    /// A new hero parallax translate, in pixels.
    pub parallax: Option<f64>,
    /// The menu projection changed.
    pub menu: Option<MenuState>,
    /// Elements that fired their one-shot reveal this observation.
    pub revealed: Vec<u32>,
    /// Elements to unsubscribe from visibility observation.
    pub unobserve: Vec<u32>,
}

impl SyncChanges {
    /// Clears all projections.
    pub fn clear(&mut self) {
        self.nav_changed = false;
        self.active_nav = None;
        self.navbar_raised = None;
        self.back_to_top = None;
        self.parallax = None;
        self.menu = None;
        self.revealed.clear();
        self.unobserve.clear();
    }

    /// Whether this change set requires no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.nav_changed
            && self.navbar_raised.is_none()
            && self.back_to_top.is_none()
            && self.parallax.is_none()
            && self.menu.is_none()
            && self.revealed.is_empty()
            && self.unobserve.is_empty()
    }
}

/// Last projection applied to the page, kept to suppress redundant writes.
#[derive(Clone, Copy, Debug, Default)]
struct Applied {
    nav_projected: bool,
    active_nav: Option<usize>,
    raised: bool,
    back_to_top: bool,
    parallax: Option<f64>,
}

/// Derives discrete UI state from scroll and visibility signals.
#[derive(Debug, Default)]
pub struct PageSync {
    config: SyncConfig,
    reveals: RevealSet,
    kinds: Vec<RevealKind>,
    menu: MenuState,
    applied: Applied,
}

impl PageSync {
    /// Creates a synchronizer with the given page constants.
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            reveals: RevealSet::new(),
            kinds: Vec::new(),
            menu: MenuState::Closed,
            applied: Applied::default(),
        }
    }

    /// The page constants this synchronizer was built with.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The current menu state.
    #[must_use]
    pub const fn menu(&self) -> MenuState {
        self.menu
    }

    /// Registers an element for one-shot visibility observation.
    ///
    /// Returns the element's index, used in visibility reports and change
    /// lists.
    pub fn register_reveal(&mut self, threshold: VisibilityThreshold, kind: RevealKind) -> u32 {
        self.kinds.push(kind);
        self.reveals.register(threshold)
    }

    /// The payload kind registered for `element`, if any.
    #[must_use]
    pub fn reveal_kind(&self, element: u32) -> Option<RevealKind> {
        self.kinds.get(element as usize).copied()
    }

    /// Whether `element` has already fired.
    #[must_use]
    pub fn is_revealed(&self, element: u32) -> bool {
        self.reveals.is_revealed(element)
    }

    /// Observes one (debounced) scroll signal.
    ///
    /// `boundaries` and `hero_height` are the current layout, measured by the
    /// caller at observation time. Returns the projections to apply.
    #[must_use]
    pub fn observe_scroll(
        &mut self,
        tick: ScrollTick,
        boundaries: &[SectionBoundary],
        hero_height: Option<f64>,
        tracer: &mut Tracer<'_>,
    ) -> SyncChanges {
        let mut changes = SyncChanges::default();
        self.observe_scroll_into(tick, boundaries, hero_height, &mut changes, tracer);
        changes
    }

    /// Like [`observe_scroll`](Self::observe_scroll), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn observe_scroll_into(
        &mut self,
        tick: ScrollTick,
        boundaries: &[SectionBoundary],
        hero_height: Option<f64>,
        changes: &mut SyncChanges,
        tracer: &mut Tracer<'_>,
    ) {
        changes.clear();
        tracer.scroll_tick(&ScrollTickEvent {
            now: tick.now,
            offset: tick.offset,
        });

        // Active section: recomputed fresh; projected only on change.
        let active = resolve_active_section(tick.offset, boundaries, self.config.probe_offset);
        if !self.applied.nav_projected || active != self.applied.active_nav {
            tracer.active_section(&ActiveSectionEvent {
                from: self.applied.active_nav,
                to: active,
            });
            changes.nav_changed = true;
            changes.active_nav = active;
            self.applied.active_nav = active;
            self.applied.nav_projected = true;
        }

        let raised = scroll::navbar_raised(tick.offset, self.config.raised_threshold);
        if raised != self.applied.raised {
            changes.navbar_raised = Some(raised);
            self.applied.raised = raised;
        }

        let back_to_top =
            scroll::back_to_top_visible(tick.offset, self.config.back_to_top_threshold);
        if back_to_top != self.applied.back_to_top {
            changes.back_to_top = Some(back_to_top);
            self.applied.back_to_top = back_to_top;
        }

        // Parallax: no new value past the hero bound, freezing the last
        // applied translate.
        if let Some(hero_height) = hero_height
            && let Some(offset) =
                scroll::parallax_offset(tick.offset, hero_height, self.config.parallax_factor)
            && Some(offset) != self.applied.parallax
        {
            changes.parallax = Some(offset);
            self.applied.parallax = Some(offset);
        }
    }

    /// Observes a visibility report for a registered element.
    ///
    /// On the element's first threshold crossing the change set carries the
    /// reveal and an unsubscribe request; afterwards reports are inert.
    #[must_use]
    pub fn observe_visibility(
        &mut self,
        element: u32,
        ratio: f64,
        tracer: &mut Tracer<'_>,
    ) -> SyncChanges {
        let mut changes = SyncChanges::default();
        if self.reveals.observe(element, ratio) {
            tracer.reveal(&RevealEvent { element, ratio });
            changes.revealed.push(element);
            changes.unobserve.push(element);
        }
        changes
    }

    /// Toggles the mobile menu.
    #[must_use]
    pub fn toggle_menu(&mut self) -> SyncChanges {
        self.menu = self.menu.toggled();
        SyncChanges {
            menu: Some(self.menu),
            ..SyncChanges::default()
        }
    }

    /// Closes the mobile menu (nav-link click, Escape key).
    ///
    /// Returns an empty change set if the menu is already closed.
    #[must_use]
    pub fn close_menu(&mut self) -> SyncChanges {
        if self.menu.is_open() {
            self.menu = MenuState::Closed;
            return SyncChanges {
                menu: Some(MenuState::Closed),
                ..SyncChanges::default()
            };
        }
        SyncChanges::default()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::scroll::ScrollPosition;
    use crate::time::HostTime;

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

    fn tick(ms: u64, offset: f64) -> ScrollTick {
        ScrollTick {
            now: HostTime::from_millis(ms),
            offset: ScrollPosition::new(offset),
        }
    }

    #[test]
    fn first_observation_projects_nav() {
        let mut page = PageSync::new(SyncConfig::portfolio());
        let changes =
            page.observe_scroll(tick(0, 0.0), &boundaries(), None, &mut Tracer::none());
        assert!(changes.nav_changed);
        assert_eq!(changes.active_nav, Some(0));
        // 0.0 is below both pixel thresholds, which match the page default.
        assert_eq!(changes.navbar_raised, None);
        assert_eq!(changes.back_to_top, None);
    }

    #[test]
    fn steady_signal_produces_no_writes() {
        let mut page = PageSync::new(SyncConfig::portfolio());
        let sections = boundaries();
        let mut tracer = Tracer::none();
        let _ = page.observe_scroll(tick(0, 120.0), &sections, None, &mut tracer);
        let repeat = page.observe_scroll(tick(10, 120.0), &sections, None, &mut tracer);
        assert!(repeat.is_empty(), "redundant writes: {repeat:?}");
    }

    #[test]
    fn thresholds_project_once_per_crossing() {
        let mut page = PageSync::new(SyncConfig::portfolio());
        let sections = boundaries();
        let mut tracer = Tracer::none();

        let up = page.observe_scroll(tick(0, 400.0), &sections, None, &mut tracer);
        assert_eq!(up.navbar_raised, Some(true));
        assert_eq!(up.back_to_top, Some(true));

        let further = page.observe_scroll(tick(10, 450.0), &sections, None, &mut tracer);
        assert_eq!(further.navbar_raised, None);
        assert_eq!(further.back_to_top, None);

        let back = page.observe_scroll(tick(20, 0.0), &sections, None, &mut tracer);
        assert_eq!(back.navbar_raised, Some(false));
        assert_eq!(back.back_to_top, Some(false));
    }

    #[test]
    fn leaving_every_section_clears_the_marker() {
        let mut page = PageSync::new(SyncConfig::portfolio());
        let sections = boundaries();
        let mut tracer = Tracer::none();

        let inside = page.observe_scroll(tick(0, 700.0), &sections, None, &mut tracer);
        assert_eq!(inside.active_nav, Some(1));

        // Past the bottom of the last window [500, 900).
        let outside = page.observe_scroll(tick(10, 2000.0), &sections, None, &mut tracer);
        assert!(outside.nav_changed);
        assert_eq!(outside.active_nav, None);
    }

    #[test]
    fn parallax_emits_while_hero_visible_then_freezes() {
        let mut page = PageSync::new(SyncConfig::portfolio());
        let sections = boundaries();
        let mut tracer = Tracer::none();

        let within = page.observe_scroll(tick(0, 200.0), &sections, Some(600.0), &mut tracer);
        assert_eq!(within.parallax, Some(100.0));

        let past = page.observe_scroll(tick(10, 900.0), &sections, Some(600.0), &mut tracer);
        assert_eq!(past.parallax, None);

        // No hero, no parallax.
        let hero_less = page.observe_scroll(tick(20, 100.0), &sections, None, &mut tracer);
        assert_eq!(hero_less.parallax, None);
    }

    #[test]
    fn menu_state_round_trip() {
        let mut page = PageSync::new(SyncConfig::portfolio());
        assert_eq!(page.menu(), MenuState::Closed);

        let opened = page.toggle_menu();
        assert_eq!(opened.menu, Some(MenuState::Open));
        assert!(page.menu().is_open());

        let closed = page.close_menu();
        assert_eq!(closed.menu, Some(MenuState::Closed));

        // Closing again is a no-op.
        let again = page.close_menu();
        assert!(again.is_empty());
    }

    #[test]
    fn visibility_reveals_once_and_unsubscribes() {
        let mut page = PageSync::new(SyncConfig::portfolio());
        let mut tracer = Tracer::none();
        let card = page.register_reveal(VisibilityThreshold::REVEAL, RevealKind::FadeIn);
        let stats = page.register_reveal(VisibilityThreshold::HALF, RevealKind::Counter);

        let first = page.observe_visibility(card, 0.2, &mut tracer);
        assert_eq!(first.revealed, &[card]);
        assert_eq!(first.unobserve, &[card]);

        let second = page.observe_visibility(card, 0.9, &mut tracer);
        assert!(second.is_empty());

        // The counter element has its own threshold and kind.
        assert!(page.observe_visibility(stats, 0.3, &mut tracer).is_empty());
        assert!(!page.observe_visibility(stats, 0.6, &mut tracer).is_empty());
        assert_eq!(page.reveal_kind(stats), Some(RevealKind::Counter));
        assert_eq!(page.reveal_kind(99), None);
    }
}
