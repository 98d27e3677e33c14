// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveal triggers driven by element visibility.
//!
//! A backend reports how much of each registered element is visible; the
//! [`RevealSet`] decides which elements cross their threshold for the first
//! time. Reveals are monotonic: once an element has fired, further visibility
//! reports never re-trigger it, and the caller is expected to unsubscribe the
//! element from its observer.
//!
//! [`visible_ratio`] reproduces the observation contract in the core so the
//! harness can drive synthetic viewport geometry through the same code path a
//! browser `IntersectionObserver` feeds.

use alloc::vec::Vec;

use kurbo::Rect;

/// A visibility threshold paired with a viewport bottom-margin shrink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityThreshold {
    /// Fraction of the element's area that must be visible, 0.0–1.0.
    pub ratio: f64,
    /// Pixels trimmed off the viewport bottom before testing, so elements
    /// reveal slightly after entering rather than at the very edge.
    pub bottom_margin: f64,
}

impl VisibilityThreshold {
    /// Scroll-reveal animations: 10% visible, 50px bottom margin.
    pub const REVEAL: Self = Self {
        ratio: 0.1,
        bottom_margin: 50.0,
    };

    /// Stagger and counter triggers: half visible, no margin.
    pub const HALF: Self = Self {
        ratio: 0.5,
        bottom_margin: 0.0,
    };
}

/// Computes the fraction of `element` visible within `viewport`, after
/// trimming `bottom_margin` pixels off the viewport bottom.
///
/// Returns 0.0 for zero-area elements.
#[must_use]
pub fn visible_ratio(element: Rect, viewport: Rect, bottom_margin: f64) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        return 0.0;
    }
    let trimmed = Rect::new(
        viewport.x0,
        viewport.y0,
        viewport.x1,
        viewport.y1 - bottom_margin,
    );
    let overlap = element.intersect(trimmed);
    if overlap.width() <= 0.0 || overlap.height() <= 0.0 {
        return 0.0;
    }
    overlap.area() / area
}

/// A gate that opens exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    /// Creates a closed gate.
    #[must_use]
    pub const fn new() -> Self {
        Self { fired: false }
    }

    /// Fires the gate if `ratio` meets `threshold` and the gate has not fired
    /// before. Returns `true` only on the firing transition.
    pub fn fire(&mut self, ratio: f64, threshold: f64) -> bool {
        if self.fired || ratio < threshold {
            return false;
        }
        self.fired = true;
        true
    }

    /// Whether the gate has fired.
    #[must_use]
    pub const fn fired(self) -> bool {
        self.fired
    }
}

/// Per-element one-shot reveal state, addressed by registration index.
///
/// Indices are raw `u32` slots, matching how backends map observed elements,
/// so change lists can be applied without a lookup.
#[derive(Clone, Debug, Default)]
pub struct RevealSet {
    entries: Vec<Entry>,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    gate: OneShot,
    threshold: VisibilityThreshold,
}

impl RevealSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers an element with the given threshold and returns its index.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a page registers far fewer than u32::MAX reveal elements"
    )]
    pub fn register(&mut self, threshold: VisibilityThreshold) -> u32 {
        self.entries.push(Entry {
            gate: OneShot::new(),
            threshold,
        });
        (self.entries.len() - 1) as u32
    }

    /// Feeds a visibility ratio for the element at `index`.
    ///
    /// Returns `true` only the first time the element crosses its threshold.
    /// Unknown indices are ignored (the element was never registered).
    pub fn observe(&mut self, index: u32, ratio: f64) -> bool {
        match self.entries.get_mut(index as usize) {
            Some(entry) => entry.gate.fire(ratio, entry.threshold.ratio),
            None => false,
        }
    }

    /// Whether the element at `index` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, index: u32) -> bool {
        self.entries
            .get(index as usize)
            .is_some_and(|e| e.gate.fired())
    }

    /// The bottom margin configured for the element at `index`, if registered.
    #[must_use]
    pub fn bottom_margin(&self, index: u32) -> Option<f64> {
        self.entries
            .get(index as usize)
            .map(|e| e.threshold.bottom_margin)
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no elements are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_full_partial_none() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        // Fully inside.
        assert_eq!(
            visible_ratio(Rect::new(100.0, 100.0, 300.0, 200.0), viewport, 0.0),
            1.0
        );
        // Half scrolled off the bottom.
        let half = visible_ratio(Rect::new(0.0, 700.0, 100.0, 900.0), viewport, 0.0);
        assert!((half - 0.5).abs() < 1e-9, "expected 0.5, got {half}");
        // Entirely below the fold.
        assert_eq!(
            visible_ratio(Rect::new(0.0, 900.0, 100.0, 1000.0), viewport, 0.0),
            0.0
        );
    }

    #[test]
    fn bottom_margin_shrinks_viewport() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let element = Rect::new(0.0, 740.0, 100.0, 840.0);
        // Without margin, 60px of 100 is visible.
        let plain = visible_ratio(element, viewport, 0.0);
        assert!((plain - 0.6).abs() < 1e-9);
        // A 50px margin trims the visible band to 10px.
        let trimmed = visible_ratio(element, viewport, 50.0);
        assert!((trimmed - 0.1).abs() < 1e-9);
    }

    #[test]
    fn zero_area_element_is_never_visible() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        assert_eq!(visible_ratio(Rect::new(10.0, 10.0, 10.0, 10.0), viewport, 0.0), 0.0);
    }

    #[test]
    fn one_shot_is_monotonic() {
        let mut gate = OneShot::new();
        assert!(!gate.fire(0.05, 0.1));
        assert!(gate.fire(0.2, 0.1));
        // Re-intersecting, leaving, and returning never fires again.
        assert!(!gate.fire(0.9, 0.1));
        assert!(!gate.fire(0.0, 0.1));
        assert!(!gate.fire(1.0, 0.1));
        assert!(gate.fired());
    }

    #[test]
    fn reveal_set_fires_once_per_element() {
        let mut set = RevealSet::new();
        let a = set.register(VisibilityThreshold::REVEAL);
        let b = set.register(VisibilityThreshold::HALF);

        assert!(set.observe(a, 0.15));
        assert!(!set.observe(a, 0.15));
        // b's threshold is 0.5; 0.15 is not enough.
        assert!(!set.observe(b, 0.15));
        assert!(set.observe(b, 0.6));
        assert!(set.is_revealed(a));
        assert!(set.is_revealed(b));
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut set = RevealSet::new();
        assert!(!set.observe(7, 1.0));
        assert!(!set.is_revealed(7));
        assert_eq!(set.bottom_margin(7), None);
    }
}
