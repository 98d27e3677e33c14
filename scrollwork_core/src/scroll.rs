// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-derived state: section resolution, thresholds, and parallax.
//!
//! Everything here is a pure function of the current [`ScrollPosition`] and
//! the layout values passed in by the caller. Section boundaries are measured
//! from live layout at observation time and never cached across layout
//! changes; the resolver recomputes the active section fresh on every call.

use alloc::string::String;

use crate::time::{Duration, HostTime};

/// The current vertical scroll offset, in CSS pixels from the document top.
///
/// Construction clamps negative offsets (rubber-band overscroll) to zero, so
/// a `ScrollPosition` is always ≥ 0.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ScrollPosition(f64);

impl ScrollPosition {
    /// The document top.
    pub const TOP: Self = Self(0.0);

    /// Creates a scroll position, clamping negative offsets to zero.
    #[inline]
    #[must_use]
    pub fn new(px: f64) -> Self {
        Self(px.max(0.0))
    }

    /// Returns the offset in pixels.
    #[inline]
    #[must_use]
    pub const fn px(self) -> f64 {
        self.0
    }
}

impl core::fmt::Debug for ScrollPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ScrollPosition({}px)", self.0)
    }
}

/// A scroll signal delivered by a backend, after rate limiting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTick {
    /// Host time when the signal was delivered.
    pub now: HostTime,
    /// Scroll offset read at delivery.
    pub offset: ScrollPosition,
}

/// The vertical extent of one named page section, measured from live layout.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBoundary {
    /// The section's element identifier (matches the nav link anchor).
    pub id: String,
    /// Offset of the section's top edge from the document top, in pixels.
    pub top: f64,
    /// Rendered height of the section, in pixels.
    pub height: f64,
}

/// Fixed pixel thresholds and factors for one page.
///
/// These are layout constants of the page being synchronized, grouped so the
/// whole set travels together. [`portfolio`](Self::portfolio) is the preset
/// for the portfolio page this system ships with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncConfig {
    /// Offset subtracted from each section top when resolving the active
    /// section, so a section activates slightly before its top edge reaches
    /// the viewport top.
    pub probe_offset: f64,
    /// Height of the fixed header, subtracted from smooth-scroll targets.
    pub header_height: f64,
    /// Scroll offset beyond which the navbar takes its raised style.
    pub raised_threshold: f64,
    /// Scroll offset beyond which the back-to-top control is shown.
    pub back_to_top_threshold: f64,
    /// Fraction of the scroll offset applied as the hero parallax translate.
    pub parallax_factor: f64,
    /// Minimum spacing between scroll handler executions.
    pub debounce_window: Duration,
}

impl SyncConfig {
    /// Preset for the portfolio page.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            probe_offset: 100.0,
            header_height: 70.0,
            raised_threshold: 50.0,
            back_to_top_threshold: 300.0,
            parallax_factor: 0.5,
            debounce_window: Duration::from_millis(10),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// Resolves which section boundary contains the given scroll position.
///
/// Each boundary's active window is `[top − probe_offset, top − probe_offset
/// + height)`. Returns the index of the containing boundary, or `None` if no
/// window contains the position (not an error — the page may have scroll
/// ranges outside every section).
///
/// Windows from correctly measured boundaries do not overlap. If they do, the
/// **last** boundary in source order wins; this is an explicit tie-break
/// policy, implemented as a plain forward fold.
#[must_use]
pub fn resolve_active_section(
    position: ScrollPosition,
    boundaries: &[SectionBoundary],
    probe_offset: f64,
) -> Option<usize> {
    let mut active = None;
    for (i, boundary) in boundaries.iter().enumerate() {
        let window_top = boundary.top - probe_offset;
        if position.px() >= window_top && position.px() < window_top + boundary.height {
            active = Some(i);
        }
    }
    active
}

/// Computes the smooth-scroll target for a section at `section_top`, placing
/// its top edge just below the fixed header.
#[inline]
#[must_use]
pub fn scroll_target(section_top: f64, header_height: f64) -> f64 {
    section_top - header_height
}

/// Whether the navbar should take its raised style at this offset.
#[inline]
#[must_use]
pub fn navbar_raised(position: ScrollPosition, threshold: f64) -> bool {
    position.px() > threshold
}

/// Whether the back-to-top control should be visible at this offset.
#[inline]
#[must_use]
pub fn back_to_top_visible(position: ScrollPosition, threshold: f64) -> bool {
    position.px() > threshold
}

/// Computes the hero parallax translate for this offset.
///
/// Returns `None` once the hero has been scrolled past (`offset ≥
/// hero_height`); the caller leaves the last applied translate in place, an
/// accepted visual edge case.
#[inline]
#[must_use]
pub fn parallax_offset(position: ScrollPosition, hero_height: f64, factor: f64) -> Option<f64> {
    (position.px() < hero_height).then(|| position.px() * factor)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;

    fn boundary(id: &str, top: f64, height: f64) -> SectionBoundary {
        SectionBoundary {
            id: id.to_string(),
            top,
            height,
        }
    }

    fn page() -> Vec<SectionBoundary> {
        // Non-overlapping sections stacked top to bottom.
        [
            boundary("home", 0.0, 600.0),
            boundary("about", 600.0, 400.0),
            boundary("skills", 1000.0, 500.0),
            boundary("contact", 1500.0, 700.0),
        ]
        .into()
    }

    #[test]
    fn resolves_unique_containing_window() {
        let sections = page();
        // Window for "about" is [500, 900) with the 100px probe offset.
        assert_eq!(
            resolve_active_section(ScrollPosition::new(500.0), &sections, 100.0),
            Some(1)
        );
        assert_eq!(
            resolve_active_section(ScrollPosition::new(899.0), &sections, 100.0),
            Some(1)
        );
        // Half-open: 900 belongs to "skills".
        assert_eq!(
            resolve_active_section(ScrollPosition::new(900.0), &sections, 100.0),
            Some(2)
        );
    }

    #[test]
    fn no_containing_window_resolves_none() {
        let sections = page();
        // Past the bottom of the last window [1400, 2100).
        assert_eq!(
            resolve_active_section(ScrollPosition::new(2100.0), &sections, 100.0),
            None
        );
        assert_eq!(resolve_active_section(ScrollPosition::new(0.0), &[], 100.0), None);
    }

    #[test]
    fn overlap_resolves_to_last_in_source_order() {
        // Two overlapping windows; the later boundary wins.
        let sections = [boundary("a", 100.0, 500.0), boundary("b", 300.0, 500.0)];
        assert_eq!(
            resolve_active_section(ScrollPosition::new(350.0), &sections, 100.0),
            Some(1)
        );
        // Only "a"'s window covers this offset.
        assert_eq!(
            resolve_active_section(ScrollPosition::new(100.0), &sections, 100.0),
            Some(0)
        );
    }

    #[test]
    fn negative_offsets_clamp_to_zero() {
        assert_eq!(ScrollPosition::new(-40.0).px(), 0.0);
    }

    #[test]
    fn scroll_target_subtracts_header() {
        assert_eq!(scroll_target(800.0, 70.0), 730.0);
    }

    #[test]
    fn thresholds_are_strict() {
        let config = SyncConfig::portfolio();
        assert!(!navbar_raised(ScrollPosition::new(50.0), config.raised_threshold));
        assert!(navbar_raised(ScrollPosition::new(51.0), config.raised_threshold));
        assert!(!back_to_top_visible(
            ScrollPosition::new(300.0),
            config.back_to_top_threshold
        ));
        assert!(back_to_top_visible(
            ScrollPosition::new(301.0),
            config.back_to_top_threshold
        ));
    }

    #[test]
    fn parallax_freezes_past_hero() {
        assert_eq!(parallax_offset(ScrollPosition::new(200.0), 600.0, 0.5), Some(100.0));
        assert_eq!(parallax_offset(ScrollPosition::new(600.0), 600.0, 0.5), None);
        assert_eq!(parallax_offset(ScrollPosition::new(10_000.0), 600.0, 0.5), None);
    }

    proptest! {
        /// The resolved boundary's window contains the position, and a `None`
        /// result means no window does.
        #[test]
        fn resolution_matches_window_containment(
            offset in 0.0_f64..5000.0,
            heights in proptest::collection::vec(50.0_f64..800.0, 1..8),
        ) {
            // Build non-overlapping boundaries stacked from the top.
            let mut top = 0.0;
            let mut sections = Vec::new();
            for (i, h) in heights.iter().enumerate() {
                sections.push(boundary(&alloc::format!("s{i}"), top, *h));
                top += h;
            }

            let position = ScrollPosition::new(offset);
            let resolved = resolve_active_section(position, &sections, 100.0);
            let contains = |b: &SectionBoundary| {
                offset >= b.top - 100.0 && offset < b.top - 100.0 + b.height
            };
            match resolved {
                Some(i) => prop_assert!(contains(&sections[i])),
                None => prop_assert!(!sections.iter().any(contains)),
            }
        }
    }
}
