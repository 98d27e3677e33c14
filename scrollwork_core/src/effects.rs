// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorative effect math: pointer tilt and staggered entrance delays.
//!
//! These are pure mappings from input geometry to presentation parameters;
//! the backend turns them into CSS. None of them hold state.

use crate::time::Duration;

/// Divisor mapping pointer distance from center to tilt degrees.
pub const TILT_DIVISOR: f64 = 20.0;

/// Uniform scale applied while a card is tilted.
pub const TILT_SCALE: f64 = 1.05;

/// Entrance delay step between consecutive skill tags.
pub const SKILL_TAG_STEP: Duration = Duration::from_millis(100);

/// Entrance delay step between consecutive timeline items.
pub const TIMELINE_STEP: Duration = Duration::from_millis(100);

/// Start-delay step between consecutive floating badges.
pub const BADGE_STEP: Duration = Duration::from_millis(500);

/// Tilt angles for a card under the pointer, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltAngles {
    /// Rotation about the X axis (pointer below center tilts forward).
    pub rotate_x: f64,
    /// Rotation about the Y axis (pointer right of center tilts away).
    pub rotate_y: f64,
}

/// Maps a pointer position within a `width` × `height` card to tilt angles.
///
/// The card tilts toward the pointer: vertical distance from center drives
/// `rotate_x`, horizontal distance drives `rotate_y` with inverted sign.
#[must_use]
pub fn tilt_angles(pointer_x: f64, pointer_y: f64, width: f64, height: f64) -> TiltAngles {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    TiltAngles {
        rotate_x: (pointer_y - center_y) / TILT_DIVISOR,
        rotate_y: (center_x - pointer_x) / TILT_DIVISOR,
    }
}

/// One element's slot in a staggered entrance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaggerStep {
    /// Position of the element within its group.
    pub index: u32,
    /// Delay before this element's animation starts.
    pub delay: Duration,
}

/// Yields a [`StaggerStep`] per element, delays spaced `step` apart.
pub fn stagger(count: u32, step: Duration) -> impl Iterator<Item = StaggerStep> {
    (0..count).map(move |index| StaggerStep {
        index,
        delay: step.saturating_mul(u64::from(index)),
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn tilt_is_zero_at_center() {
        let angles = tilt_angles(150.0, 100.0, 300.0, 200.0);
        assert_eq!(angles, TiltAngles { rotate_x: 0.0, rotate_y: 0.0 });
    }

    #[test]
    fn tilt_tracks_pointer_offset() {
        // Pointer at the bottom-right corner of a 300x200 card.
        let angles = tilt_angles(300.0, 200.0, 300.0, 200.0);
        assert_eq!(angles.rotate_x, 5.0);
        assert_eq!(angles.rotate_y, -7.5);
    }

    #[test]
    fn stagger_spaces_delays_evenly() {
        let steps: Vec<_> = stagger(4, SKILL_TAG_STEP).collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].delay, Duration::ZERO);
        assert_eq!(steps[3].delay, Duration::from_millis(300));
        assert_eq!(steps[3].index, 3);
    }

    #[test]
    fn empty_stagger_yields_nothing() {
        assert_eq!(stagger(0, BADGE_STEP).count(), 0);
    }
}
