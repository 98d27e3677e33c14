// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hero typing effect: a two-phase cyclic state machine.
//!
//! [`Typewriter`] cycles indefinitely through a fixed list of role strings,
//! typing each one out a character per tick, holding, deleting a character
//! per tick, resting, then advancing to the next role. Each
//! [`tick`](Typewriter::tick) returns the text to display and the delay until
//! the next tick; a backend drives the machine with a self-rescheduling
//! timer.
//!
//! Character positions are Unicode scalar counts, never byte offsets, so
//! role strings may contain any text.

use alloc::string::String;
use alloc::vec::Vec;

use crate::time::Duration;

/// Tick delays for each phase of the typing cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingDelays {
    /// Delay after typing one character.
    pub type_tick: Duration,
    /// Delay after deleting one character.
    pub delete_tick: Duration,
    /// Hold after a role is fully typed, before deleting begins.
    pub hold: Duration,
    /// Rest after a role is fully deleted, before the next role begins.
    pub rest: Duration,
}

impl TypingDelays {
    /// The portfolio page's pacing.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            type_tick: Duration::from_millis(100),
            delete_tick: Duration::from_millis(50),
            hold: Duration::from_millis(2000),
            rest: Duration::from_millis(500),
        }
    }
}

impl Default for TypingDelays {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// One step of the typing animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeFrame<'a> {
    /// The text to display after this tick.
    pub text: &'a str,
    /// Delay until the next tick.
    pub next_delay: Duration,
}

/// Cyclic typing state over a fixed, ordered list of roles.
///
/// State is `(role, chars, deleting)`: the current role index, how many of
/// its characters are shown, and which phase the machine is in. There is no
/// termination condition; the cycle repeats for the life of the page.
#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<String>,
    delays: TypingDelays,
    role: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    /// Creates a typewriter at the start of the first role.
    ///
    /// # Panics
    ///
    /// Panics if `roles` is empty.
    #[must_use]
    pub fn new(roles: Vec<String>, delays: TypingDelays) -> Self {
        assert!(!roles.is_empty(), "typewriter needs at least one role");
        Self {
            roles,
            delays,
            role: 0,
            chars: 0,
            deleting: false,
        }
    }

    /// Advances one tick and returns the text to display plus the delay
    /// until the next tick.
    pub fn tick(&mut self) -> TypeFrame<'_> {
        let len = self.roles[self.role].chars().count();

        let mut delay = if self.deleting {
            self.chars = self.chars.saturating_sub(1);
            self.delays.delete_tick
        } else {
            self.chars = (self.chars + 1).min(len);
            self.delays.type_tick
        };

        if !self.deleting && self.chars == len {
            delay = self.delays.hold;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.role = (self.role + 1) % self.roles.len();
            delay = self.delays.rest;
        }

        TypeFrame {
            text: char_prefix(&self.roles[self.role], self.chars),
            next_delay: delay,
        }
    }

    /// The current role index.
    #[must_use]
    pub const fn role(&self) -> usize {
        self.role
    }

    /// How many characters of the current role are shown.
    #[must_use]
    pub const fn chars(&self) -> usize {
        self.chars
    }

    /// Whether the machine is in its deleting phase.
    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        self.deleting
    }
}

/// Returns the prefix of `s` that is `chars` Unicode scalars long.
fn char_prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn roles() -> Vec<String> {
        vec!["Developer".to_string(), "Lead".to_string()]
    }

    #[test]
    fn forward_ticks_type_one_char_each() {
        let mut tw = Typewriter::new(roles(), TypingDelays::portfolio());
        for n in 1..=5 {
            let frame = tw.tick();
            assert_eq!(frame.text, &"Developer"[..n]);
            assert_eq!(frame.next_delay, Duration::from_millis(100));
            assert_eq!(tw.chars(), n);
        }
    }

    #[test]
    fn full_cycle_advances_role_mod_len() {
        let mut tw = Typewriter::new(roles(), TypingDelays::portfolio());

        // Type out "Developer" (9 chars); the final tick holds.
        for _ in 0..8 {
            tw.tick();
        }
        let held = tw.tick();
        assert_eq!(held.text, "Developer");
        assert_eq!(held.next_delay, Duration::from_millis(2000));
        assert!(tw.is_deleting());

        // Delete back to zero; the final tick rests and advances the role.
        for _ in 0..8 {
            let frame = tw.tick();
            assert_eq!(frame.next_delay, Duration::from_millis(50));
        }
        let rested = tw.tick();
        assert_eq!(rested.text, "");
        assert_eq!(rested.next_delay, Duration::from_millis(500));
        assert_eq!(tw.chars(), 0);
        assert_eq!(tw.role(), 1);
        assert!(!tw.is_deleting());

        // Cycling through "Lead" wraps back to role 0.
        for _ in 0..8 {
            tw.tick();
        }
        assert_eq!(tw.role(), 0);
    }

    #[test]
    fn single_role_cycles_onto_itself() {
        let mut tw = Typewriter::new(vec!["Dev".to_string()], TypingDelays::portfolio());
        for _ in 0..6 {
            tw.tick();
        }
        assert_eq!(tw.role(), 0);
        assert_eq!(tw.chars(), 0);
    }

    #[test]
    fn char_prefix_respects_scalar_boundaries() {
        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("héllo", 10), "héllo");
        assert_eq!(char_prefix("", 3), "");
    }

    #[test]
    #[should_panic(expected = "at least one role")]
    fn empty_role_list_panics() {
        let _ = Typewriter::new(Vec::new(), TypingDelays::portfolio());
    }
}
