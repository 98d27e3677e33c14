// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM projection of synchronizer state.
//!
//! [`DomPresenter`] holds the page's contract elements and applies
//! [`SyncChanges`] as one-way class/style/text mutations. State never flows
//! back out of the DOM: the presenter writes what the synchronizer decided
//! and nothing else reads the classes to make decisions.
//!
//! Optional elements (a page without a hero, without a back-to-top control)
//! are held as `Option` and skipped when absent.

use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

use scrollwork_core::backend::Presenter;
use scrollwork_core::effects::{self, StaggerStep, TiltAngles};
use scrollwork_core::page::{MenuState, PageSync, RevealKind, SyncChanges};
use scrollwork_core::time::Duration;

/// Class toggled on nav links, the hamburger, and the nav menu.
const ACTIVE: &str = "active";
/// Class giving the navbar its raised (scrolled) style.
const SCROLLED: &str = "scrolled";
/// Class for revealed elements and the back-to-top control.
const VISIBLE: &str = "visible";

/// Which style a form banner takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    /// The submission was handed to the mail client.
    Success,
    /// Validation or the redirect failed.
    Error,
}

impl BannerKind {
    const fn as_class(self) -> &'static str {
        match self {
            Self::Success => "form-message success",
            Self::Error => "form-message error",
        }
    }
}

/// Maps synchronizer output onto the page's contract elements.
pub struct DomPresenter {
    navbar: HtmlElement,
    nav_links: Vec<HtmlElement>,
    hamburger: Option<HtmlElement>,
    nav_menu: Option<HtmlElement>,
    back_to_top: Option<HtmlElement>,
    hero: Option<HtmlElement>,
    subtitle: Option<HtmlElement>,
    banner: Option<HtmlElement>,
    /// Reveal elements by registration slot.
    elements: Vec<Option<HtmlElement>>,
    /// Entrance delay by registration slot.
    delays: Vec<Duration>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("nav_links", &self.nav_links.len())
            .field("elements", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter for a page whose navbar is `navbar`.
    #[must_use]
    pub fn new(navbar: HtmlElement) -> Self {
        Self {
            navbar,
            nav_links: Vec::new(),
            hamburger: None,
            nav_menu: None,
            back_to_top: None,
            hero: None,
            subtitle: None,
            banner: None,
            elements: Vec::new(),
            delays: Vec::new(),
        }
    }

    /// Adds a nav link; order must match the section boundary order fed to
    /// the synchronizer.
    pub fn push_nav_link(&mut self, link: HtmlElement) {
        self.nav_links.push(link);
    }

    /// Sets the hamburger toggle element.
    pub fn set_hamburger(&mut self, el: HtmlElement) {
        self.hamburger = Some(el);
    }

    /// Sets the collapsible nav menu element.
    pub fn set_nav_menu(&mut self, el: HtmlElement) {
        self.nav_menu = Some(el);
    }

    /// Sets the back-to-top control.
    pub fn set_back_to_top(&mut self, el: HtmlElement) {
        self.back_to_top = Some(el);
    }

    /// Sets the hero element (parallax target).
    pub fn set_hero(&mut self, el: HtmlElement) {
        self.hero = Some(el);
    }

    /// Sets the hero subtitle text node (typing effect target).
    pub fn set_subtitle(&mut self, el: HtmlElement) {
        self.subtitle = Some(el);
    }

    /// Sets the form message region.
    pub fn set_banner(&mut self, el: HtmlElement) {
        self.banner = Some(el);
    }

    /// Stores a reveal element at the given registration slot with an
    /// entrance delay (zero for undelayed reveals).
    pub fn put_element(&mut self, slot: u32, el: HtmlElement, delay: Duration) {
        let slot = slot as usize;
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
            self.delays.resize(slot + 1, Duration::ZERO);
        }
        self.elements[slot] = Some(el);
        self.delays[slot] = delay;
    }

    /// Returns the element stored at `slot`, if any.
    #[must_use]
    pub fn get_element(&self, slot: u32) -> Option<&HtmlElement> {
        self.elements.get(slot as usize).and_then(|e| e.as_ref())
    }

    /// Writes the typing-effect text into the hero subtitle.
    pub fn set_subtitle_text(&self, text: &str) {
        if let Some(ref subtitle) = self.subtitle {
            subtitle.set_text_content(Some(text));
        }
    }

    /// Writes counter (or any other) text into the element at `slot`.
    pub fn set_element_text(&self, slot: u32, text: &str) {
        if let Some(el) = self.get_element(slot) {
            el.set_text_content(Some(text));
        }
    }

    /// Shows a form banner; it stays until [`clear_banner`](Self::clear_banner).
    pub fn show_banner(&self, text: &str, kind: BannerKind) {
        if let Some(ref banner) = self.banner {
            banner.set_text_content(Some(text));
            banner.set_class_name(kind.as_class());
        }
    }

    /// Clears the form banner back to its idle state.
    pub fn clear_banner(&self) {
        if let Some(ref banner) = self.banner {
            banner.set_class_name("form-message");
        }
    }

    /// Applies the pointer tilt to a card.
    pub fn apply_tilt(card: &HtmlElement, angles: TiltAngles) {
        let scale = effects::TILT_SCALE;
        let css = format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) scale3d({scale}, {scale}, {scale})",
            angles.rotate_x, angles.rotate_y,
        );
        let _ = card.style().set_property("transform", &css);
    }

    /// Returns a card to its untilted rest state.
    pub fn reset_tilt(card: &HtmlElement) {
        let _ = card
            .style()
            .set_property("transform", "perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)");
    }

    /// Starts a floating badge's idle animation after `delay`.
    pub fn float_badge(badge: &HtmlElement, delay: Duration) {
        let _ = badge.style().set_property(
            "animation",
            &format!("floatBadge 4s ease-in-out {}s infinite", delay_seconds(delay)),
        );
    }

    fn stagger_tags(&self, container: &HtmlElement) {
        let Ok(tags) = container.query_selector_all(".skill-tag") else {
            return;
        };
        let steps: Vec<StaggerStep> =
            effects::stagger(tags.length(), effects::SKILL_TAG_STEP).collect();
        for step in steps {
            let Some(node) = tags.item(step.index) else {
                continue;
            };
            let tag: HtmlElement = node.unchecked_into();
            let s = tag.style();
            let _ = s.set_property(
                "animation",
                &format!("fadeIn 0.5s ease-out {}s forwards", delay_seconds(step.delay)),
            );
            let _ = s.set_property("opacity", "0");
        }
    }

    fn reveal_slot(&self, slot: u32, kind: RevealKind) {
        let Some(el) = self.get_element(slot) else {
            return;
        };
        match kind {
            RevealKind::FadeIn | RevealKind::Timeline => {
                let delay = self
                    .delays
                    .get(slot as usize)
                    .copied()
                    .unwrap_or(Duration::ZERO);
                if delay > Duration::ZERO {
                    let _ = el
                        .style()
                        .set_property("transition-delay", &format!("{}s", delay_seconds(delay)));
                }
                el.class_list().add_1(VISIBLE).ok();
            }
            RevealKind::SkillStagger => self.stagger_tags(el),
            // The counter's visual output is timer frames written through
            // `set_element_text`; nothing to do at reveal time.
            RevealKind::Counter => {}
        }
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, page: &PageSync, changes: &SyncChanges) {
        // 1. Nav marker: clear all, then set the active entry.
        if changes.nav_changed {
            for link in &self.nav_links {
                link.class_list().remove_1(ACTIVE).ok();
            }
            if let Some(active) = changes.active_nav
                && let Some(link) = self.nav_links.get(active)
            {
                link.class_list().add_1(ACTIVE).ok();
            }
        }

        // 2. Raised navbar style.
        if let Some(raised) = changes.navbar_raised {
            set_class(&self.navbar, SCROLLED, raised);
        }

        // 3. Back-to-top visibility.
        if let Some(visible) = changes.back_to_top
            && let Some(ref control) = self.back_to_top
        {
            set_class(control, VISIBLE, visible);
        }

        // 4. Hero parallax translate.
        if let Some(offset) = changes.parallax
            && let Some(ref hero) = self.hero
        {
            let _ = hero
                .style()
                .set_property("transform", &format!("translateY({offset}px)"));
        }

        // 5. Menu projection.
        if let Some(menu) = changes.menu {
            let open = menu == MenuState::Open;
            if let Some(ref hamburger) = self.hamburger {
                set_class(hamburger, ACTIVE, open);
            }
            if let Some(ref nav_menu) = self.nav_menu {
                set_class(nav_menu, ACTIVE, open);
            }
        }

        // 6. One-shot reveals, by registered payload kind.
        for &slot in &changes.revealed {
            if let Some(kind) = page.reveal_kind(slot) {
                self.reveal_slot(slot, kind);
            }
        }
    }
}

/// Adds or removes `class` to match `on`.
fn set_class(el: &HtmlElement, class: &str, on: bool) {
    let list = el.class_list();
    if on {
        list.add_1(class).ok();
    } else {
        list.remove_1(class).ok();
    }
}

/// Requests a smooth animated scroll to the given document offset.
pub fn smooth_scroll_to(offset: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = web_sys::ScrollToOptions::new();
    options.set_top(offset);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Formats a [`Duration`] as fractional CSS seconds.
fn delay_seconds(delay: Duration) -> f64 {
    delay.ticks() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_kinds_map_to_classes() {
        assert_eq!(BannerKind::Success.as_class(), "form-message success");
        assert_eq!(BannerKind::Error.as_class(), "form-message error");
    }

    #[test]
    fn delay_seconds_is_fractional() {
        assert_eq!(delay_seconds(Duration::from_millis(100)), 0.1);
        assert_eq!(delay_seconds(Duration::from_millis(1500)), 1.5);
        assert_eq!(delay_seconds(Duration::ZERO), 0.0);
    }
}
