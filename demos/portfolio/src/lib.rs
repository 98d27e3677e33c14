// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo: single-page portfolio interactivity driven by scrollwork.
//!
//! Wires the page's DOM contract (navbar, hamburger, nav menu, sections,
//! hero, contact form, back-to-top control, profile card) to the
//! synchronizer: [`ScrollSource`] feeds debounced scroll ticks,
//! [`VisibilityWatcher`]s feed reveal triggers, timer loops drive the typing
//! banner and stat counter, and [`DomPresenter`] applies every projection.
//!
//! Build with: `wasm-pack build --target web demos/portfolio`
//!
//! Then serve `demos/portfolio/` and open `index.html` in a browser.
//!
//! [`ScrollSource`]: scrollwork_backend_web::ScrollSource
//! [`VisibilityWatcher`]: scrollwork_backend_web::VisibilityWatcher
//! [`DomPresenter`]: scrollwork_backend_web::DomPresenter

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, MouseEvent,
};

use scrollwork_backend_web::{
    BannerKind, DomPresenter, IntervalLoop, Presenter as _, ScrollSource, TickLoop, Timeout,
    VisibilityWatcher, smooth_scroll_to,
};
use scrollwork_core::counter::{self, Counter};
use scrollwork_core::effects::{self, tilt_angles};
use scrollwork_core::form::{self, ContactSubmission};
use scrollwork_core::page::{PageSync, RevealKind, SyncChanges};
use scrollwork_core::reveal::VisibilityThreshold;
use scrollwork_core::scroll::{self, SyncConfig};
use scrollwork_core::time::Duration;
use scrollwork_core::trace::Tracer;
use scrollwork_core::typing::{Typewriter, TypingDelays};

/// Rotating hero subtitle roles.
const ROLES: [&str; 6] = [
    "Senior Software Developer",
    "Full Stack Developer",
    "JavaScript Expert",
    "React Specialist",
    "Node.js Developer",
    "Technical Lead",
];

/// The stat counter's target (years of experience).
const EXPERIENCE_YEARS: u64 = 13;

/// Delay before the typing effect starts after load.
const TYPING_START_DELAY: Duration = Duration::from_millis(1000);

/// Delay before hero text/image opacity is restored after load.
const PRELOAD_FADE_DELAY: Duration = Duration::from_millis(100);

struct AppState {
    page: PageSync,
    presenter: DomPresenter,
    reveal_watcher: Option<VisibilityWatcher>,
    trigger_watcher: Option<VisibilityWatcher>,
    counter_loops: Vec<IntervalLoop>,
    banner_timer: Option<Timeout>,
}

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");

    scrollwork_backend_web::install_fault_hook();

    let config = SyncConfig::portfolio();
    let navbar: HtmlElement = document
        .get_element_by_id("navbar")
        .expect("page has no #navbar")
        .unchecked_into();

    let mut presenter = DomPresenter::new(navbar);
    for link in query_all(&document, ".nav-link") {
        presenter.push_nav_link(link);
    }
    if let Some(el) = query_id(&document, "hamburger") {
        presenter.set_hamburger(el);
    }
    if let Some(el) = query_id(&document, "navMenu") {
        presenter.set_nav_menu(el);
    }
    if let Some(el) = query_id(&document, "backToTop") {
        presenter.set_back_to_top(el);
    }
    if let Some(el) = query_one(&document, ".hero") {
        presenter.set_hero(el);
    }
    if let Some(el) = query_one(&document, ".hero-subtitle") {
        presenter.set_subtitle(el);
    }
    if let Some(el) = query_id(&document, "formMessage") {
        presenter.set_banner(el);
    }

    let state = Rc::new(RefCell::new(AppState {
        page: PageSync::new(config),
        presenter,
        reveal_watcher: None,
        trigger_watcher: None,
        counter_loops: Vec::new(),
        banner_timer: None,
    }));

    init_watchers(&state)?;
    register_reveals(&document, &state);
    init_scroll(&document, &state);
    init_nav(&document, &state);
    init_form(&document, &state);
    init_typing(&state);
    init_decor(&document);
    init_accessibility(&document, &state);

    web_sys::console::log_2(
        &JsValue::from_str("%c\u{1f44b} Hello! Welcome to my portfolio"),
        &JsValue::from_str("color: #6366f1; font-size: 20px; font-weight: bold;"),
    );
    web_sys::console::log_2(
        &JsValue::from_str("%cInterested in working together? Contact me at joinvkc@gmail.com"),
        &JsValue::from_str("color: #06b6d4; font-size: 14px;"),
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// Element lookup helpers
// ---------------------------------------------------------------------------

fn query_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id).map(|el| el.unchecked_into())
}

fn query_one(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .map(|el| el.unchecked_into())
}

fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let mut out = Vec::new();
    let Ok(nodes) = document.query_selector_all(selector) else {
        return out;
    };
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            out.push(node.unchecked_into());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Visibility wiring
// ---------------------------------------------------------------------------

fn init_watchers(state: &Rc<RefCell<AppState>>) -> Result<(), JsValue> {
    let reveal_state = Rc::clone(state);
    let reveal_watcher = VisibilityWatcher::new(VisibilityThreshold::REVEAL, move |slot, ratio| {
        on_visibility(&reveal_state, slot, ratio);
    })?;

    let trigger_state = Rc::clone(state);
    let trigger_watcher = VisibilityWatcher::new(VisibilityThreshold::HALF, move |slot, ratio| {
        on_visibility(&trigger_state, slot, ratio);
    })?;

    let mut s = state.borrow_mut();
    s.reveal_watcher = Some(reveal_watcher);
    s.trigger_watcher = Some(trigger_watcher);
    Ok(())
}

fn on_visibility(state: &Rc<RefCell<AppState>>, slot: u32, ratio: f64) {
    let mut s = state.borrow_mut();
    let changes = s.page.observe_visibility(slot, ratio, &mut Tracer::none());
    if changes.is_empty() {
        return;
    }

    // Destructure to satisfy the borrow checker: mutable page + presenter,
    // shared watchers.
    let AppState {
        ref mut page,
        ref mut presenter,
        ref reveal_watcher,
        ref trigger_watcher,
        ref mut counter_loops,
        ..
    } = *s;
    presenter.apply(page, &changes);

    for &slot in &changes.unobserve {
        match page.reveal_kind(slot) {
            Some(RevealKind::FadeIn | RevealKind::Timeline) => {
                if let Some(watcher) = reveal_watcher {
                    watcher.unwatch(slot);
                }
            }
            Some(RevealKind::SkillStagger | RevealKind::Counter) => {
                if let Some(watcher) = trigger_watcher {
                    watcher.unwatch(slot);
                }
            }
            None => {}
        }
    }

    for &slot in &changes.revealed {
        if page.reveal_kind(slot) == Some(RevealKind::Counter) {
            counter_loops.push(start_counter(state, slot));
        }
    }
}

fn start_counter(state: &Rc<RefCell<AppState>>, slot: u32) -> IntervalLoop {
    let mut stat = Counter::with_default_duration(EXPERIENCE_YEARS);
    let st = Rc::clone(state);
    let tick = IntervalLoop::new(move || {
        let frame = stat.tick();
        st.borrow().presenter.set_element_text(slot, &frame.display);
        !frame.done
    });
    tick.start(counter::TICK_INTERVAL);
    tick
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a page has far fewer than u32::MAX animated elements"
)]
fn register_reveals(document: &Document, state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    let AppState {
        ref mut page,
        ref mut presenter,
        ref reveal_watcher,
        ref trigger_watcher,
        ..
    } = *s;
    let (Some(reveal_watcher), Some(trigger_watcher)) = (reveal_watcher, trigger_watcher) else {
        return;
    };

    // Scroll-reveal cards.
    for el in query_all(
        document,
        ".about-card, .skill-category, .award-card, .contact-info, .contact-form",
    ) {
        let slot = page.register_reveal(VisibilityThreshold::REVEAL, RevealKind::FadeIn);
        el.class_list().add_1("scroll-animation").ok();
        presenter.put_element(slot, el.clone(), Duration::ZERO);
        reveal_watcher.watch(slot, &el);
    }

    // Timeline items slide in with a per-item stagger.
    let items = query_all(document, ".timeline-item");
    for (el, step) in items
        .iter()
        .zip(effects::stagger(items.len() as u32, effects::TIMELINE_STEP))
    {
        let slot = page.register_reveal(VisibilityThreshold::REVEAL, RevealKind::Timeline);
        el.class_list().add_1("scroll-animation").ok();
        presenter.put_element(slot, el.clone(), step.delay);
        reveal_watcher.watch(slot, el);
    }

    // Skill tags stagger once the skills section is half visible.
    if let Some(skills) = query_one(document, ".skills") {
        let slot = page.register_reveal(VisibilityThreshold::HALF, RevealKind::SkillStagger);
        presenter.put_element(slot, skills.clone(), Duration::ZERO);
        trigger_watcher.watch(slot, &skills);
    }

    // Stat counter starts once the experience stat is half visible.
    if let Some(stat) = query_one(document, ".about-card p")
        && stat.text_content().unwrap_or_default().contains("Years")
    {
        let slot = page.register_reveal(VisibilityThreshold::HALF, RevealKind::Counter);
        presenter.put_element(slot, stat.clone(), Duration::ZERO);
        trigger_watcher.watch(slot, &stat);
    }
}

// ---------------------------------------------------------------------------
// Scroll wiring
// ---------------------------------------------------------------------------

fn init_scroll(document: &Document, state: &Rc<RefCell<AppState>>) {
    let doc = document.clone();
    let st = Rc::clone(state);
    let debounce_window = state.borrow().page.config().debounce_window;

    let source = ScrollSource::new(debounce_window, move |tick| {
        let boundaries = scrollwork_backend_web::measure_sections(&doc);
        let hero_height = scrollwork_backend_web::measure_hero_height(&doc);

        let mut s = st.borrow_mut();
        let AppState {
            ref mut page,
            ref mut presenter,
            ..
        } = *s;
        let changes = page.observe_scroll(tick, &boundaries, hero_height, &mut Tracer::none());
        presenter.apply(page, &changes);
    });
    source.attach();

    // Keep the source alive — there is no graceful shutdown on the web.
    core::mem::forget(source);
}

// ---------------------------------------------------------------------------
// Navigation wiring
// ---------------------------------------------------------------------------

fn apply_changes(state: &Rc<RefCell<AppState>>, changes: &SyncChanges) {
    let mut s = state.borrow_mut();
    let AppState {
        ref page,
        ref mut presenter,
        ..
    } = *s;
    presenter.apply(page, changes);
}

fn init_nav(document: &Document, state: &Rc<RefCell<AppState>>) {
    // Hamburger toggles the menu.
    if let Some(hamburger) = query_id(document, "hamburger") {
        let st = Rc::clone(state);
        let toggle = Closure::wrap(Box::new(move || {
            let changes = st.borrow_mut().page.toggle_menu();
            apply_changes(&st, &changes);
        }) as Box<dyn FnMut()>);
        hamburger
            .add_event_listener_with_callback("click", toggle.as_ref().unchecked_ref())
            .ok();
        toggle.forget();
    }

    // Same-page anchors scroll smoothly, minus the fixed header; nav links
    // also close the mobile menu.
    let header_height = state.borrow().page.config().header_height;
    for anchor in query_all(document, "a[href^=\"#\"]") {
        let doc = document.clone();
        let st = Rc::clone(state);
        let is_nav_link = anchor.class_list().contains("nav-link");
        let anchor_el = anchor.clone();
        let click = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.prevent_default();

            if is_nav_link {
                let changes = st.borrow_mut().page.close_menu();
                apply_changes(&st, &changes);
            }

            let Some(href) = anchor_el.get_attribute("href") else {
                return;
            };
            // An unmatched (or bare "#") anchor silently no-ops.
            let Some(target) = query_one(&doc, &href) else {
                return;
            };
            smooth_scroll_to(scroll::scroll_target(
                f64::from(target.offset_top()),
                header_height,
            ));
        }) as Box<dyn FnMut(web_sys::Event)>);
        anchor
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .ok();
        click.forget();
    }

    // Back to top.
    if let Some(control) = query_id(document, "backToTop") {
        let up = Closure::wrap(Box::new(move || {
            smooth_scroll_to(0.0);
        }) as Box<dyn FnMut()>);
        control
            .add_event_listener_with_callback("click", up.as_ref().unchecked_ref())
            .ok();
        up.forget();
    }
}

// ---------------------------------------------------------------------------
// Contact form wiring
// ---------------------------------------------------------------------------

fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

fn init_form(document: &Document, state: &Rc<RefCell<AppState>>) {
    let Some(form) = query_id(document, "contactForm") else {
        return;
    };
    let form: HtmlFormElement = form.unchecked_into();

    // The banner self-clears after a fixed delay; re-arming on each
    // submission keeps only the latest deadline.
    let st = Rc::clone(state);
    let banner_timer = Timeout::new(move || {
        st.borrow().presenter.clear_banner();
    });
    state.borrow_mut().banner_timer = Some(banner_timer);

    let doc = document.clone();
    let st = Rc::clone(state);
    let form_el = form.clone();
    let submit = Closure::wrap(Box::new(move |event: web_sys::Event| {
        event.prevent_default();

        let submission = ContactSubmission {
            name: field_value(&doc, "name"),
            email: field_value(&doc, "email"),
            subject: field_value(&doc, "subject"),
            message: field_value(&doc, "message"),
        };

        if let Err(error) = submission.validate() {
            show_banner(&st, error.banner(), BannerKind::Error);
            return;
        }

        let button = form_el
            .query_selector(".btn")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        if let Some(ref button) = button {
            button.class_list().add_1("loading").ok();
            button.set_disabled(true);
        }

        let outcome = submission
            .mailto(form::RECIPIENT)
            .map_err(|e| JsValue::from_str(e.banner()))
            .and_then(|uri| scrollwork_backend_web::redirect(&uri));
        match outcome {
            Ok(()) => {
                show_banner(&st, form::SUCCESS_BANNER, BannerKind::Success);
                form_el.reset();
            }
            Err(_) => show_banner(&st, form::FALLBACK_BANNER, BannerKind::Error),
        }

        if let Some(ref button) = button {
            button.class_list().remove_1("loading").ok();
            button.set_disabled(false);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    form.add_event_listener_with_callback("submit", submit.as_ref().unchecked_ref())
        .ok();
    submit.forget();
}

fn show_banner(state: &Rc<RefCell<AppState>>, text: &str, kind: BannerKind) {
    let s = state.borrow();
    s.presenter.show_banner(text, kind);
    if let Some(ref timer) = s.banner_timer {
        timer.arm(form::BANNER_TTL);
    }
}

// ---------------------------------------------------------------------------
// Typing effect
// ---------------------------------------------------------------------------

fn init_typing(state: &Rc<RefCell<AppState>>) {
    let mut typewriter = Typewriter::new(
        ROLES.iter().map(|r| r.to_string()).collect(),
        TypingDelays::portfolio(),
    );

    let st = Rc::clone(state);
    let typing = TickLoop::new(move || {
        let frame = typewriter.tick();
        st.borrow().presenter.set_subtitle_text(frame.text);
        Some(frame.next_delay)
    });
    typing.start(TYPING_START_DELAY);

    // Keep the loop alive for the life of the page.
    core::mem::forget(typing);
}

// ---------------------------------------------------------------------------
// Decorative effects
// ---------------------------------------------------------------------------

#[expect(
    clippy::cast_possible_truncation,
    reason = "a page has far fewer than u32::MAX floating badges"
)]
fn init_decor(document: &Document) {
    // Floating badges start on load, staggered.
    let badges = query_all(document, ".floating-badge");
    for (badge, step) in badges
        .iter()
        .zip(effects::stagger(badges.len() as u32, effects::BADGE_STEP))
    {
        DomPresenter::float_badge(badge, step.delay);
    }

    // Profile card tilts toward the pointer.
    if let Some(card) = query_one(document, ".profile-card") {
        let card_move = card.clone();
        let tilt = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = card_move.get_bounding_client_rect();
            let angles = tilt_angles(
                f64::from(event.client_x()) - rect.left(),
                f64::from(event.client_y()) - rect.top(),
                rect.width(),
                rect.height(),
            );
            DomPresenter::apply_tilt(&card_move, angles);
        }) as Box<dyn FnMut(MouseEvent)>);
        card.add_event_listener_with_callback("mousemove", tilt.as_ref().unchecked_ref())
            .ok();
        tilt.forget();

        let card_leave = card.clone();
        let rest = Closure::wrap(Box::new(move || {
            DomPresenter::reset_tilt(&card_leave);
        }) as Box<dyn FnMut()>);
        card.add_event_listener_with_callback("mouseleave", rest.as_ref().unchecked_ref())
            .ok();
        rest.forget();
    }

    // External links never leak an opener.
    for link in query_all(document, "a[target=\"_blank\"]") {
        link.set_attribute("rel", "noopener noreferrer").ok();
    }
}

// ---------------------------------------------------------------------------
// Accessibility, preloader, print
// ---------------------------------------------------------------------------

fn init_accessibility(document: &Document, state: &Rc<RefCell<AppState>>) {
    // Escape closes the mobile menu.
    let st = Rc::clone(state);
    let keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.key() == "Escape" {
            let changes = st.borrow_mut().page.close_menu();
            apply_changes(&st, &changes);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document
        .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
        .ok();
    keydown.forget();

    // Keyboard focus gets a visible outline; one shared listener pair reads
    // the event target.
    let focus = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(el) = event.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) {
            let s = el.style();
            let _ = s.set_property("outline", "2px solid var(--primary-color)");
            let _ = s.set_property("outline-offset", "2px");
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    let blur = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(el) = event.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) {
            let _ = el.style().set_property("outline", "none");
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    for el in query_all(document, "a, button, input, textarea") {
        el.add_event_listener_with_callback("focus", focus.as_ref().unchecked_ref())
            .ok();
        el.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())
            .ok();
    }
    focus.forget();
    blur.forget();

    // Preloader: mark the body loaded, then restore hero opacity.
    if let Some(body) = document.body() {
        body.class_list().add_1("loaded").ok();
    }
    let doc = document.clone();
    let fade_in = Timeout::new(move || {
        for el in query_all(&doc, ".hero-text, .hero-image") {
            let _ = el.style().set_property("opacity", "1");
        }
    });
    fade_in.arm(PRELOAD_FADE_DELAY);
    // One-shot, page-lifetime; dropping it would cancel the pending fade.
    core::mem::forget(fade_in);

    // Print mode expands collapsed sections via a body class.
    if let Some(window) = web_sys::window() {
        let doc = document.clone();
        let before = Closure::wrap(Box::new(move || {
            if let Some(body) = doc.body() {
                body.class_list().add_1("printing").ok();
            }
        }) as Box<dyn FnMut()>);
        let doc = document.clone();
        let after = Closure::wrap(Box::new(move || {
            if let Some(body) = doc.body() {
                body.class_list().remove_1("printing").ok();
            }
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("beforeprint", before.as_ref().unchecked_ref())
            .ok();
        window
            .add_event_listener_with_callback("afterprint", after.as_ref().unchecked_ref())
            .ok();
        before.forget();
        after.forget();
    }
}
