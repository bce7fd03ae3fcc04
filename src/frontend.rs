use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_console as console;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::{Interval, Timeout};
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    window, Document, Element, FormData, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::motion::{
    fade_up_delay_secs, timeline_stagger_delay_ms, CounterAnimation, Typewriter,
    TYPEWRITER_START_DELAY_MS, TYPEWRITER_TICK_MS,
};
use crate::view_state::{
    active_section, hero_parallax, navbar_scrolled, reveal_due, MenuState, SectionBounds,
};

const COUNTER_VISIBILITY_THRESHOLD: f64 = 0.5;
const TIMELINE_VISIBILITY_THRESHOLD: f64 = 0.2;
const LAZY_VISIBILITY_THRESHOLD: f64 = 0.1;
const LAZY_ROOT_MARGIN: &str = "50px";
const CONTACT_CONFIRMATION_LABEL: &str = "Message Sent! ✓";
const CONTACT_CONFIRMATION_BACKGROUND: &str =
    "linear-gradient(135deg, #4CAF50 0%, #45a049 100%)";
const CONTACT_RESET_DELAY_MS: u32 = 3_000;
const RIPPLE_LIFETIME_MS: u32 = 600;
const RIPPLE_BASE_CSS: &str = "position: absolute; width: 20px; height: 20px; \
     background: rgba(212, 165, 116, 0.3); border-radius: 50%; transform: scale(0); \
     animation: ripple 0.6s ease-out; pointer-events: none;";
const RIPPLE_KEYFRAMES_CSS: &str = "@keyframes ripple { to { transform: scale(20); opacity: 0; } }";
const CURSOR_GLOW_CSS: &str = "position: fixed; width: 300px; height: 300px; \
     background: radial-gradient(circle, rgba(212, 165, 116, 0.1) 0%, transparent 70%); \
     border-radius: 50%; pointer-events: none; z-index: 9999; \
     transform: translate(-50%, -50%); transition: opacity 0.3s ease; opacity: 0;";

fn scroll_offset(window: &Window) -> f64 {
    window.page_y_offset().unwrap_or(0.0)
}

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0)
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

fn has_fine_pointer(window: &Window) -> bool {
    window
        .match_media("(pointer: fine)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn query_one_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

struct Elements {
    navbar: Option<Element>,
    nav_toggle: Option<Element>,
    nav_menu: Option<Element>,
    nav_links: Vec<Element>,
    anchor_links: Vec<Element>,
    reveal_elements: Vec<Element>,
    counter_elements: Vec<Element>,
    hero: Option<HtmlElement>,
    hero_content: Option<HtmlElement>,
    hero_backdrop: Option<HtmlElement>,
    hero_greeting: Option<Element>,
    sections: Vec<HtmlElement>,
    skill_cards: Vec<HtmlElement>,
    timeline_items: Vec<Element>,
    contact_form: Option<HtmlFormElement>,
    portfolio_cards: Vec<HtmlElement>,
    fade_up_elements: Vec<HtmlElement>,
    lazy_cards: Vec<Element>,
}

impl Elements {
    fn capture(document: &Document) -> Self {
        Self {
            navbar: document.get_element_by_id("navbar"),
            nav_toggle: document.get_element_by_id("navToggle"),
            nav_menu: document.get_element_by_id("navMenu"),
            nav_links: query_all(document, ".nav-link"),
            anchor_links: query_all(document, "a[href^=\"#\"]"),
            reveal_elements: query_all(document, ".reveal"),
            counter_elements: query_all(document, ".highlight-number"),
            hero: query_one_html(document, ".hero"),
            hero_content: query_one_html(document, ".hero-content"),
            hero_backdrop: query_one_html(document, ".hero-bg"),
            hero_greeting: document.query_selector(".hero-greeting").ok().flatten(),
            sections: query_all_html(document, "section[id]"),
            skill_cards: query_all_html(document, ".skill-card"),
            timeline_items: query_all(document, ".timeline-item"),
            contact_form: document
                .get_element_by_id("contactForm")
                .and_then(|element| element.dyn_into::<HtmlFormElement>().ok()),
            portfolio_cards: query_all_html(document, ".portfolio-card"),
            fade_up_elements: query_all_html(document, ".animate-fade-up"),
            lazy_cards: query_all(document, ".skill-card, .event-card, .portfolio-card"),
        }
    }
}

struct Page {
    window: Window,
    document: Document,
    body: Option<HtmlElement>,
    elements: Elements,
}

impl Page {
    fn capture() -> Result<Self, &'static str> {
        let window = window().ok_or("window is unavailable")?;
        let document = window.document().ok_or("document is unavailable")?;
        let body = document.body();
        let elements = Elements::capture(&document);

        Ok(Self {
            window,
            document,
            body,
            elements,
        })
    }
}

struct IntersectionWatcher {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl IntersectionWatcher {
    fn create<F>(init: &IntersectionObserverInit, handler: F) -> Option<Self>
    where
        F: FnMut(Array) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array)>::new(handler);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init).ok()?;

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe_all(&self, elements: &[Element]) {
        for element in elements {
            self.observer.observe(element);
        }
    }
}

impl Drop for IntersectionWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn intersection_init(threshold: f64, root_margin: Option<&str>) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));

    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }

    init
}

pub trait SubmissionSink {
    fn deliver(&self, fields: &HashMap<String, String>);
}

pub struct ConsoleSink;

impl SubmissionSink for ConsoleSink {
    fn deliver(&self, fields: &HashMap<String, String>) {
        if let Ok(payload) = serde_json::to_string(fields) {
            console::log!("contact form submitted:", payload);
        }
    }
}

trait Effect {
    fn attach(&mut self, page: &Page);
}

#[derive(Default)]
struct NavbarScrollEffect {
    last_offset: Rc<Cell<f64>>,
    listener: Option<EventListener>,
}

impl Effect for NavbarScrollEffect {
    fn attach(&mut self, page: &Page) {
        let Some(navbar) = page.elements.navbar.clone() else {
            return;
        };

        let win = page.window.clone();
        let last_offset = Rc::clone(&self.last_offset);
        self.listener = Some(EventListener::new(&page.window, "scroll", move |_| {
            let offset = scroll_offset(&win);
            set_class(&navbar, "scrolled", navbar_scrolled(offset));
            last_offset.set(offset);
        }));
    }
}

fn apply_menu_state(toggle: &Element, menu: &Element, body: Option<&HtmlElement>, open: bool) {
    set_class(toggle, "active", open);
    set_class(menu, "active", open);

    let Some(body) = body else {
        return;
    };

    if open {
        let _ = body.style().set_property("overflow", "hidden");
    } else {
        let _ = body.style().remove_property("overflow");
    }
}

#[derive(Default)]
struct MobileMenuEffect {
    state: Rc<RefCell<MenuState>>,
    listeners: Vec<EventListener>,
}

impl Effect for MobileMenuEffect {
    fn attach(&mut self, page: &Page) {
        let (Some(toggle), Some(menu)) = (
            page.elements.nav_toggle.clone(),
            page.elements.nav_menu.clone(),
        ) else {
            return;
        };

        {
            let state = Rc::clone(&self.state);
            let toggle_handle = toggle.clone();
            let menu_handle = menu.clone();
            let body = page.body.clone();
            self.listeners
                .push(EventListener::new(&toggle, "click", move |_| {
                    let open = state.borrow_mut().toggle();
                    apply_menu_state(&toggle_handle, &menu_handle, body.as_ref(), open);
                }));
        }

        for link in &page.elements.nav_links {
            let state = Rc::clone(&self.state);
            let toggle_handle = toggle.clone();
            let menu_handle = menu.clone();
            let body = page.body.clone();
            self.listeners
                .push(EventListener::new(link, "click", move |_| {
                    state.borrow_mut().close();
                    apply_menu_state(&toggle_handle, &menu_handle, body.as_ref(), false);
                }));
        }
    }
}

#[derive(Default)]
struct AnchorScrollEffect {
    listeners: Vec<EventListener>,
}

impl Effect for AnchorScrollEffect {
    fn attach(&mut self, page: &Page) {
        for anchor in &page.elements.anchor_links {
            let document = page.document.clone();
            let source = anchor.clone();
            self.listeners.push(EventListener::new_with_options(
                anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();

                    let Some(href) = source.get_attribute("href") else {
                        return;
                    };
                    let Ok(Some(target)) = document.query_selector(&href) else {
                        return;
                    };

                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                },
            ));
        }
    }
}

fn reveal_pass(window: &Window, elements: &[Element]) {
    let height = viewport_height(window);

    for element in elements {
        if reveal_due(element.get_bounding_client_rect().top(), height) {
            let _ = element.class_list().add_1("active");
        }
    }
}

#[derive(Default)]
struct RevealEffect {
    listener: Option<EventListener>,
}

impl Effect for RevealEffect {
    fn attach(&mut self, page: &Page) {
        if page.elements.reveal_elements.is_empty() {
            return;
        }

        reveal_pass(&page.window, &page.elements.reveal_elements);

        let win = page.window.clone();
        let elements = page.elements.reveal_elements.clone();
        self.listener = Some(EventListener::new(&page.window, "scroll", move |_| {
            reveal_pass(&win, &elements);
        }));
    }
}

fn start_counter(window: &Window, element: Element) {
    let Some(target) = element
        .get_attribute("data-count")
        .and_then(|raw| raw.trim().parse::<u32>().ok())
    else {
        return;
    };

    let animation = CounterAnimation::new(target, now_ms(window));
    let win = window.clone();
    let frame_slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let frame_handle = Rc::clone(&frame_slot);

    *frame_slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let frame = animation.frame(timestamp);
        element.set_text_content(Some(&frame.value.to_string()));

        if frame.finished {
            frame_handle.borrow_mut().take();
            return;
        }

        if let Some(callback) = frame_handle.borrow().as_ref() {
            let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));

    if let Some(callback) = frame_slot.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
struct CounterEffect {
    watcher: Option<IntersectionWatcher>,
}

impl Effect for CounterEffect {
    fn attach(&mut self, page: &Page) {
        if page.elements.counter_elements.is_empty() {
            return;
        }

        let win = page.window.clone();
        let watcher = IntersectionWatcher::create(
            &intersection_init(COUNTER_VISIBILITY_THRESHOLD, None),
            move |entries| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    if target.class_list().contains("counted") {
                        continue;
                    }

                    let _ = target.class_list().add_1("counted");
                    start_counter(&win, target);
                }
            },
        );

        if let Some(watcher) = &watcher {
            watcher.observe_all(&page.elements.counter_elements);
        }
        self.watcher = watcher;
    }
}

#[derive(Default)]
struct HeroParallaxEffect {
    listener: Option<EventListener>,
}

impl Effect for HeroParallaxEffect {
    fn attach(&mut self, page: &Page) {
        let Some(hero) = page.elements.hero.clone() else {
            return;
        };

        let content = page.elements.hero_content.clone();
        let backdrop = page.elements.hero_backdrop.clone();
        if content.is_none() && backdrop.is_none() {
            return;
        }

        let win = page.window.clone();
        self.listener = Some(EventListener::new(&page.window, "scroll", move |_| {
            let offset = scroll_offset(&win);
            let Some(frame) = hero_parallax(offset, f64::from(hero.offset_height())) else {
                return;
            };

            if let Some(content) = content.as_ref() {
                let style = content.style();
                let _ = style.set_property(
                    "transform",
                    &format!("translateY({}px)", frame.content_drift_px),
                );
                let _ = style.set_property("opacity", &frame.content_opacity.to_string());
            }

            if let Some(backdrop) = backdrop.as_ref() {
                let _ = backdrop.style().set_property(
                    "transform",
                    &format!(
                        "scale({}) rotate({}deg)",
                        frame.backdrop_scale, frame.backdrop_rotate_deg
                    ),
                );
            }
        }));
    }
}

#[derive(Default)]
struct NavHighlightEffect {
    listener: Option<EventListener>,
}

impl Effect for NavHighlightEffect {
    fn attach(&mut self, page: &Page) {
        if page.elements.sections.is_empty() || page.elements.nav_links.is_empty() {
            return;
        }

        let sections = page.elements.sections.clone();
        let links: Vec<(String, Element)> = page
            .elements
            .nav_links
            .iter()
            .filter_map(|link| {
                let href = link.get_attribute("href")?;
                let id = href.strip_prefix('#')?.to_string();
                Some((id, link.clone()))
            })
            .collect();

        let win = page.window.clone();
        self.listener = Some(EventListener::new(&page.window, "scroll", move |_| {
            let offset = scroll_offset(&win);
            let bounds: Vec<SectionBounds> = sections
                .iter()
                .map(|section| SectionBounds {
                    top: f64::from(section.offset_top()),
                    height: f64::from(section.offset_height()),
                })
                .collect();

            let Some(active) = active_section(offset, &bounds) else {
                return;
            };
            let active_id = sections[active].id();

            for (id, link) in &links {
                set_class(link, "active", *id == active_id);
            }
        }));
    }
}

#[derive(Default)]
struct SkillGlowEffect {
    listeners: Vec<EventListener>,
}

impl Effect for SkillGlowEffect {
    fn attach(&mut self, page: &Page) {
        for card in &page.elements.skill_cards {
            let card_handle = card.clone();
            self.listeners
                .push(EventListener::new(card, "mouseenter", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };

                    let rect = card_handle.get_bounding_client_rect();
                    let style = card_handle.style();
                    let _ = style.set_property(
                        "--mouse-x",
                        &format!("{}px", f64::from(event.client_x()) - rect.left()),
                    );
                    let _ = style.set_property(
                        "--mouse-y",
                        &format!("{}px", f64::from(event.client_y()) - rect.top()),
                    );
                }));
        }
    }
}

#[derive(Default)]
struct TimelineEffect {
    watcher: Option<IntersectionWatcher>,
}

impl Effect for TimelineEffect {
    fn attach(&mut self, page: &Page) {
        if page.elements.timeline_items.is_empty() {
            return;
        }

        let watcher = IntersectionWatcher::create(
            &intersection_init(TIMELINE_VISIBILITY_THRESHOLD, None),
            move |entries| {
                let mut batch_index = 0;

                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    Timeout::new(timeline_stagger_delay_ms(batch_index), move || {
                        let _ = target.class_list().add_1("active");
                    })
                    .forget();
                    batch_index += 1;
                }
            },
        );

        if let Some(watcher) = &watcher {
            watcher.observe_all(&page.elements.timeline_items);
        }
        self.watcher = watcher;
    }
}

fn collect_form_fields(form: &HtmlFormElement) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let Ok(data) = FormData::new_with_form(form) else {
        return fields;
    };

    for entry in data.entries().into_iter().flatten() {
        let pair = Array::from(&entry);
        let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) else {
            continue;
        };
        fields.insert(name, value);
    }

    fields
}

struct ContactFormEffect {
    sink: Rc<dyn SubmissionSink>,
    listener: Option<EventListener>,
}

impl ContactFormEffect {
    fn new(sink: Rc<dyn SubmissionSink>) -> Self {
        Self {
            sink,
            listener: None,
        }
    }
}

impl Effect for ContactFormEffect {
    fn attach(&mut self, page: &Page) {
        let Some(form) = page.elements.contact_form.clone() else {
            return;
        };

        let sink = Rc::clone(&self.sink);
        let form_handle = form.clone();
        self.listener = Some(EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                sink.deliver(&collect_form_fields(&form_handle));

                let button = form_handle
                    .query_selector("button[type=submit]")
                    .ok()
                    .flatten()
                    .and_then(|element| element.dyn_into::<HtmlElement>().ok());

                if let Some(button) = button {
                    let original_label = button.text_content().unwrap_or_default();
                    button.set_text_content(Some(CONTACT_CONFIRMATION_LABEL));
                    let _ = button
                        .style()
                        .set_property("background", CONTACT_CONFIRMATION_BACKGROUND);

                    Timeout::new(CONTACT_RESET_DELAY_MS, move || {
                        button.set_text_content(Some(&original_label));
                        let _ = button.style().remove_property("background");
                    })
                    .forget();
                }

                form_handle.reset();
            },
        ));
    }
}

fn install_ripple_keyframes(document: &Document) {
    let Some(head) = document.head() else {
        return;
    };
    let Ok(style) = document.create_element("style") else {
        return;
    };

    style.set_text_content(Some(RIPPLE_KEYFRAMES_CSS));
    let _ = head.append_child(&style);
}

fn spawn_ripple(document: &Document, card: &HtmlElement, event: &MouseEvent) {
    let Some(ripple) = document
        .create_element("div")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    ripple.style().set_css_text(RIPPLE_BASE_CSS);
    let rect = card.get_bounding_client_rect();
    let _ = ripple.style().set_property(
        "left",
        &format!("{}px", f64::from(event.client_x()) - rect.left()),
    );
    let _ = ripple.style().set_property(
        "top",
        &format!("{}px", f64::from(event.client_y()) - rect.top()),
    );

    let card_style = card.style();
    let _ = card_style.set_property("position", "relative");
    let _ = card_style.set_property("overflow", "hidden");

    if card.append_child(&ripple).is_err() {
        return;
    }

    Timeout::new(RIPPLE_LIFETIME_MS, move || ripple.remove()).forget();
}

#[derive(Default)]
struct RippleEffect {
    listeners: Vec<EventListener>,
}

impl Effect for RippleEffect {
    fn attach(&mut self, page: &Page) {
        if page.elements.portfolio_cards.is_empty() {
            return;
        }

        install_ripple_keyframes(&page.document);

        for card in &page.elements.portfolio_cards {
            let document = page.document.clone();
            let card_handle = card.clone();
            self.listeners
                .push(EventListener::new(card, "click", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    spawn_ripple(&document, &card_handle, event);
                }));
        }
    }
}

#[derive(Default)]
struct TypewriterEffect {
    ticker: Rc<RefCell<Option<Interval>>>,
}

impl Effect for TypewriterEffect {
    fn attach(&mut self, page: &Page) {
        let Some(greeting) = page.elements.hero_greeting.clone() else {
            return;
        };
        let Some(text) = greeting.text_content().filter(|text| !text.is_empty()) else {
            return;
        };

        greeting.set_text_content(Some(""));

        let script = Typewriter::new(&text);
        let ticker_slot = Rc::clone(&self.ticker);
        Timeout::new(TYPEWRITER_START_DELAY_MS, move || {
            let script = Rc::new(RefCell::new(script));
            let ticker_for_tick = Rc::clone(&ticker_slot);
            let interval = Interval::new(TYPEWRITER_TICK_MS, move || {
                match script.borrow_mut().step() {
                    Some(revealed) => greeting.set_text_content(Some(revealed)),
                    None => {
                        ticker_for_tick.borrow_mut().take();
                    }
                }
            });
            *ticker_slot.borrow_mut() = Some(interval);
        })
        .forget();
    }
}

#[derive(Default)]
struct CursorGlowEffect {
    visible: Rc<Cell<bool>>,
    listeners: Vec<EventListener>,
}

impl Effect for CursorGlowEffect {
    fn attach(&mut self, page: &Page) {
        if !has_fine_pointer(&page.window) {
            return;
        }
        let Some(body) = page.body.clone() else {
            return;
        };
        let Some(glow) = page
            .document
            .create_element("div")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        glow.set_class_name("cursor-glow");
        glow.style().set_css_text(CURSOR_GLOW_CSS);
        if body.append_child(&glow).is_err() {
            return;
        }

        {
            let visible = Rc::clone(&self.visible);
            let glow = glow.clone();
            self.listeners.push(EventListener::new(
                &page.document,
                "mousemove",
                move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };

                    let style = glow.style();
                    let _ = style.set_property("left", &format!("{}px", event.client_x()));
                    let _ = style.set_property("top", &format!("{}px", event.client_y()));

                    if !visible.get() {
                        let _ = style.set_property("opacity", "1");
                        visible.set(true);
                    }
                },
            ));
        }

        let visible = Rc::clone(&self.visible);
        self.listeners
            .push(EventListener::new(&page.document, "mouseleave", move |_| {
                let _ = glow.style().set_property("opacity", "0");
                visible.set(false);
            }));
    }
}

#[derive(Default)]
struct PageLoadEffect {
    listener: Option<EventListener>,
}

impl Effect for PageLoadEffect {
    fn attach(&mut self, page: &Page) {
        let body = page.body.clone();
        let fade_ups = page.elements.fade_up_elements.clone();
        self.listener = Some(EventListener::once(&page.window, "load", move |_| {
            if let Some(body) = body {
                let _ = body.class_list().add_1("loaded");
            }

            for (index, element) in fade_ups.iter().enumerate() {
                let _ = element
                    .style()
                    .set_property("animation-delay", &format!("{}s", fade_up_delay_secs(index)));
            }
        }));
    }
}

#[derive(Default)]
struct LazyMarkEffect {
    watcher: Option<IntersectionWatcher>,
}

impl Effect for LazyMarkEffect {
    fn attach(&mut self, page: &Page) {
        if page.elements.lazy_cards.is_empty() {
            return;
        }

        let watcher = IntersectionWatcher::create(
            &intersection_init(LAZY_VISIBILITY_THRESHOLD, Some(LAZY_ROOT_MARGIN)),
            move |entries| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let _ = entry.target().class_list().add_1("in-view");
                    }
                }
            },
        );

        if let Some(watcher) = &watcher {
            watcher.observe_all(&page.elements.lazy_cards);
        }
        self.watcher = watcher;
    }
}

fn effect_set(sink: Rc<dyn SubmissionSink>) -> Vec<Box<dyn Effect>> {
    vec![
        Box::new(NavbarScrollEffect::default()),
        Box::new(MobileMenuEffect::default()),
        Box::new(AnchorScrollEffect::default()),
        Box::new(RevealEffect::default()),
        Box::new(CounterEffect::default()),
        Box::new(HeroParallaxEffect::default()),
        Box::new(NavHighlightEffect::default()),
        Box::new(SkillGlowEffect::default()),
        Box::new(TimelineEffect::default()),
        Box::new(ContactFormEffect::new(sink)),
        Box::new(RippleEffect::default()),
        Box::new(TypewriterEffect::default()),
        Box::new(CursorGlowEffect::default()),
        Box::new(PageLoadEffect::default()),
        Box::new(LazyMarkEffect::default()),
    ]
}

pub struct PageEffects {
    effects: Vec<Box<dyn Effect>>,
}

impl PageEffects {
    pub fn mount() -> Result<Self, &'static str> {
        Self::mount_with_sink(Rc::new(ConsoleSink))
    }

    pub fn mount_with_sink(sink: Rc<dyn SubmissionSink>) -> Result<Self, &'static str> {
        let page = Page::capture()?;
        let mut effects = effect_set(sink);

        for effect in &mut effects {
            effect.attach(&page);
        }

        Ok(Self { effects })
    }

    // Leaves every listener and observer attached for the rest of the page
    // session.
    pub fn forget(self) {
        std::mem::forget(self.effects);
    }

    pub fn dispose(self) {
        drop(self.effects);
    }
}

pub fn run() {
    console::log!(
        "%c✨ Portfolio Website",
        "font-size: 24px; font-weight: bold; \
         background: linear-gradient(135deg, #8B6914, #D4A574); \
         -webkit-background-clip: text; -webkit-text-fill-color: transparent;"
    );
    console::log!(
        "%cDesigned with ❤️ for creative storytelling",
        "font-size: 12px; color: #8B6914;"
    );

    match PageEffects::mount() {
        Ok(effects) => effects.forget(),
        Err(reason) => console::error!("page effects unavailable:", reason),
    }
}
