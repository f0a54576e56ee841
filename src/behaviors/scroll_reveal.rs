use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::config::{selectors, PageConfig};
use crate::dom::{collect_nodes, set_styles, EventListener};
use crate::error::BehaviorError;

/// Element a same-page href like `#pricing` points at. A bare `#` or a
/// missing id gives `None`.
pub fn anchor_target(document: &Document, href: &str) -> Option<Element> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    document.get_element_by_id(id)
}

/// Smooth-scrolls same-page anchors to their target. Links whose target does
/// not exist keep the browser's default behavior.
pub fn attach_smooth_scroll(document: &Document) -> Result<Vec<EventListener>, BehaviorError> {
    let anchors: Vec<Element> = collect_nodes(&document.query_selector_all(selectors::SAME_PAGE_ANCHORS)?);
    let mut listeners = Vec::with_capacity(anchors.len());

    for anchor in anchors {
        let document = document.clone();
        let link = anchor.clone();
        listeners.push(EventListener::new(&anchor, "click", move |event: Event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if let Some(target) = anchor_target(&document, &href) {
                event.prevent_default();
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?);
    }

    debug!("Smooth scroll attached to {} anchors", listeners.len());
    Ok(listeners)
}

/// Fades in images that are still loading; already loaded ones are forced
/// visible right away.
pub fn attach_image_fade(document: &Document) -> Result<Vec<EventListener>, BehaviorError> {
    let images: Vec<HtmlImageElement> = collect_nodes(&document.query_selector_all(selectors::IMAGES)?);
    let mut listeners = Vec::new();

    for image in images {
        if image.complete() {
            set_styles(&image, &[("opacity", "1")])?;
            continue;
        }

        set_styles(&image, &[("opacity", "0"), ("transition", "opacity 0.3s ease")])?;
        let loaded = image.clone();
        listeners.push(EventListener::new(&image, "load", move |_| {
            let _ = set_styles(&loaded, &[("opacity", "1")]);
        })?);
    }

    debug!("Image fade-in waiting on {} images", listeners.len());
    Ok(listeners)
}

/// Owns the observer behind the reveal-on-scroll effect. Dropping it
/// disconnects the observer.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    observed: usize,
}

impl RevealObserver {
    pub fn observed(&self) -> usize {
        self.observed
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn reveal(entries: Array) {
    for entry in entries.iter() {
        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
            continue;
        };
        // One way only: leaving the viewport does not hide it again.
        if !entry.is_intersecting() {
            continue;
        }
        if let Ok(target) = entry.target().dyn_into::<HtmlElement>() {
            let _ = set_styles(&target, &[("opacity", "1"), ("transform", "translateY(0)")]);
        }
    }
}

pub fn attach_reveal(document: &Document, config: &PageConfig) -> Result<RevealObserver, BehaviorError> {
    let callback = Closure::wrap(
        Box::new(|entries: Array, _observer: IntersectionObserver| reveal(entries))
            as Box<dyn FnMut(Array, IntersectionObserver)>,
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

    let targets: Vec<HtmlElement> = collect_nodes(&document.query_selector_all(selectors::REVEAL_TARGETS)?);
    for target in &targets {
        set_styles(
            target,
            &[
                ("opacity", "0"),
                ("transform", "translateY(20px)"),
                ("transition", "opacity 0.6s ease, transform 0.6s ease"),
            ],
        )?;
        observer.observe(target);
    }

    debug!("Reveal-on-scroll observing {} elements", targets.len());
    Ok(RevealObserver {
        observer,
        _callback: callback,
        observed: targets.len(),
    })
}
