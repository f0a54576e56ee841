use std::rc::Rc;

use log::debug;
use web_sys::{Document, Event, HtmlElement, Window};

use crate::config::{selectors, PageConfig};
use crate::dom::{collect_nodes, set_styles, EventListener};
use crate::error::BehaviorError;
use crate::utils::debounce::{debounce, BrowserScheduler, Debounced};

pub const HOVER_LIFT: &str = "translateY(-2px)";
pub const HOVER_REST: &str = "translateY(0)";

/// Lifts every `.btn` slightly while the pointer is over it.
pub fn attach_hover_lift(document: &Document) -> Result<Vec<EventListener>, BehaviorError> {
    let buttons: Vec<HtmlElement> = collect_nodes(&document.query_selector_all(selectors::BUTTONS)?);
    let mut listeners = Vec::with_capacity(buttons.len() * 2);

    for button in buttons {
        let lifted = button.clone();
        listeners.push(EventListener::new(&button, "mouseenter", move |_| {
            let _ = set_styles(&lifted, &[("transform", HOVER_LIFT)]);
        })?);

        let rested = button.clone();
        listeners.push(EventListener::new(&button, "mouseleave", move |_| {
            let _ = set_styles(&rested, &[("transform", HOVER_REST)]);
        })?);
    }

    debug!("Hover lift attached to {} buttons", listeners.len() / 2);
    Ok(listeners)
}

/// Placeholder for responsive adjustments; nothing on the page needs one yet.
fn handle_resize(window: &Window) {
    let width = window.inner_width().ok().and_then(|w| w.as_f64());
    debug!("Viewport resized, width {:?}", width);
}

/// The debounced resize hook. Dropping it removes the listener and any
/// pending invocation.
pub struct ResizeHook {
    _listener: EventListener,
    debounced: Rc<Debounced<BrowserScheduler, Event>>,
}

impl ResizeHook {
    pub fn wait_ms(&self) -> u32 {
        self.debounced.wait_ms()
    }
}

impl Drop for ResizeHook {
    fn drop(&mut self) {
        self.debounced.cancel();
    }
}

pub fn attach_resize(window: &Window, config: &PageConfig) -> Result<ResizeHook, BehaviorError> {
    let resized = window.clone();
    let debounced = Rc::new(debounce(config.resize_debounce_ms, move |_event: Event| {
        handle_resize(&resized)
    }));

    let on_resize = debounced.clone();
    let listener = EventListener::new(window, "resize", move |event| on_resize.call(event))?;

    Ok(ResizeHook {
        _listener: listener,
        debounced,
    })
}
