use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent, Node};

use crate::config::selectors;
use crate::dom::collect_nodes;

/// Keys the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Tab,
    /// Enter or Space, the keyboard equivalents of a click.
    Activate,
    Other,
}

impl ModalKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "Escape" => ModalKey::Escape,
            "Tab" => ModalKey::Tab,
            "Enter" | " " => ModalKey::Activate,
            _ => ModalKey::Other,
        }
    }
}

/// Index focus should jump to when Tab (or Shift+Tab when `backwards`) is
/// pressed on `current` among `len` focusable elements. `None` leaves the
/// browser's default tab order alone.
pub fn wrap_target(len: usize, current: Option<usize>, backwards: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match (current, backwards) {
        (Some(0), true) => Some(len - 1),
        (Some(i), false) if i == len - 1 => Some(0),
        _ => None,
    }
}

/// Keeps Tab cycling inside `container` while it carries the active class.
pub struct FocusTrap {
    document: Document,
    container: HtmlElement,
}

impl FocusTrap {
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self { document, container }
    }

    pub fn is_armed(&self) -> bool {
        self.container.class_list().contains(selectors::ACTIVE_CLASS)
    }

    // Queried on every keypress so content swapped in while open is picked up.
    fn focusable_elements(&self) -> Vec<HtmlElement> {
        match self.container.query_selector_all(selectors::FOCUSABLE) {
            Ok(nodes) => collect_nodes(&nodes),
            Err(_) => Vec::new(),
        }
    }

    pub fn handle_keydown(&self, event: &KeyboardEvent) {
        if !self.is_armed() || ModalKey::from_key(&event.key()) != ModalKey::Tab {
            return;
        }

        let focusable = self.focusable_elements();
        let current = self.document.active_element().and_then(|active| {
            let active: &Node = active.unchecked_ref();
            focusable.iter().position(|el| el.is_same_node(Some(active)))
        });

        if let Some(target) = wrap_target(focusable.len(), current, event.shift_key()) {
            event.prevent_default();
            let _ = focusable[target].focus();
        }
    }
}
