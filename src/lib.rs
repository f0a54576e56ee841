//! Progressive enhancements for the static landing page: the video modal,
//! smooth same-page scrolling, image fade-in, reveal-on-scroll and button
//! hover lift.
//!
//! Everything is wired up by [`initialize`] once the document is parsed and
//! stays attached for as long as the returned [`PageBehaviors`] lives.

use log::{debug, error};
use web_sys::Document;

pub mod config;
pub mod dom;
pub mod error;

pub mod behaviors {
    pub mod focus_trap;
    pub mod hover;
    pub mod scroll_reveal;
    pub mod video_modal;
}

pub mod utils {
    pub mod debounce;
    pub mod validation;
}

use behaviors::hover::{self, ResizeHook};
use behaviors::scroll_reveal::{self, RevealObserver};
use behaviors::video_modal::{self, AttachedVideoModal, VideoModalElements};
use config::PageConfig;
use dom::EventListener;
use error::BehaviorError;

/// Everything attached to the page. Dropping it detaches all of it.
#[derive(Default)]
pub struct PageBehaviors {
    pub video_modal: Option<AttachedVideoModal>,
    pub reveal: Option<RevealObserver>,
    pub resize: Option<ResizeHook>,
    listeners: Vec<EventListener>,
}

impl PageBehaviors {
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

pub fn initialize(document: &Document) -> PageBehaviors {
    initialize_with(document, &PageConfig::default())
}

/// Attaches each behavior independently. A behavior that fails to attach is
/// logged and skipped; the rest of the page keeps working.
pub fn initialize_with(document: &Document, config: &PageConfig) -> PageBehaviors {
    let mut page = PageBehaviors::default();

    page.video_modal = report(
        "video modal",
        video_modal::attach(document, VideoModalElements::query(document), config),
    )
    .flatten();

    for (name, attached) in [
        ("smooth scroll", scroll_reveal::attach_smooth_scroll(document)),
        ("image fade-in", scroll_reveal::attach_image_fade(document)),
        ("hover lift", hover::attach_hover_lift(document)),
    ] {
        if let Some(listeners) = report(name, attached) {
            page.listeners.extend(listeners);
        }
    }

    page.reveal = report("reveal on scroll", scroll_reveal::attach_reveal(document, config));

    page.resize = match web_sys::window() {
        Some(window) => report("resize hook", hover::attach_resize(&window, config)),
        None => None,
    };

    debug!("Page behaviors initialized");
    page
}

fn report<T>(name: &str, result: Result<T, BehaviorError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!("Failed to attach {}: {}", name, err);
            None
        }
    }
}
