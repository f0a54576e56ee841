use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, error, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlIFrameElement, KeyboardEvent, Node};

use crate::behaviors::focus_trap::{FocusTrap, ModalKey};
use crate::config::{self, selectors, PageConfig};
use crate::dom::EventListener;
use crate::error::BehaviorError;

/// The parts of the modal markup, looked up once at startup.
pub struct VideoModalElements {
    pub thumbnail: Option<HtmlElement>,
    pub modal: Option<HtmlElement>,
    pub close_button: Option<HtmlElement>,
    pub iframe: Option<HtmlIFrameElement>,
}

impl VideoModalElements {
    pub fn query(document: &Document) -> Self {
        Self {
            thumbnail: element_by_id(document, selectors::VIDEO_THUMBNAIL_ID),
            modal: element_by_id(document, selectors::VIDEO_MODAL_ID),
            close_button: document
                .query_selector(selectors::VIDEO_CLOSE)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            iframe: element_by_id(document, selectors::VIDEO_IFRAME_ID),
        }
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok())
}

/// Opens and closes the embedded video overlay.
///
/// Visibility is the `active` class on the modal container. While it is set
/// the iframe points at the embed URL; once cleared the iframe source is
/// empty so playback stops.
pub struct VideoModal {
    document: Document,
    modal: HtmlElement,
    iframe: Option<HtmlIFrameElement>,
    close_button: Option<HtmlElement>,
    video_id: String,
    focus_delay_ms: u32,
    previous_active: RefCell<Option<HtmlElement>>,
    pending_load: RefCell<Option<EventListener>>,
    pending_focus: RefCell<Option<Timeout>>,
}

impl VideoModal {
    pub fn new(
        document: Document,
        modal: HtmlElement,
        iframe: Option<HtmlIFrameElement>,
        close_button: Option<HtmlElement>,
        config: &PageConfig,
    ) -> Self {
        Self {
            document,
            modal,
            iframe,
            close_button,
            video_id: config.video_id.clone(),
            focus_delay_ms: config.focus_delay_ms,
            previous_active: RefCell::new(None),
            pending_load: RefCell::new(None),
            pending_focus: RefCell::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.class_list().contains(selectors::ACTIVE_CLASS)
    }

    pub fn modal(&self) -> &HtmlElement {
        &self.modal
    }

    pub fn open(&self) {
        if let Err(err) = self.try_open() {
            error!("Failed to open video modal: {}", err);
            let _ = self
                .modal
                .class_list()
                .remove_2(selectors::LOADING_CLASS, selectors::ACTIVE_CLASS);
            self.open_fallback();
        }
    }

    fn try_open(&self) -> Result<(), BehaviorError> {
        *self.previous_active.borrow_mut() = self
            .document
            .active_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let iframe = self
            .iframe
            .as_ref()
            .ok_or(BehaviorError::MissingElement(selectors::VIDEO_IFRAME_ID))?;

        self.modal
            .class_list()
            .add_2(selectors::ACTIVE_CLASS, selectors::LOADING_CLASS)?;
        self.modal.set_attribute("aria-hidden", "false")?;
        self.set_body_overflow("hidden")?;

        let modal = self.modal.clone();
        let on_load = EventListener::once(iframe, "load", move |_| {
            let _ = modal.class_list().remove_1(selectors::LOADING_CLASS);
        })?;
        self.pending_load.replace(Some(on_load));
        iframe.set_src(&config::embed_url(&self.video_id));

        if let Some(close_button) = &self.close_button {
            let close_button = close_button.clone();
            let timeout = Timeout::new(self.focus_delay_ms, move || {
                let _ = close_button.focus();
            });
            self.pending_focus.replace(Some(timeout));
        }

        debug!("Opened video modal for {}", self.video_id);
        Ok(())
    }

    fn open_fallback(&self) {
        let url = config::watch_url(&self.video_id);
        match web_sys::window() {
            Some(window) => {
                if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
                    error!("Failed to open fallback video page: {:?}", err);
                }
            }
            None => error!("No window to open {} in", url),
        }
    }

    /// Safe to call when already closed.
    pub fn close(&self) {
        if let Err(err) = self.try_close() {
            error!("Failed to close video modal: {}", err);
        }
    }

    fn try_close(&self) -> Result<(), BehaviorError> {
        // A late focus on the close button would undo the restore below.
        drop(self.pending_focus.take());
        drop(self.pending_load.take());

        if let Some(iframe) = &self.iframe {
            iframe.set_src("");
        }
        self.modal
            .class_list()
            .remove_2(selectors::ACTIVE_CLASS, selectors::LOADING_CLASS)?;
        self.modal.set_attribute("aria-hidden", "true")?;
        self.set_body_overflow("auto")?;

        if let Some(previous) = self.previous_active.take() {
            previous.focus()?;
        }
        Ok(())
    }

    fn set_body_overflow(&self, value: &str) -> Result<(), BehaviorError> {
        let body = self.document.body().ok_or(BehaviorError::MissingElement("body"))?;
        body.style().set_property("overflow", value)?;
        Ok(())
    }
}

/// The controller plus the listeners that drive it.
pub struct AttachedVideoModal {
    pub controller: Rc<VideoModal>,
    _listeners: Vec<EventListener>,
}

/// Wires the thumbnail, close control, backdrop and document keys to a
/// [`VideoModal`]. Returns `Ok(None)` when the page has no modal.
pub fn attach(
    document: &Document,
    elements: VideoModalElements,
    config: &PageConfig,
) -> Result<Option<AttachedVideoModal>, BehaviorError> {
    let VideoModalElements {
        thumbnail,
        modal,
        close_button,
        iframe,
    } = elements;

    let Some(modal) = modal else {
        warn!("No #{} on page, video modal disabled", selectors::VIDEO_MODAL_ID);
        return Ok(None);
    };
    if iframe.is_none() {
        warn!("No #{} on page, video will open externally", selectors::VIDEO_IFRAME_ID);
    }

    let controller = Rc::new(VideoModal::new(
        document.clone(),
        modal.clone(),
        iframe,
        close_button.clone(),
        config,
    ));
    let mut listeners = Vec::new();

    if let Some(thumbnail) = &thumbnail {
        let on_click = controller.clone();
        listeners.push(EventListener::new(thumbnail, "click", move |_| on_click.open())?);

        let on_key = controller.clone();
        listeners.push(EventListener::new(thumbnail, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if ModalKey::from_key(&event.key()) == ModalKey::Activate {
                event.prevent_default();
                on_key.open();
            }
        })?);
    }

    if let Some(close_button) = &close_button {
        let on_close = controller.clone();
        listeners.push(EventListener::new(close_button, "click", move |_| on_close.close())?);
    }

    // Backdrop clicks close; clicks inside the content don't.
    {
        let on_backdrop = controller.clone();
        let backdrop = modal.clone();
        listeners.push(EventListener::new(&modal, "click", move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let backdrop: &Node = &backdrop;
            if target.is_same_node(Some(backdrop))
                || target.class_list().contains(selectors::VIDEO_OVERLAY_CLASS)
            {
                on_backdrop.close();
            }
        })?);
    }

    {
        let on_key = controller.clone();
        let trap = FocusTrap::new(document.clone(), modal);
        listeners.push(EventListener::new(document, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if !on_key.is_open() {
                return;
            }
            match ModalKey::from_key(&event.key()) {
                ModalKey::Escape => on_key.close(),
                _ => trap.handle_keydown(event),
            }
        })?);
    }

    debug!("Video modal attached with {} listeners", listeners.len());
    Ok(Some(AttachedVideoModal {
        controller,
        _listeners: listeners,
    }))
}
