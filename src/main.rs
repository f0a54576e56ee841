use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Document};

use page_behaviors::config;

fn start(document: &Document) {
    let page = page_behaviors::initialize(document);
    // Behaviors stay attached for the lifetime of the page.
    std::mem::forget(page);
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page behaviors");
    let Some(document) = window().and_then(|w| w.document()) else {
        error!("No document available, page behaviors disabled");
        return;
    };

    // The wasm module can finish loading after DOMContentLoaded has fired.
    if document.ready_state() == "loading" {
        let ready = document.clone();
        let on_ready = Closure::once_into_js(move || start(&ready));
        if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
            error!("Failed to wait for DOMContentLoaded: {:?}", err);
        }
    } else {
        start(&document);
    }
}
