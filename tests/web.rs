//! Browser tests. Run with `wasm-pack test --headless --firefox` (or
//! `--chrome`); native `cargo test` skips this file.
#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlIFrameElement, KeyboardEvent, KeyboardEventInit,
    MouseEvent, MouseEventInit, Node,
};

use page_behaviors::config::{embed_url, PageConfig, YOUTUBE_VIDEO_ID};
use page_behaviors::utils::debounce::debounce;
use page_behaviors::{initialize, initialize_with, PageBehaviors};

wasm_bindgen_test_configure!(run_in_browser);

const MODAL_PAGE: &str = r##"
    <div id="video-thumbnail" class="video-thumbnail" tabindex="0">Watch</div>
    <button id="outside" class="btn">Get started</button>
    <div id="video-modal" class="video-modal" aria-hidden="true">
        <div class="video-modal__overlay"></div>
        <div class="video-modal__content" id="modal-content">
            <button class="video-modal__close">Close</button>
            <iframe id="youtube-iframe"></iframe>
            <a href="#transcript" id="last-link">Transcript</a>
        </div>
    </div>
"##;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(html: &str) -> Document {
    let document = document();
    let body = document.body().unwrap();
    body.set_inner_html(html);
    let _ = body.style().remove_property("overflow");
    document
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> T {
    document.get_element_by_id(id).unwrap().dyn_into::<T>().unwrap()
}

fn modal(document: &Document) -> HtmlElement {
    by_id(document, "video-modal")
}

fn iframe(document: &Document) -> HtmlIFrameElement {
    by_id(document, "youtube-iframe")
}

fn is_focused(document: &Document, element: &Element) -> bool {
    let element: &Node = element;
    document
        .active_element()
        .map(|active| active.is_same_node(Some(element)))
        .unwrap_or(false)
}

/// Dispatches a cancelable keydown on `target`; returns whether it was
/// left un-prevented.
fn press(target: &Element, key: &str, shift: bool) -> bool {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_shift_key(shift);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

fn click(target: &Element) -> bool {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

fn video(page: &PageBehaviors) -> &page_behaviors::behaviors::video_modal::VideoModal {
    &page.video_modal.as_ref().unwrap().controller
}

#[wasm_bindgen_test]
fn open_shows_modal_with_embed_url_and_close_clears_it() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);
    let controller = video(&page);

    controller.open();
    assert!(controller.is_open());
    assert!(modal(&document).class_list().contains("loading"));
    assert_eq!(modal(&document).get_attribute("aria-hidden").as_deref(), Some("false"));
    assert_eq!(iframe(&document).src(), embed_url(YOUTUBE_VIDEO_ID));
    assert_eq!(
        document.body().unwrap().style().get_property_value("overflow").unwrap(),
        "hidden"
    );

    controller.close();
    assert!(!controller.is_open());
    assert!(!modal(&document).class_list().contains("loading"));
    assert_eq!(modal(&document).get_attribute("aria-hidden").as_deref(), Some("true"));
    assert!(iframe(&document).get_attribute("src").unwrap_or_default().is_empty());
    assert_eq!(
        document.body().unwrap().style().get_property_value("overflow").unwrap(),
        "auto"
    );
}

#[wasm_bindgen_test]
fn closing_twice_leaves_modal_hidden() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);
    let controller = video(&page);

    controller.open();
    controller.close();
    controller.close();

    assert!(!controller.is_open());
    assert!(iframe(&document).get_attribute("src").unwrap_or_default().is_empty());
}

#[wasm_bindgen_test]
fn thumbnail_click_and_enter_open_the_modal() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);
    let thumbnail: Element = by_id(&document, "video-thumbnail");

    click(&thumbnail);
    assert!(video(&page).is_open());
    video(&page).close();

    assert!(!press(&thumbnail, "Enter", false));
    assert!(video(&page).is_open());
    video(&page).close();

    assert!(!press(&thumbnail, " ", false));
    assert!(video(&page).is_open());
}

#[wasm_bindgen_test]
async fn focus_returns_to_element_focused_before_open() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);
    let thumbnail: HtmlElement = by_id(&document, "video-thumbnail");

    thumbnail.focus().unwrap();
    video(&page).open();
    TimeoutFuture::new(200).await;
    let close_button = document.query_selector(".video-modal__close").unwrap().unwrap();
    assert!(is_focused(&document, &close_button));

    video(&page).close();
    assert!(is_focused(&document, &thumbnail));
}

#[wasm_bindgen_test]
async fn quick_close_is_not_overridden_by_delayed_focus() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);
    let thumbnail: HtmlElement = by_id(&document, "video-thumbnail");

    thumbnail.focus().unwrap();
    video(&page).open();
    video(&page).close();
    TimeoutFuture::new(200).await;

    assert!(is_focused(&document, &thumbnail));
}

#[wasm_bindgen_test]
fn escape_closes_only_an_open_modal() {
    let document = mount(MODAL_PAGE);
    iframe(&document).set_src("about:blank");
    let page = initialize(&document);
    let body: Element = document.body().unwrap().into();

    press(&body, "Escape", false);
    assert!(!video(&page).is_open());
    assert_eq!(iframe(&document).src(), "about:blank");
    assert_eq!(modal(&document).get_attribute("aria-hidden").as_deref(), Some("true"));

    video(&page).open();
    press(&body, "Escape", false);
    assert!(!video(&page).is_open());
}

#[wasm_bindgen_test]
fn backdrop_click_closes_but_content_click_does_not() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);

    video(&page).open();
    click(&by_id::<Element>(&document, "modal-content"));
    assert!(video(&page).is_open());

    let overlay = document.query_selector(".video-modal__overlay").unwrap().unwrap();
    click(&overlay);
    assert!(!video(&page).is_open());

    video(&page).open();
    click(&modal(&document));
    assert!(!video(&page).is_open());
}

#[wasm_bindgen_test]
fn tab_cycles_within_open_modal() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);
    video(&page).open();

    let close_button: HtmlElement = document
        .query_selector(".video-modal__close")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let last_link: HtmlElement = by_id(&document, "last-link");

    last_link.focus().unwrap();
    assert!(!press(&last_link, "Tab", false));
    assert!(is_focused(&document, &close_button));

    assert!(!press(&close_button, "Tab", true));
    assert!(is_focused(&document, &last_link));
}

#[wasm_bindgen_test]
fn tab_in_the_middle_keeps_default_order() {
    let document = mount(MODAL_PAGE);
    let page = initialize(&document);
    video(&page).open();

    let iframe_el: HtmlElement = iframe(&document).into();
    iframe_el.focus().unwrap();
    if is_focused(&document, &iframe_el) {
        assert!(press(&iframe_el, "Tab", false));
    }
}

#[wasm_bindgen_test]
fn focus_trap_is_inert_while_hidden() {
    let document = mount(MODAL_PAGE);
    let _page = initialize(&document);
    let last_link: HtmlElement = by_id(&document, "last-link");

    last_link.focus().unwrap();
    assert!(press(&last_link, "Tab", false));
    assert!(is_focused(&document, &last_link));
}

#[wasm_bindgen_test]
fn page_without_modal_still_gets_other_behaviors() {
    let document = mount(r#"<button class="btn" id="cta">Go</button>"#);
    let page = initialize(&document);

    assert!(page.video_modal.is_none());
    assert_eq!(page.listener_count(), 2);
}

#[wasm_bindgen_test]
fn anchor_scrolls_only_to_existing_targets() {
    let document = mount(
        r##"
        <a href="#section1" id="to-section">Section</a>
        <a href="#missing" id="to-missing">Missing</a>
        <a href="#" id="to-top">Top</a>
        <div style="height: 3000px"></div>
        <section id="section1">Here</section>
    "##,
    );
    let _page = initialize(&document);

    assert!(!click(&by_id::<Element>(&document, "to-section")));
    assert!(click(&by_id::<Element>(&document, "to-missing")));
    assert!(click(&by_id::<Element>(&document, "to-top")));
}

#[wasm_bindgen_test]
fn loaded_images_are_forced_visible() {
    let document = mount(r#"<img id="pic" alt="no source">"#);
    let _page = initialize(&document);

    let image: HtmlElement = by_id(&document, "pic");
    assert_eq!(image.style().get_property_value("opacity").unwrap(), "1");
}

#[wasm_bindgen_test]
async fn reveal_targets_start_hidden_and_fade_in() {
    let document = mount(r#"<div class="feature" id="feature">Feature</div>"#);
    let page = initialize(&document);
    let feature: HtmlElement = by_id(&document, "feature");

    assert_eq!(page.reveal.as_ref().unwrap().observed(), 1);
    assert_eq!(feature.style().get_property_value("opacity").unwrap(), "0");
    assert_eq!(
        feature.style().get_property_value("transform").unwrap(),
        "translateY(20px)"
    );

    TimeoutFuture::new(300).await;
    assert_eq!(feature.style().get_property_value("opacity").unwrap(), "1");
    assert!(feature
        .style()
        .get_property_value("transform")
        .unwrap()
        .starts_with("translateY(0"));
}

#[wasm_bindgen_test]
fn buttons_lift_on_hover() {
    let document = mount(r#"<button class="btn" id="cta">Go</button>"#);
    let _page = initialize(&document);
    let button: HtmlElement = by_id(&document, "cta");

    button.dispatch_event(&Event::new("mouseenter").unwrap()).unwrap();
    assert_eq!(button.style().get_property_value("transform").unwrap(), "translateY(-2px)");

    button.dispatch_event(&Event::new("mouseleave").unwrap()).unwrap();
    assert!(button
        .style()
        .get_property_value("transform")
        .unwrap()
        .starts_with("translateY(0"));
}

#[wasm_bindgen_test]
fn dropping_page_behaviors_detaches_listeners() {
    let document = mount(r#"<button class="btn" id="cta">Go</button>"#);
    let page = initialize(&document);
    drop(page);

    let button: HtmlElement = by_id(&document, "cta");
    button.dispatch_event(&Event::new("mouseenter").unwrap()).unwrap();
    assert_eq!(button.style().get_property_value("transform").unwrap(), "");
}

#[wasm_bindgen_test]
fn custom_config_changes_embedded_video() {
    let document = mount(MODAL_PAGE);
    let config = PageConfig {
        video_id: "dQw4w9WgXcQ".to_string(),
        ..PageConfig::default()
    };
    let page = initialize_with(&document, &config);

    video(&page).open();
    assert_eq!(iframe(&document).src(), embed_url("dQw4w9WgXcQ"));
}

#[wasm_bindgen_test]
async fn debounced_burst_runs_once_after_quiet_period() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let debounced = debounce(250, move |_: ()| counter.set(counter.get() + 1));

    for _ in 0..5 {
        debounced.call(());
    }
    TimeoutFuture::new(150).await;
    assert_eq!(calls.get(), 0);

    TimeoutFuture::new(250).await;
    assert_eq!(calls.get(), 1);
}
