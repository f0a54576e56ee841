use log::Level;

// Video shown in the modal: https://www.youtube.com/watch?v=mUGYPlAgJPw
pub const YOUTUBE_VIDEO_ID: &str = "mUGYPlAgJPw";

pub const FOCUS_DELAY_MS: u32 = 100;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Ids and selectors the page markup has to provide.
pub mod selectors {
    pub const VIDEO_THUMBNAIL_ID: &str = "video-thumbnail";
    pub const VIDEO_MODAL_ID: &str = "video-modal";
    pub const VIDEO_IFRAME_ID: &str = "youtube-iframe";
    pub const VIDEO_CLOSE: &str = ".video-modal__close";
    pub const VIDEO_OVERLAY_CLASS: &str = "video-modal__overlay";

    pub const ACTIVE_CLASS: &str = "active";
    pub const LOADING_CLASS: &str = "loading";

    pub const FOCUSABLE: &str = "a[href], button, textarea, input[type=\"text\"], input[type=\"radio\"], input[type=\"checkbox\"], select, iframe[src]";
    pub const SAME_PAGE_ANCHORS: &str = "a[href^=\"#\"]";
    pub const IMAGES: &str = "img";
    pub const REVEAL_TARGETS: &str = ".feature, .testimonial, .use-case, .screenshot";
    pub const BUTTONS: &str = ".btn";
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?autoplay=1&rel=0", video_id)
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Runtime knobs for [`crate::initialize_with`]. `Default` matches the
/// production page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub video_id: String,
    pub focus_delay_ms: u32,
    pub resize_debounce_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            video_id: YOUTUBE_VIDEO_ID.to_string(),
            focus_delay_ms: FOCUS_DELAY_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            reveal_threshold: REVEAL_THRESHOLD,
            reveal_root_margin: REVEAL_ROOT_MARGIN.to_string(),
        }
    }
}
