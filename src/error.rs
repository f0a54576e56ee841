use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for BehaviorError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => BehaviorError::Dom(message),
            None => BehaviorError::Dom(format!("{:?}", value)),
        }
    }
}
