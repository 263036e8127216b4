use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("embedUrl must be an absolute http(s) URL; release builds have no default")]
    MissingEmbedUrl,
}

/// Failures while building the widget. These never leave `mount`; they are
/// logged and reported as an aborted mount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("widget element #{0} not found after injection")]
    MissingElement(&'static str),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        WidgetError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type Result<T, E = WidgetError> = std::result::Result<T, E>;
