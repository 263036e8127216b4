use log::warn;
use serde::Deserialize;
use serde_json::Value;
use url::Url;
use wasm_bindgen::JsValue;

use crate::error::ConfigError;

pub const DEFAULT_BUTTON_COLOR: &str = "#0070f3";
pub const DEFAULT_BUTTON_SIZE: &str = "60px";
pub const DEFAULT_CHAT_WIDTH: &str = "400px";
pub const DEFAULT_CHAT_HEIGHT: &str = "600px";
pub const DEFAULT_Z_INDEX: i32 = 9999;
pub const DEFAULT_TITLE: &str = "CleanSpace Chat";

const LENGTH_UNITS: [&str; 6] = ["px", "rem", "em", "%", "vw", "vh"];
const COLOR_FUNCTIONS: [&str; 4] = ["rgb(", "rgba(", "hsl(", "hsla("];

#[cfg(debug_assertions)]
pub fn default_embed_url() -> Option<&'static str> {
    Some("http://localhost:3000/embed") // Chat app running locally
}

#[cfg(not(debug_assertions))]
pub fn default_embed_url() -> Option<&'static str> {
    None // Must be configured in production
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "bottom-right" => Some(Position::BottomRight),
            "bottom-left" => Some(Position::BottomLeft),
            _ => None,
        }
    }

    /// The horizontal CSS property the widget is anchored with.
    pub fn edge(self) -> &'static str {
        match self {
            Position::BottomRight => "right",
            Position::BottomLeft => "left",
        }
    }
}

/// Options as handed over by the embedding page. Every field is kept as a
/// raw JSON value so a bad value can fall back to its default instead of
/// failing the whole object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetOptions {
    pub position: Option<Value>,
    pub button_color: Option<Value>,
    pub button_size: Option<Value>,
    pub chat_width: Option<Value>,
    pub chat_height: Option<Value>,
    pub z_index: Option<Value>,
    pub embed_url: Option<Value>,
    pub title: Option<Value>,
}

impl WidgetOptions {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Could not read widget options: {}", e);
                WidgetOptions::default()
            }),
            Value::Null => WidgetOptions::default(),
            other => {
                warn!("Widget options must be an object, got {}", other);
                WidgetOptions::default()
            }
        }
    }

    pub fn from_js(value: JsValue) -> Self {
        if value.is_undefined() || value.is_null() {
            return WidgetOptions::default();
        }
        if !value.is_object() {
            warn!("Widget options must be an object, ignoring them");
            return WidgetOptions::default();
        }
        serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
            warn!("Could not read widget options: {}", e);
            WidgetOptions::default()
        })
    }
}

/// Fully resolved widget configuration. Every field holds a validated value
/// that is safe to interpolate into the generated stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub position: Position,
    pub button_color: String,
    pub button_size: String,
    pub chat_width: String,
    pub chat_height: String,
    pub z_index: i32,
    pub embed_url: String,
    pub title: String,
}

impl WidgetConfig {
    pub fn from_options(options: WidgetOptions) -> Result<Self, ConfigError> {
        let embed_url = match options.embed_url {
            Some(Value::Null) | None => None,
            Some(raw) => {
                let parsed = parse_embed_url(&raw);
                if parsed.is_none() {
                    warn!("Ignoring invalid widget option embedUrl: {}", raw);
                }
                parsed
            }
        }
        .or_else(|| default_embed_url().map(str::to_string))
        .ok_or(ConfigError::MissingEmbedUrl)?;

        Ok(WidgetConfig {
            position: resolve("position", options.position, |v| v.as_str().and_then(Position::parse))
                .unwrap_or_default(),
            button_color: resolve("buttonColor", options.button_color, parse_color)
                .unwrap_or_else(|| DEFAULT_BUTTON_COLOR.to_string()),
            button_size: resolve("buttonSize", options.button_size, parse_length)
                .unwrap_or_else(|| DEFAULT_BUTTON_SIZE.to_string()),
            chat_width: resolve("chatWidth", options.chat_width, parse_length)
                .unwrap_or_else(|| DEFAULT_CHAT_WIDTH.to_string()),
            chat_height: resolve("chatHeight", options.chat_height, parse_length)
                .unwrap_or_else(|| DEFAULT_CHAT_HEIGHT.to_string()),
            z_index: resolve("zIndex", options.z_index, parse_z_index).unwrap_or(DEFAULT_Z_INDEX),
            embed_url,
            title: resolve("title", options.title, parse_title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        })
    }

    pub fn from_json(value: Value) -> Result<Self, ConfigError> {
        Self::from_options(WidgetOptions::from_json(value))
    }

    pub fn from_js(value: JsValue) -> Result<Self, ConfigError> {
        Self::from_options(WidgetOptions::from_js(value))
    }
}

fn resolve<T>(key: &str, raw: Option<Value>, parse: impl Fn(&Value) -> Option<T>) -> Option<T> {
    match raw {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = parse(&value);
            if parsed.is_none() {
                warn!("Ignoring invalid widget option {}: {}, using default", key, value);
            }
            parsed
        }
    }
}

fn parse_embed_url(value: &Value) -> Option<String> {
    let url = Url::parse(value.as_str()?.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Some(url.as_str().to_string()),
        _ => None,
    }
}

fn parse_color(value: &Value) -> Option<String> {
    let raw = value.as_str()?.trim().to_ascii_lowercase();

    if let Some(hex) = raw.strip_prefix('#') {
        let valid = matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
        return valid.then_some(raw);
    }

    if let Some(func) = COLOR_FUNCTIONS.iter().find(|f| raw.starts_with(**f)) {
        let args = raw[func.len()..].strip_suffix(')')?;
        let valid = !args.trim().is_empty()
            && args
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '.' | ',' | '%' | '/' | 'd' | 'e' | 'g'));
        return valid.then_some(raw);
    }

    // Named colors such as `white` or `rebeccapurple`
    let valid = !raw.is_empty() && raw.len() <= 32 && raw.chars().all(|c| c.is_ascii_alphabetic());
    valid.then_some(raw)
}

fn parse_length(value: &Value) -> Option<String> {
    if let Some(n) = value.as_f64() {
        // Bare numbers are taken as pixels
        return (n.is_finite() && n >= 0.0).then(|| format!("{}px", n));
    }

    let raw = value.as_str()?.trim().to_ascii_lowercase();
    if raw == "0" {
        return Some(raw);
    }
    let unit = LENGTH_UNITS.iter().find(|u| raw.ends_with(**u))?;
    let number = &raw[..raw.len() - unit.len()];
    let valid = !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit() || c == '.')
        && number.matches('.').count() <= 1
        && number.chars().any(|c| c.is_ascii_digit());
    valid.then_some(raw)
}

fn parse_z_index(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_title(value: &Value) -> Option<String> {
    let title = value.as_str()?.trim();
    (!title.is_empty()).then(|| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> WidgetConfig {
        WidgetConfig::from_json(value).expect("embedUrl is set")
    }

    #[test]
    fn empty_options_use_defaults() {
        let cfg = config(json!({ "embedUrl": "https://chat.example.com/embed" }));
        assert_eq!(cfg.position, Position::BottomRight);
        assert_eq!(cfg.button_color, DEFAULT_BUTTON_COLOR);
        assert_eq!(cfg.button_size, DEFAULT_BUTTON_SIZE);
        assert_eq!(cfg.chat_width, DEFAULT_CHAT_WIDTH);
        assert_eq!(cfg.chat_height, DEFAULT_CHAT_HEIGHT);
        assert_eq!(cfg.z_index, DEFAULT_Z_INDEX);
        assert_eq!(cfg.title, DEFAULT_TITLE);
        assert_eq!(cfg.embed_url, "https://chat.example.com/embed");
    }

    #[test]
    fn recognized_options_are_applied() {
        let cfg = config(json!({
            "position": "bottom-left",
            "buttonColor": "#FF0000",
            "buttonSize": "48px",
            "chatWidth": "30rem",
            "chatHeight": "80vh",
            "zIndex": 100,
            "embedUrl": "https://chat.example.com/embed",
            "title": "  Support  ",
        }));
        assert_eq!(cfg.position, Position::BottomLeft);
        assert_eq!(cfg.button_color, "#ff0000");
        assert_eq!(cfg.button_size, "48px");
        assert_eq!(cfg.chat_width, "30rem");
        assert_eq!(cfg.chat_height, "80vh");
        assert_eq!(cfg.z_index, 100);
        assert_eq!(cfg.title, "Support");
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let cfg = config(json!({
            "position": "top-center",
            "buttonColor": "red; background: url(evil)",
            "buttonSize": "huge",
            "chatWidth": "12",
            "chatHeight": true,
            "zIndex": "on top",
            "embedUrl": "https://chat.example.com/embed",
            "title": "   ",
        }));
        assert_eq!(cfg.position, Position::BottomRight);
        assert_eq!(cfg.button_color, DEFAULT_BUTTON_COLOR);
        assert_eq!(cfg.button_size, DEFAULT_BUTTON_SIZE);
        assert_eq!(cfg.chat_width, DEFAULT_CHAT_WIDTH);
        assert_eq!(cfg.chat_height, DEFAULT_CHAT_HEIGHT);
        assert_eq!(cfg.z_index, DEFAULT_Z_INDEX);
        assert_eq!(cfg.title, DEFAULT_TITLE);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = config(json!({ "embedUrl": "https://chat.example.com/embed", "theme": "dark" }));
        assert_eq!(cfg.position, Position::BottomRight);
    }

    #[test]
    fn numeric_lengths_and_string_z_index_are_accepted() {
        let cfg = config(json!({
            "embedUrl": "https://chat.example.com/embed",
            "buttonSize": 56,
            "zIndex": " 42 ",
        }));
        assert_eq!(cfg.button_size, "56px");
        assert_eq!(cfg.z_index, 42);
    }

    #[test]
    fn z_index_out_of_range_falls_back() {
        let cfg = config(json!({
            "embedUrl": "https://chat.example.com/embed",
            "zIndex": 1_u64 << 40,
        }));
        assert_eq!(cfg.z_index, DEFAULT_Z_INDEX);
    }

    #[test]
    fn color_forms() {
        assert_eq!(parse_color(&json!("#abc")), Some("#abc".to_string()));
        assert_eq!(parse_color(&json!("#12345g")), None);
        assert_eq!(parse_color(&json!("White")), Some("white".to_string()));
        assert_eq!(
            parse_color(&json!("rgba(0, 112, 243, 0.5)")),
            Some("rgba(0, 112, 243, 0.5)".to_string())
        );
        assert_eq!(parse_color(&json!("hsl(210deg 100% 48%)")), Some("hsl(210deg 100% 48%)".to_string()));
        assert_eq!(parse_color(&json!("rgb(1,2,3)}")), None);
        assert_eq!(parse_color(&json!("rgb()")), None);
        assert_eq!(parse_color(&json!(12)), None);
    }

    #[test]
    fn length_forms() {
        assert_eq!(parse_length(&json!("0")), Some("0".to_string()));
        assert_eq!(parse_length(&json!("2.5em")), Some("2.5em".to_string()));
        assert_eq!(parse_length(&json!("100%")), Some("100%".to_string()));
        assert_eq!(parse_length(&json!("1.2.3px")), None);
        assert_eq!(parse_length(&json!("px")), None);
        assert_eq!(parse_length(&json!("-4px")), None);
        assert_eq!(parse_length(&json!(-4)), None);
    }

    #[test]
    fn embed_url_must_be_http() {
        assert_eq!(parse_embed_url(&json!("ftp://chat.example.com/embed")), None);
        assert_eq!(parse_embed_url(&json!("javascript:alert(1)")), None);
        assert_eq!(parse_embed_url(&json!("/embed")), None);
        assert_eq!(
            parse_embed_url(&json!("https://chat.example.com")),
            Some("https://chat.example.com/".to_string())
        );
    }

    #[test]
    fn non_object_options_are_treated_as_empty() {
        let options = WidgetOptions::from_json(json!(["bottom-left"]));
        assert!(options.position.is_none());
        let options = WidgetOptions::from_json(Value::Null);
        assert!(options.embed_url.is_none());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn debug_builds_default_to_local_endpoint() {
        let cfg = WidgetConfig::from_json(json!({})).unwrap();
        assert_eq!(cfg.embed_url, "http://localhost:3000/embed");

        let cfg = WidgetConfig::from_json(json!({ "embedUrl": "not a url" })).unwrap();
        assert_eq!(cfg.embed_url, "http://localhost:3000/embed");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn release_builds_require_embed_url() {
        assert_eq!(WidgetConfig::from_json(json!({})), Err(ConfigError::MissingEmbedUrl));
        assert_eq!(
            WidgetConfig::from_json(json!({ "embedUrl": "not a url" })),
            Err(ConfigError::MissingEmbedUrl)
        );
    }
}
