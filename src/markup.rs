use web_sys::{Document, Element};

use crate::config::WidgetConfig;
use crate::error::Result;
use crate::state::PanelState;

pub const WIDGET_ID: &str = "cleanspace-chat-widget";
pub const BUTTON_ID: &str = "cleanspace-chat-button";
pub const PANEL_ID: &str = "cleanspace-chat-container";
pub const IFRAME_ID: &str = "cleanspace-chat-iframe";
pub const STYLE_ID: &str = "cleanspace-chat-styles";

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const CHAT_ICON_PATH: &str =
    "M20 2H4c-1.1 0-2 .9-2 2v18l4-4h14c1.1 0 2-.9 2-2V4c0-1.1-.9-2-2-2zm0 14H6l-2 2V4h16v12z";
const CLOSE_ICON_PATH: &str = "M19 6.41L17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12 19 6.41z";

pub fn build_style(document: &Document, css: &str) -> Result<Element> {
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(css));
    Ok(style)
}

/// Builds the detached widget tree:
///
/// ```text
/// div#cleanspace-chat-widget
///   button#cleanspace-chat-button   (svg.icon-chat, svg.icon-close)
///   div#cleanspace-chat-container
///     iframe#cleanspace-chat-iframe
/// ```
pub fn build_widget(document: &Document, config: &WidgetConfig) -> Result<Element> {
    let root = document.create_element("div")?;
    root.set_id(WIDGET_ID);

    let button = document.create_element("button")?;
    button.set_id(BUTTON_ID);
    button.set_attribute("type", "button")?;
    button.set_attribute("aria-label", PanelState::default().aria_label())?;
    let chat_icon: Element = build_icon(document, "icon-chat", CHAT_ICON_PATH)?;
    button.append_child(&chat_icon)?;
    let close_icon: Element = build_icon(document, "icon-close", CLOSE_ICON_PATH)?;
    button.append_child(&close_icon)?;

    let panel = document.create_element("div")?;
    panel.set_id(PANEL_ID);

    let iframe = document.create_element("iframe")?;
    iframe.set_id(IFRAME_ID);
    iframe.set_attribute("src", &config.embed_url)?;
    iframe.set_attribute("allow", "clipboard-write")?;
    iframe.set_attribute("title", &config.title)?;
    panel.append_child(&iframe)?;

    root.append_child(&button)?;
    root.append_child(&panel)?;
    Ok(root)
}

fn build_icon(document: &Document, class: &str, path_data: &str) -> Result<Element> {
    let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
    svg.set_attribute("class", class)?;
    svg.set_attribute("viewBox", "0 0 24 24")?;
    svg.set_attribute("aria-hidden", "true")?;

    let path = document.create_element_ns(Some(SVG_NS), "path")?;
    path.set_attribute("d", path_data)?;
    svg.append_child(&path)?;
    Ok(svg)
}
