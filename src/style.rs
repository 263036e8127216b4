use crate::config::WidgetConfig;
use crate::markup::{BUTTON_ID, IFRAME_ID, PANEL_ID, WIDGET_ID};

/// Viewport width below which the open panel takes the whole screen.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Renders the widget stylesheet. Every selector is scoped to the widget ids
/// so nothing leaks into the host page.
pub fn stylesheet(config: &WidgetConfig) -> String {
    let edge = config.position.edge();
    let z_index = config.z_index;

    format!(
        r#"
    #{widget} {{
      position: fixed;
      {edge}: 20px;
      bottom: 20px;
      z-index: {z_index};
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    }}

    #{button} {{
      width: {size};
      height: {size};
      border-radius: 50%;
      background: {color};
      border: none;
      cursor: pointer;
      box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
      display: flex;
      align-items: center;
      justify-content: center;
      transition: all 0.3s ease;
      position: relative;
    }}

    #{button}:hover {{
      transform: scale(1.1);
      box-shadow: 0 6px 16px rgba(0, 0, 0, 0.2);
    }}

    #{button} svg {{
      width: 28px;
      height: 28px;
      fill: white;
    }}

    #{button}.open svg.icon-chat {{
      display: none;
    }}

    #{button} svg.icon-close {{
      display: none;
    }}

    #{button}.open svg.icon-close {{
      display: block;
    }}

    #{panel} {{
      position: fixed;
      {edge}: 20px;
      bottom: 100px;
      width: {width};
      height: {height};
      max-width: calc(100vw - 40px);
      max-height: calc(100vh - 120px);
      border-radius: 12px;
      box-shadow: 0 8px 32px rgba(0, 0, 0, 0.12);
      background: white;
      display: none;
      overflow: hidden;
      z-index: {z_index};
    }}

    #{panel}.open {{
      display: block;
      animation: slideUp 0.3s ease;
    }}

    @keyframes slideUp {{
      from {{
        opacity: 0;
        transform: translateY(20px);
      }}
      to {{
        opacity: 1;
        transform: translateY(0);
      }}
    }}

    #{iframe} {{
      width: 100%;
      height: 100%;
      border: none;
      border-radius: 12px;
    }}

    @media (max-width: {breakpoint}px) {{
      #{panel} {{
        width: 100vw;
        height: 100vh;
        max-width: 100vw;
        max-height: 100vh;
        top: 0;
        left: 0;
        right: 0;
        bottom: 0;
        border-radius: 0;
      }}
    }}
  "#,
        widget = WIDGET_ID,
        button = BUTTON_ID,
        panel = PANEL_ID,
        iframe = IFRAME_ID,
        size = config.button_size,
        color = config.button_color,
        width = config.chat_width,
        height = config.chat_height,
        breakpoint = MOBILE_BREAKPOINT_PX,
    )
}
