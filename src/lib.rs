//! Floating chat launcher for the CleanSpace marketing site.
//!
//! The widget is a round button pinned to a bottom corner of the page and a
//! panel that embeds the chat app in an iframe. It can be mounted from a
//! plain `<script>` tag through [`mount_chat_widget`], or from a Yew app
//! with the [`ChatLauncher`] component.

use log::{error, Level};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod state;
pub mod style;
pub mod components {
    pub mod chat_launcher;
}

pub use components::chat_launcher::{ChatLauncher, ChatLauncherProps};
pub use config::{Position, WidgetConfig, WidgetOptions};
pub use controller::{MountOutcome, MountSchedule, WidgetController, WidgetHandle};
pub use error::{ConfigError, WidgetError};
pub use state::{PanelState, Surfaces};

/// Sets up panic messages and console logging. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed, e.g. by the host app
    let _ = console_log::init_with_level(Level::Info);
}

/// Entry point for script-tag embedding:
///
/// ```js
/// import init, { mountChatWidget } from "./chat_widget.js";
/// await init();
/// mountChatWidget({ embedUrl: "https://chat.example.com/embed", position: "bottom-left" });
/// ```
///
/// Returns whether the widget is mounted or waiting for the document. A
/// missing embed URL and mount problems are logged to the console and never
/// raised into the page.
#[wasm_bindgen(js_name = mountChatWidget)]
pub fn mount_chat_widget(options: JsValue) -> bool {
    init_logging();
    launch(WidgetConfig::from_js(options))
}

fn launch(config: Result<WidgetConfig, ConfigError>) -> bool {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Chat widget not mounted: {}", e);
            return false;
        }
    };

    match WidgetController::new(config) {
        Ok(controller) => !matches!(
            controller.mount_when_ready(),
            MountSchedule::Immediate(MountOutcome::Aborted)
        ),
        Err(e) => {
            error!("Chat widget unavailable: {}", e);
            false
        }
    }
}
