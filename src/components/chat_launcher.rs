use log::error;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::WidgetConfig;
use crate::controller::WidgetController;

#[derive(Properties, PartialEq)]
pub struct ChatLauncherProps {
    pub config: WidgetConfig,
}

/// Mounts the floating chat widget when the host component first renders.
/// The widget lives under `<body>`, outside the Yew tree, so this renders
/// nothing and later prop changes are ignored.
#[function_component(ChatLauncher)]
pub fn chat_launcher(props: &ChatLauncherProps) -> Html {
    let config = props.config.clone();

    use_effect_once(move || {
        match WidgetController::new(config) {
            Ok(controller) => {
                controller.mount_when_ready();
            }
            Err(e) => error!("Chat widget unavailable: {}", e),
        }
        || ()
    });

    html! {}
}
