use chat_widget::{init_logging, ChatLauncher, WidgetConfig};
use log::{error, info};
use serde_json::json;
use yew::prelude::*;

#[cfg(debug_assertions)]
fn get_embed_url() -> &'static str {
    "http://localhost:3000/embed" // Development URL when running locally
}

#[cfg(not(debug_assertions))]
fn get_embed_url() -> &'static str {
    "/embed" // Served next to the demo page
}

#[function_component]
fn App() -> Html {
    let config = use_memo(
        |_| {
            let embed_url = match get_embed_url() {
                path if path.starts_with('/') => web_sys::window()
                    .and_then(|w| w.location().origin().ok())
                    .map(|origin| format!("{}{}", origin, path))
                    .unwrap_or_default(),
                url => url.to_string(),
            };

            WidgetConfig::from_json(json!({
                "position": "bottom-right",
                "embedUrl": embed_url,
            }))
        },
        (),
    );

    html! {
        <div class="demo-page">
            <h1>{"CleanSpace"}</h1>
            <p>{"Chat widget demo. The launcher sits in the bottom right corner."}</p>
            {
                match &*config {
                    Ok(config) => html! { <ChatLauncher config={config.clone()} /> },
                    Err(e) => {
                        error!("Demo has no chat: {}", e);
                        html! { <p class="error-message">{ e.to_string() }</p> }
                    }
                }
            }
        </div>
    }
}

fn main() {
    init_logging();

    info!("Starting chat widget demo");
    yew::Renderer::<App>::new().render();
}
