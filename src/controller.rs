use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, DocumentReadyState, Element};

use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};
use crate::markup::{build_style, build_widget, BUTTON_ID, PANEL_ID, WIDGET_ID};
use crate::state::{PanelState, Surfaces, OPEN_CLASS};
use crate::style::stylesheet;

#[derive(Debug)]
pub enum MountOutcome {
    Mounted(WidgetHandle),
    AlreadyMounted,
    /// Something went wrong while injecting. Whatever was already appended
    /// stays in the page, without a working toggle.
    Aborted,
}

#[derive(Debug)]
pub enum MountSchedule {
    Immediate(MountOutcome),
    /// Waiting for `DOMContentLoaded`.
    Deferred,
}

/// Owns one chat launcher for one document.
#[derive(Debug, Clone)]
pub struct WidgetController {
    config: WidgetConfig,
    document: Document,
}

impl WidgetController {
    pub fn new(config: WidgetConfig) -> Result<Self> {
        let document = web_sys::window()
            .ok_or(WidgetError::NoWindow)?
            .document()
            .ok_or(WidgetError::NoDocument)?;
        Ok(Self::with_document(config, document))
    }

    pub fn with_document(config: WidgetConfig, document: Document) -> Self {
        WidgetController { config, document }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.document.get_element_by_id(WIDGET_ID).is_some()
    }

    /// Injects the stylesheet and the widget tree, then wires the toggle
    /// button. Calling it again once the widget exists does nothing.
    pub fn mount(&self) -> MountOutcome {
        if self.is_mounted() {
            info!("CleanSpace Chat Widget already exists");
            return MountOutcome::AlreadyMounted;
        }

        match self.inject().and_then(|root| self.attach(&root)) {
            Ok(handle) => {
                info!("Chat widget event listeners attached");
                MountOutcome::Mounted(handle)
            }
            Err(e) => {
                error!("Chat widget mount aborted: {}", e);
                MountOutcome::Aborted
            }
        }
    }

    /// Mounts now, or once the document has finished parsing.
    pub fn mount_when_ready(self) -> MountSchedule {
        let ready_state = self.document.ready_state();
        self.mount_when_ready_with(ready_state)
    }

    /// Same as [`mount_when_ready`](Self::mount_when_ready) with the
    /// document's ready state supplied by the caller.
    pub fn mount_when_ready_with(self, ready_state: DocumentReadyState) -> MountSchedule {
        if ready_state != DocumentReadyState::Loading {
            return MountSchedule::Immediate(self.mount());
        }

        match self.defer_mount() {
            Ok(()) => {
                debug!("Document still loading, chat widget waits for DOMContentLoaded");
                MountSchedule::Deferred
            }
            Err(e) => {
                error!("Could not wait for DOMContentLoaded: {}", e);
                MountSchedule::Immediate(MountOutcome::Aborted)
            }
        }
    }

    /// Subscribes a one-shot `DOMContentLoaded` listener that mounts the
    /// widget.
    pub fn defer_mount(self) -> Result<()> {
        let document = self.document.clone();
        let on_ready = Closure::once_into_js(move || {
            self.mount();
        });

        let options = AddEventListenerOptions::new();
        options.set_once(true);
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            on_ready.unchecked_ref(),
            &options,
        )?;
        Ok(())
    }

    fn inject(&self) -> Result<Element> {
        let body = self.document.body().ok_or(WidgetError::NoBody)?;

        let style = build_style(&self.document, &stylesheet(&self.config))?;
        match self.document.head() {
            Some(head) => head.append_child(&style)?,
            None => body.append_child(&style)?,
        };

        let root = build_widget(&self.document, &self.config)?;
        body.append_child(&root)?;
        info!("CleanSpace Chat Widget injected");
        Ok(root)
    }

    /// Wires the toggle. Button and panel are looked up inside `root`, so a
    /// host element reusing one of the ids is never touched.
    fn attach(&self, root: &Element) -> Result<WidgetHandle> {
        let button = find_within(root, BUTTON_ID)?;
        let panel = find_within(root, PANEL_ID)?;

        let on_click = {
            let button = button.clone();
            let panel = panel.clone();
            Closure::wrap(Box::new(move || match toggle(&panel, &button) {
                Ok(PanelState::Open) => debug!("Chat opened"),
                Ok(PanelState::Closed) => debug!("Chat closed"),
                Err(e) => error!("Chat toggle failed: {}", e),
            }) as Box<dyn FnMut()>)
        };
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // The widget lives as long as the page
        on_click.forget();

        Ok(WidgetHandle {
            root: root.clone(),
            button,
            panel,
        })
    }
}

fn find_within(root: &Element, id: &'static str) -> Result<Element> {
    root.query_selector(&format!("#{}", id))?
        .ok_or(WidgetError::MissingElement(id))
}

/// Flips the panel. The panel's `open` class is the current state.
fn toggle(panel: &Element, button: &Element) -> Result<PanelState> {
    let next = PanelState::from_open_class(panel.class_list().contains(OPEN_CLASS)).toggled();
    apply(panel, button, Surfaces::of(next))?;
    Ok(next)
}

fn apply(panel: &Element, button: &Element, surfaces: Surfaces) -> Result<()> {
    panel.class_list().toggle_with_force(OPEN_CLASS, surfaces.panel_open)?;
    button.class_list().toggle_with_force(OPEN_CLASS, surfaces.button_open)?;
    button.set_attribute("aria-label", surfaces.aria_label)?;
    Ok(())
}

/// The live nodes of a mounted widget.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    root: Element,
    button: Element,
    panel: Element,
}

impl WidgetHandle {
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn button(&self) -> &Element {
        &self.button
    }

    pub fn panel(&self) -> &Element {
        &self.panel
    }

    pub fn is_open(&self) -> bool {
        PanelState::from_open_class(self.panel.class_list().contains(OPEN_CLASS)).is_open()
    }

    /// Reads the three surfaces back from the page. `None` means they
    /// disagree with each other.
    pub fn observed_state(&self) -> Option<PanelState> {
        let label = self.button.get_attribute("aria-label")?;
        let aria_label = [PanelState::Closed, PanelState::Open]
            .into_iter()
            .map(PanelState::aria_label)
            .find(|known| *known == label)?;

        Surfaces {
            panel_open: self.panel.class_list().contains(OPEN_CLASS),
            button_open: self.button.class_list().contains(OPEN_CLASS),
            aria_label,
        }
        .state()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn controller() -> WidgetController {
        let document = web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .implementation()
            .unwrap()
            .create_html_document()
            .unwrap();
        let config = WidgetConfig::from_json(json!({ "embedUrl": "https://chat.example.com/embed" })).unwrap();
        WidgetController::with_document(config, document)
    }

    #[wasm_bindgen_test]
    fn attach_reports_missing_panel() {
        let controller = controller();
        let root = build_widget(&controller.document, &controller.config).unwrap();
        find_within(&root, PANEL_ID).unwrap().remove();

        assert_eq!(
            controller.attach(&root).unwrap_err(),
            WidgetError::MissingElement(PANEL_ID)
        );
    }

    #[wasm_bindgen_test]
    fn attach_reports_missing_button() {
        let controller = controller();
        let root = build_widget(&controller.document, &controller.config).unwrap();
        find_within(&root, BUTTON_ID).unwrap().remove();

        assert_eq!(
            controller.attach(&root).unwrap_err(),
            WidgetError::MissingElement(BUTTON_ID)
        );
    }
}
