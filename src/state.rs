/// CSS class shared by the panel and the button while the chat is open.
pub const OPEN_CLASS: &str = "open";

/// Open/closed state of the chat panel. Starts `Closed`; the toggle button
/// is the only thing that moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn from_open_class(has_open_class: bool) -> Self {
        if has_open_class {
            PanelState::Open
        } else {
            PanelState::Closed
        }
    }

    pub fn is_open(self) -> bool {
        self == PanelState::Open
    }

    pub fn toggled(self) -> Self {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }

    /// Label announcing what a click on the button will do.
    pub fn aria_label(self) -> &'static str {
        match self {
            PanelState::Closed => "Open chat",
            PanelState::Open => "Close chat",
        }
    }
}

/// What the page shows for a given state. The panel class, the button class
/// and the label are always produced together from one `PanelState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surfaces {
    pub panel_open: bool,
    pub button_open: bool,
    pub aria_label: &'static str,
}

impl Surfaces {
    pub fn of(state: PanelState) -> Self {
        Surfaces {
            panel_open: state.is_open(),
            button_open: state.is_open(),
            aria_label: state.aria_label(),
        }
    }

    /// The state these surfaces show, or `None` if they disagree.
    pub fn state(&self) -> Option<PanelState> {
        let state = PanelState::from_open_class(self.panel_open);
        (self.button_open == self.panel_open && self.aria_label == state.aria_label()).then_some(state)
    }
}
