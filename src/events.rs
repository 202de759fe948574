#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Input,
    Output,
}

impl Panel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "input" | "in" | "source" => Some(Panel::Input),
            "output" | "out" | "target" => Some(Panel::Output),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Translate,
    Swap,
    Copy,
    Clear,
    Speak(Panel),
}

pub const ENTER: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn ctrl_enter() -> Self {
        Self {
            key: ENTER,
            ctrl: true,
        }
    }

    pub fn triggers_translate(&self) -> bool {
        self.ctrl && self.key == ENTER
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Input(String),
    Paste(String),
    /// Key pressed while the input field has focus.
    KeyDown(KeyPress),
    Click(Control),
    SelectSource(String),
    SelectTarget(String),
}
