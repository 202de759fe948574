use crate::envs::Settings;
use crate::languages::Language;
use crate::notice::{Status, Toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Ready,
    Pending,
}

impl TriggerState {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerState::Ready => "Translate",
            TriggerState::Pending => "Translating...",
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self == TriggerState::Ready
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub input: String,
    pub output: String,
    pub source: Language,
    pub target: Language,
    pub trigger: TriggerState,
    pub detected: Option<String>,
    pub input_count: usize,
    pub output_count: usize,
    pub toast: Option<Toast>,
    pub status: Option<Status>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            source: settings.source,
            target: settings.target,
            trigger: TriggerState::Ready,
            detected: None,
            input_count: 0,
            output_count: 0,
            toast: None,
            status: None,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.trigger == TriggerState::Pending
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn show_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn hide_status(&mut self) {
        self.status = None;
    }

    pub fn refresh_input_count(&mut self) {
        self.input_count = char_count(&self.input);
    }

    pub fn set_output(&mut self, output: impl Into<String>) {
        self.output = output.into();
        self.output_count = char_count(&self.output);
    }

    pub fn clear_output(&mut self) {
        self.set_output(String::new());
    }
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}
