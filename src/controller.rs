use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::clipboard::CopyChain;
use crate::envs::Settings;
use crate::events::{Control, KeyPress, Panel, UiEvent};
use crate::languages::Language;
use crate::notice::Status;
use crate::pending::PendingGuard;
use crate::session::{char_count, Session};
use crate::speech::{Speech, Utterance};
use crate::translate::{TranslationRequest, Translator};

/// Longest pasted input whose count is refreshed after the paste settles.
pub const PASTE_COUNT_LIMIT: usize = 5000;

pub const SWAP_AUTO: &str = "Cannot swap when source is Auto Detect.";
pub const NOTHING_TO_COPY: &str = "Nothing to copy yet!";
pub const COPIED: &str = "✓ Copied to clipboard!";
pub const COPY_FAILED: &str = "Copy failed.";
pub const NO_SPEECH: &str = "Text-to-speech is not supported on this system.";
pub const NOTHING_TO_SPEAK: &str = "No text to speak!";
pub const TRANSLATED: &str = "✓ Translation successful!";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Rejection {
    #[error("⚠ Please enter some text to translate.")]
    EmptyInput,
    #[error("⚠ Source and target languages are the same.")]
    SameLanguage,
}

pub fn prepare_request(session: &Session) -> Result<TranslationRequest, Rejection> {
    let text = session.input.trim();
    if text.is_empty() {
        return Err(Rejection::EmptyInput);
    }
    if !session.source.is_auto() && session.source == session.target {
        return Err(Rejection::SameLanguage);
    }
    Ok(TranslationRequest {
        text: text.to_string(),
        source: session.source,
        target: session.target,
    })
}

pub struct Controller {
    session: Session,
    translator: Box<dyn Translator>,
    clipboard: CopyChain,
    speech: Box<dyn Speech>,
    paste_settle: Duration,
}

impl Controller {
    pub fn new(
        settings: &Settings,
        translator: Box<dyn Translator>,
        clipboard: CopyChain,
        speech: Box<dyn Speech>,
    ) -> Self {
        Self {
            session: Session::new(settings),
            translator,
            clipboard,
            speech,
            paste_settle: settings.paste_settle,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn handle(&mut self, event: UiEvent) {
        debug!("event {:?}", event);
        match event {
            UiEvent::Input(text) => self.set_input(text),
            UiEvent::Paste(text) => self.paste(&text).await,
            UiEvent::KeyDown(key) => self.key_down(key).await,
            UiEvent::SelectSource(code) => self.select_source(&code),
            UiEvent::SelectTarget(code) => self.select_target(&code),
            UiEvent::Click(Control::Translate) => self.translate().await,
            UiEvent::Click(Control::Swap) => self.swap(),
            UiEvent::Click(Control::Copy) => self.copy_output(),
            UiEvent::Click(Control::Clear) => self.clear(),
            UiEvent::Click(Control::Speak(panel)) => self.speak(panel),
        }
    }

    pub fn update_count(&mut self) {
        self.session.refresh_input_count();
    }

    pub fn set_input(&mut self, text: String) {
        self.session.input = text;
        self.update_count();
    }

    /// Appends pasted text, then refreshes the count once the paste has
    /// settled, but only for inputs of at most [`PASTE_COUNT_LIMIT`] characters.
    pub async fn paste(&mut self, text: &str) {
        self.session.input.push_str(text);
        tokio::time::sleep(self.paste_settle).await;

        let len = char_count(self.session.input.trim());
        if len > 0 && len <= PASTE_COUNT_LIMIT {
            self.update_count();
        }
    }

    pub async fn key_down(&mut self, key: KeyPress) {
        if key.triggers_translate() {
            self.translate().await;
        }
    }

    pub fn select_source(&mut self, code: &str) {
        if let Some(lang) = self.resolve(code) {
            self.session.source = lang;
        }
    }

    pub fn select_target(&mut self, code: &str) {
        if let Some(lang) = self.resolve(code) {
            self.session.target = lang;
        }
    }

    fn resolve(&mut self, code: &str) -> Option<Language> {
        let lang = Language::parse(code);
        if lang.is_none() {
            self.session.toast(format!("Unknown language: {}", code.trim()));
        }
        lang
    }

    pub fn swap(&mut self) {
        let session = &mut self.session;
        if session.source.is_auto() {
            session.toast(SWAP_AUTO);
            return;
        }

        std::mem::swap(&mut session.source, &mut session.target);
        std::mem::swap(&mut session.input, &mut session.output);
        session.refresh_input_count();
        session.output_count = char_count(&session.output);
    }

    pub fn clear(&mut self) {
        let session = &mut self.session;
        session.input.clear();
        session.refresh_input_count();
        session.clear_output();
        session.detected = None;
        session.hide_status();
    }

    pub async fn translate(&mut self) {
        if self.session.in_flight() {
            debug!("translate ignored, request in flight");
            return;
        }

        let request = match prepare_request(&self.session) {
            Ok(request) => request,
            Err(rejection) => {
                self.session.show_status(Status::error(rejection.to_string()));
                return;
            }
        };
        self.session.hide_status();

        let translator = &self.translator;
        let Some(mut session) = PendingGuard::acquire(&mut self.session) else {
            return;
        };

        info!(
            "Translating {} chars, {}",
            char_count(&request.text),
            request.language_pair()
        );
        match translator.translate(&request).await {
            Ok(translation) => {
                info!("Translation received");
                session.set_output(translation.text);
                session.detected = if request.source.is_auto() {
                    translation.detected_language
                } else {
                    None
                };
                session.show_status(Status::info(TRANSLATED));
            }
            Err(e) => {
                warn!("Translation failed: {}", e);
                session.show_status(Status::error(format!("✗ Error: {}", e)));
                session.clear_output();
                session.detected = None;
            }
        }
    }

    pub fn copy_output(&mut self) {
        if self.session.output.is_empty() {
            self.session.toast(NOTHING_TO_COPY);
            return;
        }

        match self.clipboard.copy(&self.session.output) {
            Ok(()) => self.session.toast(COPIED),
            Err(e) => {
                error!("Failed to copy output: {}", e);
                self.session.toast(COPY_FAILED);
            }
        }
    }

    pub fn speak(&mut self, panel: Panel) {
        if !self.speech.available() {
            self.session.toast(NO_SPEECH);
            return;
        }

        let (text, lang) = match panel {
            Panel::Input => (self.session.input.trim(), self.session.source),
            Panel::Output => (self.session.output.trim(), self.session.target),
        };
        if text.is_empty() {
            self.session.toast(NOTHING_TO_SPEAK);
            return;
        }

        let utterance = Utterance::new(text, lang.speech_code());
        self.speech.cancel();
        if let Err(e) = self.speech.speak(&utterance) {
            warn!("Failed to speak: {}", e);
            self.session.toast(NO_SPEECH);
        }
    }
}
