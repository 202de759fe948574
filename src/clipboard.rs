use std::io::{self, Write};
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to write to terminal")]
    Terminal(#[from] io::Error),
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

pub struct SystemClipboard;

impl SystemClipboard {
    pub fn detect() -> Option<Self> {
        match ClipboardContext::new() {
            Ok(_) => Some(SystemClipboard),
            Err(e) => {
                info!("System clipboard unavailable: {}", e);
                None
            }
        }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// Asks the terminal to put the text in its selection (OSC 52). Works over
/// ssh and in terminals without a desktop clipboard, if the terminal allows it.
pub struct Osc52Clipboard<W: Write + Send> {
    out: Mutex<W>,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

pub struct CopyChain {
    primary: Option<Box<dyn Clipboard>>,
    fallback: Box<dyn Clipboard>,
}

impl CopyChain {
    pub fn new(primary: Option<Box<dyn Clipboard>>, fallback: Box<dyn Clipboard>) -> Self {
        Self { primary, fallback }
    }

    pub fn detect() -> Self {
        let primary = SystemClipboard::detect().map(|c| Box::new(c) as Box<dyn Clipboard>);
        Self::new(primary, Box::new(Osc52Clipboard::stdout()))
    }

    pub fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(primary) = &self.primary {
            match primary.write_text(text) {
                Ok(()) => return Ok(()),
                Err(e) => warn!("Primary clipboard failed, falling back: {}", e),
            }
        }
        self.fallback.write_text(text)
    }
}
