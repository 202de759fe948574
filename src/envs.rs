use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::languages::Language;

const DEFAULT_API_URL: &str = "https://api.mymemory.translated.net/get";

fn var_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

pub static API_URL: Lazy<String> = Lazy::new(|| var_or("TRANSLATE_API_URL", DEFAULT_API_URL));

pub static CONTACT_EMAIL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("TRANSLATE_EMAIL")
        .ok()
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
});

pub static SOURCE_LANG: Lazy<String> = Lazy::new(|| var_or("TRANSLATE_SOURCE", "auto"));

pub static TARGET_LANG: Lazy<String> = Lazy::new(|| var_or("TRANSLATE_TARGET", "es"));

pub static LOG_DIR: Lazy<String> = Lazy::new(|| var_or("TRANSLATE_LOG_DIR", "logs"));

pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| var_or("TRANSLATE_LOG_LEVEL", "info"));

pub static SPEECH_ENABLED: Lazy<bool> =
    Lazy::new(|| !matches!(var_or("TRANSLATE_SPEECH", "on").as_str(), "off" | "0" | "false"));

pub static PASTE_SETTLE_MS: Lazy<u64> = Lazy::new(|| {
    var_or("TRANSLATE_PASTE_SETTLE_MS", "100")
        .parse()
        .unwrap_or(100)
});

#[derive(Debug, Clone)]
pub struct Settings {
    pub source: Language,
    pub target: Language,
    pub paste_settle: Duration,
}

impl Settings {
    /// Reads the settings from the environment. Unknown language codes fall
    /// back to auto-detect for the source and Spanish for the target.
    pub fn from_env() -> Self {
        Self {
            source: Language::parse(&SOURCE_LANG).unwrap_or(Language::Auto),
            target: Language::parse(&TARGET_LANG).unwrap_or_else(|| Language::code("es")),
            paste_settle: Duration::from_millis(*PASTE_SETTLE_MS),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: Language::Auto,
            target: Language::code("es"),
            paste_settle: Duration::from_millis(100),
        }
    }
}
