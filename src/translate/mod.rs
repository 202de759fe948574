use async_trait::async_trait;
use thiserror::Error;

use crate::languages::{language_pair, Language};

mod mymemory;

pub use mymemory::MyMemoryTranslate;

/// Message used when the service gives no reason for a failure.
pub const GENERIC_FAILURE: &str = "Translation failed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: Language,
    pub target: Language,
}

impl TranslationRequest {
    pub fn language_pair(&self) -> String {
        language_pair(self.source, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub detected_language: Option<String>,
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Failed to make request: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Network error: {0}")]
    Http(u16),
    #[error("Failed to parse response")]
    ParseFailed(#[from] serde_json::Error),
    #[error("{0}")]
    Upstream(String),
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError>;
}
