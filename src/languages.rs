use std::fmt;

use itertools::Itertools;

pub const AUTO: &str = "auto";

pub const AUTODETECT: &str = "autodetect";

pub const SPEECH_FALLBACK: &str = "en";

pub const CATALOGUE: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fa", "Persian"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Auto,
    Code(&'static str),
}

impl Language {
    pub const fn code(code: &'static str) -> Self {
        Language::Code(code)
    }

    /// Resolves a selector value. Only `auto` and catalogue codes are valid.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if value == AUTO {
            return Some(Language::Auto);
        }
        CATALOGUE
            .iter()
            .find(|(code, _)| *code == value)
            .map(|(code, _)| Language::Code(*code))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Language::Auto)
    }

    pub fn pair_segment(&self) -> &'static str {
        match self {
            Language::Auto => AUTODETECT,
            Language::Code(code) => *code,
        }
    }

    pub fn speech_code(&self) -> &'static str {
        match self {
            Language::Auto => SPEECH_FALLBACK,
            Language::Code(code) => *code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Auto => "Auto Detect",
            Language::Code(code) => CATALOGUE
                .iter()
                .find(|(c, _)| c == code)
                .map(|(_, name)| *name)
                .unwrap_or(*code),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Auto => f.write_str(AUTO),
            Language::Code(code) => f.write_str(code),
        }
    }
}

/// `<source>|<target>` as the endpoint wants it.
pub fn language_pair(source: Language, target: Language) -> String {
    format!("{}|{}", source.pair_segment(), target.pair_segment())
}

pub fn describe_catalogue() -> String {
    std::iter::once(format!("{:<5} {}", AUTO, Language::Auto.name()))
        .chain(CATALOGUE.iter().map(|(code, name)| format!("{:<5} {}", code, name)))
        .join("\n")
}
