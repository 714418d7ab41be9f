//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language used for user-facing messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Pick the preferred supported language from an Accept-Language header
    ///
    /// Entries are ranked by their `q` weight; unsupported tags are skipped and
    /// Italian is returned when nothing matches.
    pub fn from_accept_language(header: &str) -> Self {
        let mut best: Option<(f32, Language)> = None;

        for entry in header.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or_default().trim();
            let weight = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            let primary = tag.split('-').next().unwrap_or_default();
            let Ok(language) = primary.parse::<Language>() else {
                continue;
            };
            if weight <= 0.0 {
                continue;
            }
            if best.map_or(true, |(w, _)| weight > w) {
                best = Some((weight, language));
            }
        }

        best.map(|(_, language)| language).unwrap_or_default()
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Italian => "it",
            Language::English => "en",
        }
    }

    /// Get locale code
    pub fn locale(&self) -> &'static str {
        match self {
            Language::Italian => "it-IT",
            Language::English => "en-US",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "it" | "ita" | "italian" | "italiano" => Ok(Language::Italian),
            "en" | "eng" | "english" => Ok(Language::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
