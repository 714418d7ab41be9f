//! Localized error copy
//!
//! Messages live in `i18n/error_messages.toml`, embedded at compile time.

use actix_web::{http::header, HttpRequest};
use lp_shared::Language;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// One localized message
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorMessage {
    pub it: String,
    pub en: String,
    pub code: String,
    pub http_status: u16,
}

impl ErrorMessage {
    pub fn text(&self, lang: Language) -> &str {
        match lang {
            Language::Italian => &self.it,
            Language::English => &self.en,
        }
    }
}

/// Key used when a lookup misses
pub const FALLBACK_KEY: &str = "internal_error";

static ERROR_MESSAGES: Lazy<HashMap<String, ErrorMessage>> = Lazy::new(|| {
    toml::from_str(include_str!("../../i18n/error_messages.toml"))
        .expect("embedded error_messages.toml is valid")
});

/// Rendered message ready for an error body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedError {
    pub code: String,
    pub message: String,
    pub http_status: u16,
}

/// Look up a message and fill `{name}` placeholders
///
/// Unknown keys resolve to the generic internal error.
pub fn localize(key: &str, lang: Language, params: &[(&str, String)]) -> LocalizedError {
    let messages = &*ERROR_MESSAGES;
    let entry = messages.get(key).or_else(|| {
        log::warn!("Missing error message for key '{}'", key);
        messages.get(FALLBACK_KEY)
    });

    match entry {
        Some(entry) => LocalizedError {
            code: entry.code.clone(),
            message: format_message(entry.text(lang), params),
            http_status: entry.http_status,
        },
        None => LocalizedError {
            code: lp_shared::error_codes::INTERNAL_ERROR.to_string(),
            message: "Errore interno del server.".to_string(),
            http_status: 500,
        },
    }
}

/// Replace `{name}` placeholders
pub fn format_message(template: &str, params: &[(&str, String)]) -> String {
    params.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}

/// Language requested through `Accept-Language`, Italian by default
pub fn language_from_request(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}
