//! Canonical phone number value object.
//!
//! Every phone string entering the system is parsed into a [`PhoneNumber`]
//! holding its E.164 form. Equality, hashing and storage all use that form,
//! so `"3331234567"`, `"+39 333 123 4567"` and `"0039-333-1234567"` are the
//! same number.

use std::fmt;
use std::hash::{Hash, Hasher};

use lp_shared::phone::strip_formatting;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

/// Country calling code assumed for bare national numbers (Italy)
pub const DEFAULT_COUNTRY_CODE: &str = "39";

/// Minimum length of a bare digit string that already carries the country code
const MIN_PREFIXED_LENGTH: usize = 11;

/// E.164: `+`, a non-zero leading digit, 7 to 15 digits in total
static E164_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 pattern is valid"));

/// A phone number in canonical E.164 form
#[derive(Debug, Clone)]
pub struct PhoneNumber {
    canonical: String,
    country_code: String,
}

impl PhoneNumber {
    /// Parses a user-entered phone with the default country code
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::parse_with_country(raw, DEFAULT_COUNTRY_CODE)
    }

    /// Parses a user-entered phone, assuming `country_code` for bare national numbers
    ///
    /// Formatting characters are stripped, a leading `00` becomes `+`, and a
    /// bare digit string gets `+` alone when it already starts with the
    /// country code and is long enough to carry one, or `+<country_code>`
    /// otherwise.
    pub fn parse_with_country(raw: &str, country_code: &str) -> Result<Self, ValidationError> {
        let stripped = strip_formatting(raw);
        if stripped.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone_number".to_string(),
            });
        }

        let candidate = if let Some(rest) = stripped.strip_prefix("00") {
            format!("+{}", rest)
        } else if stripped.starts_with('+') {
            stripped
        } else if stripped.starts_with(country_code) && stripped.len() >= MIN_PREFIXED_LENGTH {
            format!("+{}", stripped)
        } else {
            format!("+{}{}", country_code, stripped)
        };

        if !E164_REGEX.is_match(&candidate) {
            return Err(ValidationError::InvalidPhoneNumber {
                input: raw.trim().to_string(),
            });
        }

        Ok(Self {
            canonical: candidate,
            country_code: country_code.to_string(),
        })
    }

    /// The canonical `+<digits>` form
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The national number when the phone belongs to the default country
    pub fn national(&self) -> Option<&str> {
        self.canonical
            .strip_prefix('+')
            .and_then(|digits| digits.strip_prefix(self.country_code.as_str()))
            .filter(|national| !national.is_empty())
    }

    /// Stored forms rows written before canonicalization may use
    ///
    /// Always starts with the canonical form, followed by the `+`-less form
    /// and, for default-country numbers, the bare national number.
    pub fn variants(&self) -> Vec<String> {
        let mut variants = vec![self.canonical.clone()];
        if let Some(digits) = self.canonical.strip_prefix('+') {
            variants.push(digits.to_string());
        }
        if let Some(national) = self.national() {
            variants.push(national.to_string());
        }
        variants.dedup();
        variants
    }

    /// Whether a stored string refers to this number
    pub fn matches_stored(&self, stored: &str) -> bool {
        self.variants().iter().any(|v| v == stored)
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}
