//! Conversion of domain failures into localized HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use lp_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use lp_shared::{ErrorResponse, Language};
use validator::ValidationErrors;

use crate::i18n::{localize, LocalizedError};

/// Message key and placeholder values for a domain error
fn message_key(error: &DomainError) -> (&'static str, Vec<(&'static str, String)>) {
    match error {
        DomainError::ValidationErr(validation) => match validation {
            ValidationError::RequiredField { field } => {
                ("missing_field", vec![("field", field.clone())])
            }
            ValidationError::InvalidPhoneNumber { .. } => ("invalid_phone", vec![]),
            ValidationError::InvalidLength { field, min, max, .. } if field == "newPassword" => (
                "weak_password",
                vec![("min", min.to_string()), ("max", max.to_string())],
            ),
            ValidationError::InvalidLength { .. } => ("validation_error", vec![]),
        },
        DomainError::Validation { .. } => ("validation_error", vec![]),
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidOrExpiredCode => ("invalid_code", vec![]),
            AuthError::CodeExpired => ("code_expired", vec![]),
            AuthError::UserNotFound => ("user_not_found", vec![]),
            AuthError::AmbiguousCustomer { .. } => ("ambiguous_customer", vec![]),
            AuthError::PhoneAlreadyInUse => ("phone_already_in_use", vec![]),
        },
        DomainError::Token(token) => match token {
            TokenError::TokenExpired => ("token_expired", vec![]),
            TokenError::InvalidToken => ("token_invalid", vec![]),
            TokenError::TokenGenerationFailed => ("internal_error", vec![]),
        },
        DomainError::Unauthorized => ("unauthorized", vec![]),
        DomainError::Dependency { .. } | DomainError::Internal { .. } => ("internal_error", vec![]),
    }
}

/// Build the JSON error body for a message key
pub fn error_response(key: &str, lang: Language, params: &[(&str, String)]) -> HttpResponse {
    to_response(localize(key, lang, params))
}

fn to_response(localized: LocalizedError) -> HttpResponse {
    let status =
        StatusCode::from_u16(localized.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse::new(localized.code, localized.message))
}

/// Handle domain errors with language support
///
/// Client errors are logged at warn level; dependency and internal failures
/// at error level with their details, which never reach the response body.
pub fn handle_domain_error_with_lang(error: &DomainError, lang: Language) -> HttpResponse {
    if error.is_client_error() {
        log::warn!("Request rejected: {}", error);
    } else {
        log::error!("Request failed: {:?}", error);
    }

    let (key, params) = message_key(error);
    error_response(key, lang, &params)
}

/// Map request-shape validation failures
///
/// A rejected `code` field reads as an invalid code; a missing value names
/// the field; anything else is a generic validation error.
pub fn handle_validation_errors(errors: &ValidationErrors, lang: Language) -> HttpResponse {
    log::warn!("Request validation failed: {}", errors);

    let field_errors = errors.field_errors();
    if field_errors.contains_key("code") {
        return error_response("invalid_code", lang, &[]);
    }

    let missing = field_errors.iter().find_map(|(field, errs)| {
        errs.iter()
            .any(|e| e.code == "required")
            .then(|| field.to_string())
    });
    match missing {
        Some(field) => error_response("missing_field", lang, &[("field", wire_name(&field))]),
        None => error_response("validation_error", lang, &[]),
    }
}

/// Field name as the client sent it
fn wire_name(field: &str) -> String {
    match field {
        "reset_token" => "resetToken".to_string(),
        "new_password" => "newPassword".to_string(),
        other => other.to_string(),
    }
}
