//! Password reset through a verified phone

use actix_web::{web, HttpRequest, HttpResponse};
use lp_core::repositories::{CustomerRepository, IdentityRepository, OtpRepository};
use lp_core::services::verification::SmsSender;
use lp_shared::SuccessResponse;
use validator::Validate;

use super::AppState;
use crate::dto::{CompleteResetRequest, ResetTokenResponse, VerifyCodeRequest};
use crate::handlers::{handle_domain_error_with_lang, handle_validation_errors};
use crate::i18n::language_from_request;

/// Handler for POST /api/v1/auth/verify-code-for-reset
///
/// Exchanges a valid code for a short-lived reset token. The customer's
/// verified flag is left untouched.
///
/// # Response
///
/// ```json
/// { "success": true, "resetToken": "eyJ...", "expiresAt": "2026-01-01T10:05:00Z" }
/// ```
pub async fn verify_code_for_reset<O, S, C, I>(
    req: HttpRequest,
    state: web::Data<AppState<O, S, C, I>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    S: SmsSender + 'static,
    C: CustomerRepository + 'static,
    I: IdentityRepository + 'static,
{
    let lang = language_from_request(&req);

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }

    match state
        .auth_service
        .verify_for_reset(&request.phone_number, &request.code)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(SuccessResponse::with(ResetTokenResponse {
            reset_token: token.token,
            expires_at: token.expires_at,
        })),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for POST /api/v1/auth/complete-reset
///
/// # Request Body
///
/// ```json
/// { "resetToken": "eyJ...", "newPassword": "una-password-sicura" }
/// ```
///
/// 403 for a bad or expired token, 400 for a password outside the policy.
pub async fn complete_reset<O, S, C, I>(
    req: HttpRequest,
    state: web::Data<AppState<O, S, C, I>>,
    request: web::Json<CompleteResetRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    S: SmsSender + 'static,
    C: CustomerRepository + 'static,
    I: IdentityRepository + 'static,
{
    let lang = language_from_request(&req);

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }

    match state
        .auth_service
        .complete_reset(&request.reset_token, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
