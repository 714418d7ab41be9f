use actix_web::{web, HttpRequest, HttpResponse};
use lp_core::repositories::{CustomerRepository, IdentityRepository, OtpRepository};
use lp_core::services::verification::SmsSender;
use lp_shared::SuccessResponse;
use validator::Validate;

use super::AppState;
use crate::dto::{VerifiedUserResponse, VerifyCodeRequest};
use crate::handlers::{handle_domain_error_with_lang, handle_validation_errors};
use crate::i18n::language_from_request;

/// Handler for POST /api/v1/auth/verify-code
///
/// Proves ownership of the phone and marks the owning customer verified.
///
/// # Request Body
///
/// ```json
/// { "phone_number": "+393331234567", "code": "123456" }
/// ```
///
/// # Response
///
/// ```json
/// {
///     "success": true,
///     "user": { "id": "...", "phone_number": "+393331234567", "is_verified": true, ... },
///     "identity_confirmation": { "status": "applied" }
/// }
/// ```
pub async fn verify_code<O, S, C, I>(
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
        .verify_identity(&request.phone_number, &request.code)
        .await
    {
        Ok(outcome) => {
            if outcome.identity_confirmation.is_failed() {
                log::warn!(
                    "Customer {} verified but identity confirmation failed: {:?}",
                    outcome.customer.id,
                    outcome.identity_confirmation
                );
            }
            HttpResponse::Ok().json(SuccessResponse::with(VerifiedUserResponse {
                user: outcome.customer.into(),
                identity_confirmation: outcome.identity_confirmation,
            }))
        }
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
