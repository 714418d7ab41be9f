//! Phone number change for the signed-in customer
//!
//! Both handlers sit behind the session middleware.

use actix_web::{web, HttpRequest, HttpResponse};
use lp_core::repositories::{CustomerRepository, IdentityRepository, OtpRepository};
use lp_core::services::verification::SmsSender;
use lp_shared::phone::mask_phone;
use lp_shared::SuccessResponse;
use validator::Validate;

use super::AppState;
use crate::dto::{SendCodeRequest, UserResponse, VerifyCodeRequest};
use crate::handlers::{handle_domain_error_with_lang, handle_validation_errors};
use crate::i18n::language_from_request;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/auth/phone/request-update
///
/// Sends a code to the new phone unless another customer already uses it
/// (409 `PHONE_ALREADY_IN_USE`, no code sent).
pub async fn request_phone_update<O, S, C, I>(
    req: HttpRequest,
    auth: AuthContext,
    state: web::Data<AppState<O, S, C, I>>,
    request: web::Json<SendCodeRequest>,
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
        .request_phone_update(auth.user_id, &request.phone_number)
        .await
    {
        Ok(result) => {
            log::info!(
                "Phone change code sent to {} for identity {}",
                mask_phone(&result.otp.phone_number),
                auth.user_id
            );
            HttpResponse::Ok().json(SuccessResponse::ok())
        }
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for POST /api/v1/auth/phone/confirm-update
///
/// Moves the customer and its auth identity to the new phone in one
/// transaction and returns the updated customer.
pub async fn confirm_phone_update<O, S, C, I>(
    req: HttpRequest,
    auth: AuthContext,
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
        .confirm_phone_update(auth.user_id, &request.phone_number, &request.code)
        .await
    {
        Ok(customer) => HttpResponse::Ok().json(SuccessResponse::with(UserResponse {
            user: customer.into(),
        })),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
