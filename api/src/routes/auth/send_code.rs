use actix_web::{web, HttpRequest, HttpResponse};
use lp_core::repositories::{CustomerRepository, IdentityRepository, OtpRepository};
use lp_core::services::verification::SmsSender;
use lp_shared::phone::mask_phone;
use lp_shared::SuccessResponse;
use validator::Validate;

use super::AppState;
use crate::dto::SendCodeRequest;
use crate::handlers::{handle_domain_error_with_lang, handle_validation_errors};
use crate::i18n::language_from_request;

/// Handler for POST /api/v1/auth/send-code
///
/// Issues a fresh code for the phone, invalidating earlier ones, and sends it
/// by SMS. The phone does not need to belong to a customer yet.
///
/// # Request Body
///
/// ```json
/// { "phone_number": "333 123 4567" }
/// ```
///
/// # Response
///
/// `200 {"success": true}`; 400 for a malformed phone, 500 when the SMS
/// provider or the database fails.
pub async fn send_code<O, S, C, I>(
    req: HttpRequest,
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

    match state.auth_service.send_code(&request.phone_number).await {
        Ok(result) => {
            log::info!(
                "Verification code sent to {}, message_id: {}",
                mask_phone(&result.otp.phone_number),
                result.message_id
            );
            HttpResponse::Ok().json(SuccessResponse::ok())
        }
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
