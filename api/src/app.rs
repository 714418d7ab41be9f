//! Application factory

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Logger,
    web, App, HttpRequest, HttpResponse,
};
use lp_core::repositories::{CustomerRepository, IdentityRepository, OtpRepository};
use lp_core::services::verification::SmsSender;
use lp_shared::{Environment, ServerConfig};

use crate::handlers::{error_response, health_check, HealthChecks};
use crate::i18n::language_from_request;
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::auth::{
    phone::{confirm_phone_update, request_phone_update},
    reset::{complete_reset, verify_code_for_reset},
    send_code::send_code,
    verify_code::verify_code,
    AppState,
};

/// Largest accepted JSON body in bytes
const JSON_LIMIT: usize = 4096;

/// Create and configure the application with all routes and middleware
///
/// Routes:
/// - `GET  /health`
/// - `POST /api/v1/auth/send-code`
/// - `POST /api/v1/auth/verify-code`
/// - `POST /api/v1/auth/verify-code-for-reset`
/// - `POST /api/v1/auth/complete-reset`
/// - `POST /api/v1/auth/phone/request-update` (session token)
/// - `POST /api/v1/auth/phone/confirm-update` (session token)
pub fn create_app<O, S, C, I>(
    state: web::Data<AppState<O, S, C, I>>,
    health_checks: web::Data<HealthChecks>,
    server: &ServerConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    O: OtpRepository + 'static,
    S: SmsSender + 'static,
    C: CustomerRepository + 'static,
    I: IdentityRepository + 'static,
{
    let session_auth = JwtAuth::new(state.token_service.clone());

    App::new()
        .app_data(state)
        .app_data(health_checks)
        .app_data(json_config())
        .wrap(create_cors(server, environment))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/auth")
                .route("/send-code", web::post().to(send_code::<O, S, C, I>))
                .route("/verify-code", web::post().to(verify_code::<O, S, C, I>))
                .route(
                    "/verify-code-for-reset",
                    web::post().to(verify_code_for_reset::<O, S, C, I>),
                )
                .route("/complete-reset", web::post().to(complete_reset::<O, S, C, I>))
                .service(
                    web::scope("/phone")
                        .wrap(session_auth)
                        .route(
                            "/request-update",
                            web::post().to(request_phone_update::<O, S, C, I>),
                        )
                        .route(
                            "/confirm-update",
                            web::post().to(confirm_phone_update::<O, S, C, I>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed or oversized bodies answer with the localized validation error
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, req| {
            log::debug!("Rejected JSON body on {}: {}", req.path(), err);
            let response = error_response("validation_error", language_from_request(req), &[]);
            InternalError::from_response(err, response).into()
        })
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    error_response("not_found", language_from_request(&req), &[])
}
