//! CORS middleware configuration for cross-origin requests.
//!
//! Development is permissive. Production only admits the origins listed in
//! `server.allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use lp_shared::{Environment, ServerConfig};

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(server: &ServerConfig, environment: Environment) -> Cors {
    if environment.is_production() {
        create_production_cors(server)
    } else {
        create_development_cors(server.cors_max_age)
    }
}

/// Any origin, for local web and mobile emulators
fn create_development_cors(max_age: usize) -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(max_age)
        .supports_credentials()
}

/// Configured origins only
fn create_production_cors(server: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
        ])
        .max_age(server.cors_max_age);

    for origin in server.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
