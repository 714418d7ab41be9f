//! Session authentication middleware for protected endpoints.
//!
//! Extracts a Bearer token from the Authorization header, verifies it as a
//! session token and injects an [`AuthContext`] into the request.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use lp_core::{
    domain::entities::{Claims, TokenPurpose},
    errors::{DomainError, TokenError},
    services::token::TokenService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::error_response;
use crate::i18n::language_from_request;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Auth identity id from the session token
    pub user_id: Uuid,
    /// Token id for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from session claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        Ok(Self {
            user_id,
            jti: claims.jti,
        })
    }
}

/// Session authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}

/// Session authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = self.token_service.clone();

        Box::pin(async move {
            let context = extract_bearer_token(&req)
                .ok_or_else(|| "missing bearer token".to_string())
                .and_then(|token| {
                    token_service
                        .verify(&token, TokenPurpose::Session)
                        .and_then(AuthContext::from_claims)
                        .map_err(|e| e.to_string())
                });

            match context {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await
                }
                Err(reason) => {
                    log::warn!("Rejected unauthenticated request to {}: {}", req.path(), reason);
                    Err(unauthorized(req.request(), reason))
                }
            }
        })
    }
}

/// 401 with the localized error body
fn unauthorized(req: &HttpRequest, reason: String) -> Error {
    let response = error_response("unauthorized", language_from_request(req), &[]);
    InternalError::from_response(reason, response).into()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized(req, "no session context".to_string()));

        ready(result)
    }
}
