//! Wiring shared by the HTTP tests: the real app over in-memory stores

#![allow(dead_code)]

use actix_web::{
    body::{to_bytes, MessageBody},
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web,
};
use chrono::Utc;
use lp_api::handlers::HealthChecks;
use lp_api::routes::auth::AppState;
use lp_core::clock::ManualClock;
use lp_core::domain::entities::{AuthIdentity, Customer};
use lp_core::domain::value_objects::PhoneNumber;
use lp_core::repositories::{MockCustomerRepository, MockIdentityRepository, MockOtpRepository};
use lp_core::services::verification::mocks::{MockSmsSender, QueuedCodeGenerator};
use lp_core::services::{
    AuthService, AuthServiceConfig, TokenService, TokenServiceConfig, VerificationService,
    VerificationServiceConfig,
};
use lp_shared::PasswordPolicy;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub type TestState =
    AppState<MockOtpRepository, MockSmsSender, MockCustomerRepository, MockIdentityRepository>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub otps: Arc<MockOtpRepository>,
    pub sms: Arc<MockSmsSender>,
    pub customers: Arc<MockCustomerRepository>,
    pub identities: Arc<MockIdentityRepository>,
    pub generator: Arc<QueuedCodeGenerator>,
    pub clock: Arc<ManualClock>,
    pub tokens: Arc<TokenService>,
}

impl TestContext {
    pub fn new() -> Self {
        let otps = Arc::new(MockOtpRepository::new());
        let sms = Arc::new(MockSmsSender::new(false));
        let identities = Arc::new(MockIdentityRepository::new());
        let customers = Arc::new(
            MockCustomerRepository::with_identities(identities.as_ref().clone())
                .with_otps(otps.as_ref().clone()),
        );
        let generator = Arc::new(QueuedCodeGenerator::default());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));

        let verification = Arc::new(VerificationService::new(
            otps.clone(),
            sms.clone(),
            generator.clone(),
            clock.clone(),
            VerificationServiceConfig::default(),
        ));
        let auth_service = Arc::new(AuthService::new(
            verification,
            tokens.clone(),
            customers.clone(),
            identities.clone(),
            clock.clone(),
            AuthServiceConfig {
                password: PasswordPolicy {
                    bcrypt_cost: 4,
                    ..PasswordPolicy::default()
                },
            },
        ));

        Self {
            state: web::Data::new(AppState::new(auth_service, tokens.clone())),
            otps,
            sms,
            customers,
            identities,
            generator,
            clock,
            tokens,
        }
    }

    pub fn health_checks(&self) -> web::Data<HealthChecks> {
        web::Data::new(HealthChecks::default())
    }

    /// A customer with a linked identity, both on `raw_phone`
    pub async fn customer_with_identity(&self, raw_phone: &str) -> (Customer, AuthIdentity) {
        let phone = PhoneNumber::parse(raw_phone).unwrap();
        let identity = AuthIdentity::new(Uuid::new_v4()).with_phone(phone.as_str());
        let customer = Customer::new(&phone).with_auth_id(identity.id);
        self.identities.insert(identity.clone()).await;
        self.customers.insert(customer.clone()).await;
        (customer, identity)
    }

    /// Bearer header value for a session of `identity_id`
    pub fn bearer(&self, identity_id: Uuid) -> String {
        let token = self.tokens.mint_session_token(identity_id).unwrap();
        format!("Bearer {}", token.token)
    }
}

/// Build the app exactly as the binary does
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(lp_api::app::create_app(
            $ctx.state.clone(),
            $ctx.health_checks(),
            &lp_shared::ServerConfig::default(),
            lp_shared::Environment::Development,
        ))
        .await
    };
}

/// Status and JSON body, including responses produced by middleware errors
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            let body = test::read_body(resp).await;
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let body = to_bytes(resp.into_body()).await.unwrap_or_default();
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
    }
}

pub fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}
