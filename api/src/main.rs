use actix_web::{web, HttpServer};
use anyhow::Context;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use lp_api::app::create_app;
use lp_api::handlers::{HealthCheck, HealthChecks};
use lp_api::routes::auth::AppState;
use lp_core::services::{
    AuthService, AuthServiceConfig, SecureCodeGenerator, TokenService, TokenServiceConfig,
    VerificationService, VerificationServiceConfig,
};
use lp_core::{Clock, SystemClock};
use lp_infra::database::{
    DatabasePool, MySqlCustomerRepository, MySqlIdentityRepository, MySqlOtpRepository,
};
use lp_infra::sms::{create_sms_service, SmsSenderAdapter, SmsService};
use lp_shared::{AppConfig, HealthStatus};

/// Database reachability
struct DatabaseHealth(DatabasePool);

#[async_trait]
impl HealthCheck for DatabaseHealth {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match self.0.health_check().await {
            Ok(true) => HealthStatus::Healthy,
            Ok(false) => HealthStatus::Degraded,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthStatus::Unhealthy
            }
        }
    }
}

/// SMS provider availability; a down provider degrades but does not fail
struct SmsHealth(Arc<dyn SmsService>);

#[async_trait]
impl HealthCheck for SmsHealth {
    fn name(&self) -> &str {
        "sms"
    }

    async fn check(&self) -> HealthStatus {
        if self.0.is_available().await {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or(config.logging.filter()))
        .init();

    info!(
        "Starting loyalty platform API ({} environment)",
        config.environment
    );
    if config.auth.jwt.is_using_default_secret() {
        warn!("Using the development token secret; set APP__AUTH__JWT__SECRET");
    }

    // Persistence
    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to run database migrations")?;
    info!("Database ready: {}", pool.get_statistics());

    let otp_repository = Arc::new(MySqlOtpRepository::new(pool.get_pool().clone()));
    let customer_repository = Arc::new(MySqlCustomerRepository::new(pool.get_pool().clone()));
    let identity_repository = Arc::new(MySqlIdentityRepository::new(pool.get_pool().clone()));

    // SMS delivery
    let sms_service = create_sms_service(&config.sms).context("failed to configure SMS")?;
    let sms_sender = Arc::new(SmsSenderAdapter::new(sms_service.clone(), config.sms.clone()));

    // Services
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let verification_service = Arc::new(VerificationService::new(
        otp_repository,
        sms_sender,
        Arc::new(SecureCodeGenerator),
        clock.clone(),
        VerificationServiceConfig::from(&config.otp),
    ));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let auth_service = Arc::new(AuthService::new(
        verification_service,
        token_service.clone(),
        customer_repository,
        identity_repository,
        clock,
        AuthServiceConfig::from(&config.auth),
    ));

    let state = web::Data::new(AppState::new(auth_service, token_service));
    let health_checks = web::Data::new(HealthChecks(vec![
        Arc::new(DatabaseHealth(pool.clone())),
        Arc::new(SmsHealth(sms_service)),
    ]));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || {
        create_app(
            state.clone(),
            health_checks.clone(),
            &server_config,
            environment,
        )
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}
