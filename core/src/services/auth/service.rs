//! Main authentication service implementation

use lp_shared::phone::mask_phone;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::{Customer, IssuedToken, TokenPurpose};
use crate::domain::value_objects::{PhoneNumber, SideEffect, VerificationOutcome};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{CustomerRepository, IdentityRepository, OtpRepository};
use crate::services::lookup::LookupService;
use crate::services::token::TokenService;
use crate::services::verification::{SendCodeResult, SmsSender, VerificationService};

use super::config::AuthServiceConfig;
use super::password::{hash_password, validate_password};

/// Authentication service for the verification and recovery flows
pub struct AuthService<O, S, C, I>
where
    O: OtpRepository,
    S: SmsSender,
    C: CustomerRepository,
    I: IdentityRepository,
{
    /// Code issue and validation
    verification_service: Arc<VerificationService<O, S>>,
    /// Signed token handling
    token_service: Arc<TokenService>,
    /// Customer persistence
    customer_repository: Arc<C>,
    /// Auth identity persistence
    identity_repository: Arc<I>,
    /// Phone to customer resolution
    lookup: LookupService<C>,
    /// Time source for written timestamps
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<O, S, C, I> AuthService<O, S, C, I>
where
    O: OtpRepository,
    S: SmsSender,
    C: CustomerRepository,
    I: IdentityRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `verification_service` - Service for SMS codes
    /// * `token_service` - Service for signed tokens
    /// * `customer_repository` - Repository for customers
    /// * `identity_repository` - Repository for auth identities
    /// * `clock` - Time source
    /// * `config` - Service configuration
    pub fn new(
        verification_service: Arc<VerificationService<O, S>>,
        token_service: Arc<TokenService>,
        customer_repository: Arc<C>,
        identity_repository: Arc<I>,
        clock: Arc<dyn Clock>,
        config: AuthServiceConfig,
    ) -> Self {
        let lookup = LookupService::new(customer_repository.clone());
        Self {
            verification_service,
            token_service,
            customer_repository,
            identity_repository,
            lookup,
            clock,
            config,
        }
    }

    /// The token service, for session verification at the edge
    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Send a verification code to a phone number
    pub async fn send_code(&self, raw_phone: &str) -> DomainResult<SendCodeResult> {
        let phone = self.verification_service.parse_phone(raw_phone)?;
        self.verification_service.send_code(&phone).await
    }

    /// Verify a customer's phone with a code
    ///
    /// Consumes the code once the customer is resolved, then sets the
    /// customer's verified flag and tries to confirm the phone on the linked
    /// auth identity. Only the flag is required to succeed; the confirmation
    /// result is reported in the outcome.
    pub async fn verify_identity(
        &self,
        raw_phone: &str,
        code: &str,
    ) -> DomainResult<VerificationOutcome> {
        let phone = self.verification_service.parse_phone(raw_phone)?;
        let otp = self.verification_service.validate(&phone, code).await?;
        let mut customer = self.lookup.resolve(&phone).await?;
        self.verification_service.consume(&otp).await?;

        let now = self.clock.now();
        if !self
            .customer_repository
            .mark_verified(customer.id, now)
            .await?
        {
            return Err(AuthError::UserNotFound.into());
        }
        customer.verify(now);

        let identity_confirmation = self.confirm_identity_phone(&customer, &phone).await;

        tracing::info!(
            customer_id = %customer.id,
            phone = %mask_phone(phone.as_str()),
            identity_confirmation = ?identity_confirmation,
            event = "customer_verified",
            "Customer phone verified"
        );

        Ok(VerificationOutcome {
            customer,
            identity_confirmation,
        })
    }

    /// Verify a code for password reset and mint a reset token
    ///
    /// The token's subject is the auth identity of the customer owning the
    /// phone. The code is consumed before the token is minted, so a failure
    /// after that point needs a new code.
    pub async fn verify_for_reset(&self, raw_phone: &str, code: &str) -> DomainResult<IssuedToken> {
        let phone = self.verification_service.parse_phone(raw_phone)?;
        let otp = self.verification_service.validate(&phone, code).await?;
        let customer = self.lookup.resolve(&phone).await?;

        let auth_id = customer.auth_id.ok_or_else(|| {
            tracing::warn!(
                customer_id = %customer.id,
                event = "reset_without_identity",
                "Customer has no auth identity to reset"
            );
            DomainError::Auth(AuthError::UserNotFound)
        })?;

        self.verification_service.consume(&otp).await?;
        let token = self.token_service.mint_reset_token(auth_id)?;

        tracing::info!(
            customer_id = %customer.id,
            auth_id = %auth_id,
            event = "reset_token_issued",
            "Password reset token issued"
        );
        Ok(token)
    }

    /// Replace the password of the identity named by a reset token
    pub async fn complete_reset(&self, reset_token: &str, new_password: &str) -> DomainResult<()> {
        let claims = self
            .token_service
            .verify(reset_token, TokenPurpose::PasswordReset)?;
        let auth_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        validate_password(new_password, &self.config.password)?;
        let password_hash = self.hash_off_executor(new_password).await?;

        let updated = self
            .identity_repository
            .update_password_hash(auth_id, &password_hash, self.clock.now())
            .await?;
        if !updated {
            tracing::warn!(
                auth_id = %auth_id,
                event = "reset_identity_missing",
                "Reset token names an unknown identity"
            );
            return Err(AuthError::UserNotFound.into());
        }

        tracing::info!(
            auth_id = %auth_id,
            jti = %claims.jti,
            event = "password_reset_completed",
            "Password reset completed"
        );
        Ok(())
    }

    /// Send a code to a new phone for the authenticated caller
    ///
    /// Fails with `PhoneAlreadyInUse` before any code is issued when the
    /// phone belongs to another customer.
    pub async fn request_phone_update(
        &self,
        caller_auth_id: Uuid,
        raw_phone: &str,
    ) -> DomainResult<SendCodeResult> {
        let phone = self.verification_service.parse_phone(raw_phone)?;
        let caller = self.caller_customer(caller_auth_id).await?;
        self.ensure_phone_available(&phone, &caller).await?;

        tracing::info!(
            customer_id = %caller.id,
            phone = %mask_phone(phone.as_str()),
            event = "phone_update_requested",
            "Phone change requested"
        );
        self.verification_service.send_code(&phone).await
    }

    /// Move the authenticated caller to a new phone after code verification
    ///
    /// The code is deleted inside the phone change itself, so a concurrent
    /// redemption of the same code changes nothing.
    pub async fn confirm_phone_update(
        &self,
        caller_auth_id: Uuid,
        raw_phone: &str,
        code: &str,
    ) -> DomainResult<Customer> {
        let phone = self.verification_service.parse_phone(raw_phone)?;
        let caller = self.caller_customer(caller_auth_id).await?;
        let otp = self.verification_service.validate(&phone, code).await?;
        self.ensure_phone_available(&phone, &caller).await?;

        let updated = self
            .customer_repository
            .change_phone(caller.id, &phone, otp.id, self.clock.now())
            .await?;

        tracing::info!(
            customer_id = %updated.id,
            phone = %mask_phone(phone.as_str()),
            event = "phone_updated",
            "Phone number changed"
        );
        Ok(updated)
    }

    /// Hash on the blocking pool so bcrypt does not stall the async workers
    async fn hash_off_executor(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.config.password.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    /// Best-effort phone confirmation on the linked identity
    async fn confirm_identity_phone(&self, customer: &Customer, phone: &PhoneNumber) -> SideEffect {
        let Some(auth_id) = customer.auth_id else {
            return SideEffect::Skipped;
        };

        match self
            .identity_repository
            .confirm_phone(auth_id, phone, self.clock.now())
            .await
        {
            Ok(true) => SideEffect::Applied,
            Ok(false) => {
                tracing::warn!(
                    customer_id = %customer.id,
                    auth_id = %auth_id,
                    event = "identity_confirmation_failed",
                    "Linked auth identity not found"
                );
                SideEffect::Failed("auth identity not found".to_string())
            }
            Err(e) => {
                tracing::warn!(
                    customer_id = %customer.id,
                    auth_id = %auth_id,
                    error = %e,
                    event = "identity_confirmation_failed",
                    "Failed to confirm phone on auth identity"
                );
                SideEffect::Failed(e.to_string())
            }
        }
    }

    /// The customer linked to the session's identity
    async fn caller_customer(&self, caller_auth_id: Uuid) -> DomainResult<Customer> {
        self.customer_repository
            .find_by_auth_id(caller_auth_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Reject phones stored on a customer other than `owner`
    async fn ensure_phone_available(&self, phone: &PhoneNumber, owner: &Customer) -> DomainResult<()> {
        let holders = self.customer_repository.find_by_phone(phone).await?;
        if holders.iter().any(|c| c.id != owner.id) {
            tracing::warn!(
                customer_id = %owner.id,
                phone = %mask_phone(phone.as_str()),
                event = "phone_already_in_use",
                "Requested phone belongs to another customer"
            );
            return Err(AuthError::PhoneAlreadyInUse.into());
        }
        Ok(())
    }
}
