//! Main verification service implementation

use chrono::Duration;
use lp_shared::phone::mask_phone;
use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::{is_well_formed_code, OtpCode};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::OtpRepository;

use super::config::VerificationServiceConfig;
use super::traits::{CodeGenerator, SmsSender};
use super::types::SendCodeResult;

/// Verification service for issuing and checking SMS one-time codes
pub struct VerificationService<O: OtpRepository, S: SmsSender> {
    /// Code store
    otp_repository: Arc<O>,
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Code source
    generator: Arc<dyn CodeGenerator>,
    /// Time source for issue timestamps and expiry checks
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<O: OtpRepository, S: SmsSender> VerificationService<O, S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `otp_repository` - Code store implementation
    /// * `sms_service` - SMS service implementation
    /// * `generator` - Code source
    /// * `clock` - Time source
    /// * `config` - Service configuration
    pub fn new(
        otp_repository: Arc<O>,
        sms_service: Arc<S>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            otp_repository,
            sms_service,
            generator,
            clock,
            config,
        }
    }

    /// Validity window of a code
    pub fn validity(&self) -> Duration {
        Duration::minutes(self.config.code_validity_minutes)
    }

    /// Parse a user-entered phone with the configured country code
    pub fn parse_phone(&self, raw: &str) -> DomainResult<PhoneNumber> {
        Ok(PhoneNumber::parse_with_country(
            raw,
            &self.config.default_country_code,
        )?)
    }

    /// Send a verification code to a phone number
    ///
    /// This method:
    /// 1. Generates a new code
    /// 2. Replaces every stored code for the phone with it, atomically
    /// 3. Sends the code via SMS
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The stored row and the provider message ID
    /// * `Err(DomainError::Dependency)` - The store or the SMS provider failed
    pub async fn send_code(&self, phone: &PhoneNumber) -> DomainResult<SendCodeResult> {
        let masked = mask_phone(phone.as_str());
        let otp = OtpCode::new(phone, self.generator.generate(), self.clock.now());

        self.otp_repository.issue(phone, &otp).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        tracing::info!(
            phone = %masked,
            event = "otp_issued",
            otp_id = %otp.id,
            "Issued new verification code"
        );

        let message_id = self
            .sms_service
            .send_verification_code(phone.as_str(), &otp.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "sms_send_failed",
                    "Failed to deliver verification code"
                );
                DomainError::sms(e)
            })?;

        tracing::info!(
            phone = %masked,
            message_id = %message_id,
            event = "otp_sent",
            "Verification code delivered to SMS provider"
        );

        let expires_at = otp.expires_at(self.validity());
        Ok(SendCodeResult {
            otp,
            message_id,
            expires_at,
        })
    }

    /// Check a submitted code without consuming it
    ///
    /// # Returns
    ///
    /// * `Ok(OtpCode)` - The matching row, within its validity window
    /// * `Err(AuthError::InvalidOrExpiredCode)` - Malformed code or no matching row
    /// * `Err(AuthError::CodeExpired)` - The row exists but is past its window;
    ///   it is left in place
    pub async fn validate(&self, phone: &PhoneNumber, code: &str) -> DomainResult<OtpCode> {
        let masked = mask_phone(phone.as_str());

        if !is_well_formed_code(code) {
            tracing::warn!(
                phone = %masked,
                event = "invalid_code_format",
                code_length = code.len(),
                "Malformed verification code submitted"
            );
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        let otp = match self.otp_repository.find(phone, code).await? {
            Some(otp) => otp,
            None => {
                tracing::warn!(
                    phone = %masked,
                    event = "otp_verification_failed",
                    "No matching verification code"
                );
                return Err(AuthError::InvalidOrExpiredCode.into());
            }
        };

        if otp.is_expired_at(self.clock.now(), self.validity()) {
            tracing::warn!(
                phone = %masked,
                otp_id = %otp.id,
                event = "otp_expired",
                "Verification code expired"
            );
            return Err(AuthError::CodeExpired.into());
        }

        tracing::info!(
            phone = %masked,
            otp_id = %otp.id,
            event = "otp_verified_success",
            "Verification code accepted"
        );
        Ok(otp)
    }

    /// Delete a validated code so it cannot be replayed
    ///
    /// Only the caller whose delete removes the row may act on the code; a
    /// concurrent redemption that lost the race gets `InvalidOrExpiredCode`.
    pub async fn consume(&self, otp: &OtpCode) -> DomainResult<()> {
        let removed = self.otp_repository.consume(otp.id).await?;
        if !removed {
            tracing::warn!(
                otp_id = %otp.id,
                event = "otp_already_consumed",
                "Verification code was redeemed concurrently"
            );
            return Err(AuthError::InvalidOrExpiredCode.into());
        }
        Ok(())
    }
}
