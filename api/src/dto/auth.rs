use chrono::{DateTime, Utc};
use lp_core::domain::entities::Customer;
use lp_core::domain::value_objects::SideEffect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of send-code and phone/request-update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Phone number in any common format, e.g. "333 123 4567" or "+393331234567"
    #[serde(default)]
    #[validate(length(min = 1, max = 32, code = "required"))]
    pub phone_number: String,
}

/// Body of verify-code, verify-code-for-reset and phone/confirm-update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 32, code = "required"))]
    pub phone_number: String,

    /// 6-digit verification code
    #[serde(default)]
    #[validate(length(equal = 6))]
    pub code: String,
}

/// Body of complete-reset
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResetRequest {
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub reset_token: String,

    /// Length policy is enforced by the service
    #[serde(default)]
    #[validate(length(min = 1, max = 1024, code = "required"))]
    pub new_password: String,
}

/// Customer as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub auth_id: Option<Uuid>,
    pub email: Option<String>,
    pub phone_number: String,
    pub is_verified: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for UserDto {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            auth_id: customer.auth_id,
            email: customer.email,
            phone_number: customer.phone_number,
            is_verified: customer.is_verified,
            updated_at: customer.updated_at,
        }
    }
}

/// Payload of verify-code
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedUserResponse {
    pub user: UserDto,
    /// Whether the linked auth identity was also marked confirmed
    pub identity_confirmation: SideEffect,
}

/// Payload of phone/confirm-update
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

/// Payload of verify-code-for-reset
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetTokenResponse {
    pub reset_token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_code_request_validation() {
        let valid = SendCodeRequest {
            phone_number: "333 123 4567".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing: SendCodeRequest = serde_json::from_str("{}").unwrap();
        let errors = missing.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn test_verify_code_request_requires_six_chars() {
        let request = VerifyCodeRequest {
            phone_number: "3331234567".to_string(),
            code: "12345".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
    }

    #[test]
    fn test_complete_reset_uses_camel_case() {
        let request: CompleteResetRequest =
            serde_json::from_str(r#"{"resetToken":"abc","newPassword":"secret-pass"}"#).unwrap();
        assert_eq!(request.reset_token, "abc");
        assert_eq!(request.new_password, "secret-pass");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reset_token_response_shape() {
        let body = serde_json::to_value(ResetTokenResponse {
            reset_token: "tok".to_string(),
            expires_at: Utc::now(),
        })
        .unwrap();
        assert_eq!(body["resetToken"], "tok");
        assert!(body["expiresAt"].is_string());
    }
}
