//! MySQL implementation of the OtpRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lp_core::domain::entities::OtpCode;
use lp_core::domain::value_objects::PhoneNumber;
use lp_core::errors::DomainError;
use lp_core::repositories::OtpRepository;
use lp_shared::phone::mask_phone;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use super::{column_error, parse_uuid, placeholders, query_failed};

/// One-time code store backed by the `otp_codes` table
///
/// Rows written by older clients may hold a non-canonical phone, so every
/// lookup and invalidation matches all stored variants of the number.
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_otp(row: &sqlx::mysql::MySqlRow) -> Result<OtpCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(OtpCode {
            id: parse_uuid("otp_codes.id", &id)?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn issue(&self, phone: &PhoneNumber, otp: &OtpCode) -> Result<(), DomainError> {
        let variants = phone.variants();
        let delete = format!(
            "DELETE FROM otp_codes WHERE phone_number IN ({})",
            placeholders(variants.len())
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_failed("otp.issue.begin", e))?;

        let mut query = sqlx::query(&delete);
        for variant in &variants {
            query = query.bind(variant);
        }
        let removed = query
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("otp.issue.delete", e))?
            .rows_affected();

        sqlx::query(
            r#"
            INSERT INTO otp_codes (id, phone_number, code, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(otp.id.to_string())
        .bind(&otp.phone_number)
        .bind(&otp.code)
        .bind(otp.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| query_failed("otp.issue.insert", e))?;

        tx.commit()
            .await
            .map_err(|e| query_failed("otp.issue.commit", e))?;

        tracing::debug!(
            phone = %mask_phone(phone.as_str()),
            replaced = removed,
            event = "otp_row_written",
            "Stored one-time code"
        );
        Ok(())
    }

    async fn find(&self, phone: &PhoneNumber, code: &str) -> Result<Option<OtpCode>, DomainError> {
        let variants = phone.variants();
        let select = format!(
            r#"
            SELECT id, phone_number, code, created_at
            FROM otp_codes
            WHERE phone_number IN ({}) AND code = ?
            ORDER BY created_at DESC
            LIMIT 1
            LOCK IN SHARE MODE
            "#,
            placeholders(variants.len())
        );

        let mut query = sqlx::query(&select);
        for variant in &variants {
            query = query.bind(variant);
        }
        let row = query
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("otp.find", e))?;

        row.as_ref().map(Self::row_to_otp).transpose()
    }

    async fn consume(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("otp.consume", e))?;

        Ok(result.rows_affected() > 0)
    }
}
