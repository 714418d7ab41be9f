//! MySQL implementation of the IdentityRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lp_core::domain::entities::AuthIdentity;
use lp_core::domain::value_objects::PhoneNumber;
use lp_core::errors::DomainError;
use lp_core::repositories::IdentityRepository;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use super::{column_error, parse_uuid, query_failed};

/// Auth identity store backed by the `auth_identities` table
pub struct MySqlIdentityRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlIdentityRepository {
    /// Create a new MySQL identity repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_identity(row: &sqlx::mysql::MySqlRow) -> Result<AuthIdentity, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(AuthIdentity {
            id: parse_uuid("auth_identities.id", &id)?,
            phone: row.try_get("phone").map_err(|e| column_error("phone", e))?,
            phone_confirmed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("phone_confirmed_at")
                .map_err(|e| column_error("phone_confirmed_at", e))?,
            email_confirmed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_confirmed_at")
                .map_err(|e| column_error("email_confirmed_at", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl IdentityRepository for MySqlIdentityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthIdentity>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, phone, phone_confirmed_at, email_confirmed_at,
                   password_hash, updated_at
            FROM auth_identities
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("identity.find_by_id", e))?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn confirm_phone(
        &self,
        id: Uuid,
        phone: &PhoneNumber,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE auth_identities
            SET phone = ?, phone_confirmed_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(phone.as_str())
        .bind(at)
        .bind(at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("identity.confirm_phone", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE auth_identities
            SET password_hash = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("identity.update_password_hash", e))?;

        Ok(result.rows_affected() > 0)
    }
}
