//! MySQL implementation of the CustomerRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lp_core::domain::entities::Customer;
use lp_core::domain::value_objects::PhoneNumber;
use lp_core::errors::{AuthError, DomainError};
use lp_core::repositories::CustomerRepository;
use lp_shared::phone::mask_phone;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use super::{column_error, parse_uuid, placeholders, query_failed};

const CUSTOMER_COLUMNS: &str =
    "id, auth_id, email, phone_number, is_verified, created_at, updated_at";

/// Customer store backed by the `customers` table
pub struct MySqlCustomerRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCustomerRepository {
    /// Create a new MySQL customer repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_customer(row: &sqlx::mysql::MySqlRow) -> Result<Customer, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let auth_id: Option<String> = row
            .try_get("auth_id")
            .map_err(|e| column_error("auth_id", e))?;

        Ok(Customer {
            id: parse_uuid("customers.id", &id)?,
            auth_id: auth_id
                .as_deref()
                .map(|v| parse_uuid("customers.auth_id", v))
                .transpose()?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| column_error("is_verified", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    async fn find_one(
        &self,
        operation: &'static str,
        column: &str,
        value: String,
    ) -> Result<Option<Customer>, DomainError> {
        let select = format!(
            "SELECT {} FROM customers WHERE {} = ? LIMIT 1",
            CUSTOMER_COLUMNS, column
        );
        let row = sqlx::query(&select)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed(operation, e))?;

        row.as_ref().map(Self::row_to_customer).transpose()
    }
}

/// A unique key on `customers.phone_number` rejected the write
fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Vec<Customer>, DomainError> {
        let variants = phone.variants();
        let select = format!(
            "SELECT {} FROM customers WHERE phone_number IN ({})",
            CUSTOMER_COLUMNS,
            placeholders(variants.len())
        );

        let mut query = sqlx::query(&select);
        for variant in &variants {
            query = query.bind(variant);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("customer.find_by_phone", e))?;

        rows.iter().map(Self::row_to_customer).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        self.find_one("customer.find_by_id", "id", id.to_string())
            .await
    }

    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<Customer>, DomainError> {
        self.find_one("customer.find_by_auth_id", "auth_id", auth_id.to_string())
            .await
    }

    async fn mark_verified(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET is_verified = TRUE, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("customer.mark_verified", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn change_phone(
        &self,
        id: Uuid,
        phone: &PhoneNumber,
        otp_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Customer, DomainError> {
        // Dropping `tx` on an early return rolls every statement back
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_failed("customer.change_phone.begin", e))?;

        let select = format!(
            "SELECT {} FROM customers WHERE id = ? FOR UPDATE",
            CUSTOMER_COLUMNS
        );
        let row = sqlx::query(&select)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_failed("customer.change_phone.lock", e))?;

        let Some(row) = row else {
            return Err(AuthError::UserNotFound.into());
        };
        let mut customer = Self::row_to_customer(&row)?;

        // The unique index only covers the exact string; legacy rows may hold
        // another variant of the same number
        let variants = phone.variants();
        let holders = format!(
            "SELECT id FROM customers WHERE phone_number IN ({}) AND id <> ? FOR UPDATE",
            placeholders(variants.len())
        );
        let mut query = sqlx::query(&holders);
        for variant in &variants {
            query = query.bind(variant);
        }
        let taken = query
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_failed("customer.change_phone.holders", e))?;
        if taken.is_some() {
            return Err(AuthError::PhoneAlreadyInUse.into());
        }

        let redeemed = sqlx::query("DELETE FROM otp_codes WHERE id = ?")
            .bind(otp_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("customer.change_phone.otp", e))?;
        if redeemed.rows_affected() == 0 {
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        sqlx::query("UPDATE customers SET phone_number = ?, updated_at = ? WHERE id = ?")
            .bind(phone.as_str())
            .bind(at)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Auth(AuthError::PhoneAlreadyInUse)
                } else {
                    query_failed("customer.change_phone.customer", e)
                }
            })?;

        if let Some(auth_id) = customer.auth_id {
            sqlx::query(
                r#"
                UPDATE auth_identities
                SET phone = ?, phone_confirmed_at = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(phone.as_str())
            .bind(at)
            .bind(at)
            .bind(auth_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("customer.change_phone.identity", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| query_failed("customer.change_phone.commit", e))?;

        customer.change_phone(phone, at);
        tracing::debug!(
            customer_id = %customer.id,
            phone = %mask_phone(phone.as_str()),
            event = "customer_phone_written",
            "Customer and identity phone updated"
        );
        Ok(customer)
    }
}
