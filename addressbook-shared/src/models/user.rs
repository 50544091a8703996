/// User model and database operations
///
/// Users are owned by the surrounding application; this service only reads
/// them and appends address references. `create` and `delete` exist for
/// seeding and tests.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255),
///     email VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE user_addresses (
///     position BIGSERIAL PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     address_id UUID NOT NULL
/// );
/// ```
///
/// `user_addresses.address_id` deliberately has no foreign key: deleting an
/// address leaves the reference behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgExecutor, PgPool};
use uuid::Uuid;

/// A user account that owns addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Optional display name
    pub name: Option<String>,

    /// Optional contact email
    pub email: Option<String>,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// Builds a fresh user record for stores that assign keys themselves
    pub fn new(data: CreateUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            created_at: Utc::now(),
        }
    }

    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .fetch_one(pool)
        .await
    }

    /// Finds a user by ID
    ///
    /// Accepts any executor so the lookup can run inside a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Appends an address reference to the user's list
    ///
    /// The reference is placed after all existing ones. The same address may
    /// be attached more than once.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist (foreign key violation) or
    /// the database connection fails
    pub async fn attach_address<'e, E>(
        executor: E,
        user_id: Uuid,
        address_id: Uuid,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("INSERT INTO user_addresses (user_id, address_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(address_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Returns the user's address references in attachment order
    ///
    /// Unlike [`crate::models::address::Address::list_for_user`], this includes
    /// references to addresses that no longer exist.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn address_refs(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT address_id FROM user_addresses WHERE user_id = $1 ORDER BY position ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Deletes a user and its reference list
    ///
    /// # Returns
    ///
    /// True if user was deleted, false if user didn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_gets_fresh_id() {
        let a = User::new(CreateUser::default());
        let b = User::new(CreateUser::default());
        assert_ne!(a.id, b.id);
        assert!(a.name.is_none());
    }

    // Integration tests for database operations are in tests/pg_store_tests.rs
}
