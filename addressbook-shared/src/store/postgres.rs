/// PostgreSQL-backed [`AddressStore`]
///
/// Thin wrapper over the model operations in [`crate::models`]. Address
/// creation and user attachment run in a single transaction, so a failure
/// between the two writes leaves no orphaned address behind.

use super::{AddressStore, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    address::{Address, AddressPatch, CreateAddress},
    user::User,
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Address store over a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressStore for PgStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_user_addresses(&self, user_id: Uuid) -> StoreResult<Option<Vec<Address>>> {
        if User::find_by_id(&self.pool, user_id).await?.is_none() {
            return Ok(None);
        }

        let addresses = Address::list_for_user(&self.pool, user_id).await?;
        Ok(Some(addresses))
    }

    async fn create_address_for_user(
        &self,
        user_id: Uuid,
        data: CreateAddress,
    ) -> StoreResult<Option<Address>> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps the user from disappearing before the reference lands
        let user: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if user.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let address = Address::create(&mut *tx, data).await?;
        User::attach_address(&mut *tx, user_id, address.id).await?;
        tx.commit().await?;

        debug!(user_id = %user_id, address_id = %address.id, "Address attached to user");
        Ok(Some(address))
    }

    async fn find_address(&self, address_id: Uuid) -> StoreResult<Option<Address>> {
        Ok(Address::find_by_id(&self.pool, address_id).await?)
    }

    async fn update_address(
        &self,
        address_id: Uuid,
        patch: AddressPatch,
    ) -> StoreResult<Option<Address>> {
        Ok(Address::update(&self.pool, address_id, patch).await?)
    }

    async fn delete_address(&self, address_id: Uuid) -> StoreResult<bool> {
        Ok(Address::delete(&self.pool, address_id).await?)
    }
}
