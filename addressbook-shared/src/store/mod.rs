/// Datastore seam for users and their addresses
///
/// The HTTP layer talks to storage only through [`AddressStore`]. Two
/// backends are provided:
///
/// - [`postgres::PgStore`]: production backend over a `sqlx` pool
/// - [`memory::MemoryStore`]: in-process maps, for tests and local runs
///
/// Lookups that find nothing return `Ok(None)`/`Ok(false)`; `Err` is reserved
/// for infrastructure faults.
///
/// # Example
///
/// ```
/// use addressbook_shared::models::{address::CreateAddress, user::CreateUser};
/// use addressbook_shared::store::{memory::MemoryStore, AddressStore};
///
/// # async fn example() -> Result<(), addressbook_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// let user = store.insert_user(CreateUser::default()).await;
///
/// let address = store
///     .create_address_for_user(
///         user.id,
///         CreateAddress {
///             full_name: "Asha Rao".to_string(),
///             mobile_number: "9876543210".to_string(),
///             pincode: "411001".to_string(),
///             flat_no: "12B".to_string(),
///             city: "Pune".to_string(),
///             state: "Maharashtra".to_string(),
///             street: "FC Road".to_string(),
///             landmark: None,
///         },
///     )
///     .await?;
/// assert!(address.is_some());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use crate::models::address::{Address, AddressPatch, CreateAddress};
use async_trait::async_trait;
use uuid::Uuid;

/// Errors raised by a datastore backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure in the database
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations needed by the address endpoints
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Short backend name, reported by the health check
    fn name(&self) -> &str;

    /// Verifies the backend can serve requests
    async fn ping(&self) -> StoreResult<()>;

    /// Resolves a user's address references to full records, in stored order
    ///
    /// Returns `None` if the user does not exist. References to deleted
    /// addresses are skipped.
    async fn list_user_addresses(&self, user_id: Uuid) -> StoreResult<Option<Vec<Address>>>;

    /// Creates an address and appends a reference to it on the user
    ///
    /// Returns `None`, and creates nothing, if the user does not exist.
    async fn create_address_for_user(
        &self,
        user_id: Uuid,
        data: CreateAddress,
    ) -> StoreResult<Option<Address>>;

    /// Fetches an address by key
    async fn find_address(&self, address_id: Uuid) -> StoreResult<Option<Address>>;

    /// Merges `patch` into an existing address
    ///
    /// Returns the updated record, or `None` if the address does not exist.
    async fn update_address(
        &self,
        address_id: Uuid,
        patch: AddressPatch,
    ) -> StoreResult<Option<Address>>;

    /// Deletes an address, returning false if it did not exist
    ///
    /// User reference lists are left untouched.
    async fn delete_address(&self, address_id: Uuid) -> StoreResult<bool>;
}
