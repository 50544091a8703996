/// In-memory [`AddressStore`]
///
/// Keeps users, their reference lists and addresses in maps behind one
/// `RwLock`. Every trait operation takes the lock once, so the create path
/// (insert address, append reference) is atomic with respect to other
/// requests. Nothing survives a restart.

use super::{AddressStore, StoreResult};
use crate::models::{
    address::{Address, AddressPatch, CreateAddress},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, UserEntry>,
    addresses: HashMap<Uuid, Address>,
}

#[derive(Debug)]
struct UserEntry {
    user: User,
    address_refs: Vec<Uuid>,
}

/// Address store held entirely in process memory
///
/// Cloning shares the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user with an empty address list
    pub async fn insert_user(&self, data: CreateUser) -> User {
        let user = User::new(data);
        let mut inner = self.inner.write().await;
        inner.users.insert(
            user.id,
            UserEntry {
                user: user.clone(),
                address_refs: Vec::new(),
            },
        );
        user
    }

    /// Returns the raw reference list of a user, including dangling entries
    pub async fn address_refs(&self, user_id: Uuid) -> Option<Vec<Uuid>> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&user_id)
            .map(|entry| entry.address_refs.clone())
    }

    /// Number of address records currently stored
    pub async fn address_count(&self) -> usize {
        self.inner.read().await.addresses.len()
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_user_addresses(&self, user_id: Uuid) -> StoreResult<Option<Vec<Address>>> {
        let inner = self.inner.read().await;
        let Some(entry) = inner.users.get(&user_id) else {
            return Ok(None);
        };

        let addresses = entry
            .address_refs
            .iter()
            .filter_map(|id| inner.addresses.get(id).cloned())
            .collect();

        Ok(Some(addresses))
    }

    async fn create_address_for_user(
        &self,
        user_id: Uuid,
        data: CreateAddress,
    ) -> StoreResult<Option<Address>> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user_id) {
            return Ok(None);
        }

        let address = Address::new(data);
        inner.addresses.insert(address.id, address.clone());
        if let Some(entry) = inner.users.get_mut(&user_id) {
            entry.address_refs.push(address.id);
        }

        Ok(Some(address))
    }

    async fn find_address(&self, address_id: Uuid) -> StoreResult<Option<Address>> {
        Ok(self.inner.read().await.addresses.get(&address_id).cloned())
    }

    async fn update_address(
        &self,
        address_id: Uuid,
        patch: AddressPatch,
    ) -> StoreResult<Option<Address>> {
        let mut inner = self.inner.write().await;
        let Some(address) = inner.addresses.get_mut(&address_id) else {
            return Ok(None);
        };

        patch.apply(address);
        Ok(Some(address.clone()))
    }

    async fn delete_address(&self, address_id: Uuid) -> StoreResult<bool> {
        Ok(self
            .inner
            .write()
            .await
            .addresses
            .remove(&address_id)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str) -> CreateAddress {
        CreateAddress {
            full_name: name.to_string(),
            mobile_number: "9876543210".to_string(),
            pincode: "411001".to_string(),
            flat_no: "12B".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            street: "FC Road".to_string(),
            landmark: Some("Near the park".to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_preserves_attachment_order() {
        let store = MemoryStore::new();
        let user = store.insert_user(CreateUser::default()).await;

        let first = store
            .create_address_for_user(user.id, create_input("First"))
            .await
            .unwrap()
            .unwrap();
        let second = store
            .create_address_for_user(user.id, create_input("Second"))
            .await
            .unwrap()
            .unwrap();

        let listed = store.list_user_addresses(user.id).await.unwrap().unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();

        assert!(store.list_user_addresses(missing).await.unwrap().is_none());
        assert!(store
            .create_address_for_user(missing, create_input("Nobody"))
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.address_count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_leaves_dangling_reference() {
        let store = MemoryStore::new();
        let user = store.insert_user(CreateUser::default()).await;
        let address = store
            .create_address_for_user(user.id, create_input("Gone"))
            .await
            .unwrap()
            .unwrap();

        assert!(store.delete_address(address.id).await.unwrap());
        assert!(!store.delete_address(address.id).await.unwrap());

        assert_eq!(store.address_refs(user.id).await.unwrap(), vec![address.id]);
        assert!(store
            .list_user_addresses(user.id)
            .await
            .unwrap()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_address() {
        let store = MemoryStore::new();
        let updated = store
            .update_address(Uuid::new_v4(), AddressPatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
