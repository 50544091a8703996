/// Database models for the address book
///
/// # Models
///
/// - `user`: Users and their ordered address references
/// - `address`: Address records, creation input and field-level patches
///
/// # Example
///
/// ```no_run
/// use addressbook_shared::models::address::{Address, CreateAddress};
/// use addressbook_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let address = Address::create(
///     &pool,
///     CreateAddress {
///         full_name: "Asha Rao".to_string(),
///         mobile_number: "9876543210".to_string(),
///         pincode: "411001".to_string(),
///         flat_no: "12B".to_string(),
///         city: "Pune".to_string(),
///         state: "Maharashtra".to_string(),
///         street: "FC Road".to_string(),
///         landmark: None,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod address;
pub mod user;
