/// Address model and database operations
///
/// Addresses are standalone records. The link from a user to its addresses
/// lives only on the user side (see [`crate::models::user::User::attach_address`]),
/// so an address row carries no owner column.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE addresses (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     full_name VARCHAR(255) NOT NULL,
///     mobile_number VARCHAR(32) NOT NULL,
///     pincode VARCHAR(16) NOT NULL,
///     flat_no VARCHAR(255) NOT NULL,
///     city VARCHAR(255) NOT NULL,
///     state VARCHAR(255) NOT NULL,
///     street VARCHAR(255) NOT NULL,
///     landmark VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use addressbook_shared::models::address::{Address, AddressPatch};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, id: Uuid) -> Result<(), sqlx::Error> {
/// let patch = AddressPatch {
///     city: Some("Pune".to_string()),
///     ..Default::default()
/// };
///
/// if let Some(address) = Address::update(&pool, id, patch).await? {
///     println!("Now in {}", address.city);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgExecutor, PgPool};
use uuid::Uuid;

const ADDRESS_COLUMNS: &str = "id, full_name, mobile_number, pincode, flat_no, city, state, \
                               street, landmark, created_at, updated_at";

/// A postal address
///
/// Serialized with the camelCase field names existing clients expect, and
/// the key exposed as `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Unique address ID
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Name of the recipient
    pub full_name: String,

    /// Contact number for deliveries
    pub mobile_number: String,

    /// Postal code
    pub pincode: String,

    /// Flat, house or unit number
    pub flat_no: String,

    pub city: String,

    /// State or region
    pub state: String,

    pub street: String,

    /// Free-form landmark hint
    pub landmark: Option<String>,

    /// When the address was created
    pub created_at: DateTime<Utc>,

    /// When the address was last edited
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAddress {
    pub full_name: String,
    pub mobile_number: String,
    pub pincode: String,
    pub flat_no: String,
    pub city: String,
    pub state: String,
    pub street: String,
    pub landmark: Option<String>,
}

/// Field-level edit of an existing address
///
/// `None` leaves the stored value alone. `Some(value)` replaces it, even when
/// `value` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPatch {
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub pincode: Option<String>,
    pub flat_no: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
    pub landmark: Option<String>,
}

impl Address {
    /// Builds a fresh address record from creation input
    ///
    /// Used by stores that assign keys themselves rather than in SQL.
    pub fn new(data: CreateAddress) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name: data.full_name,
            mobile_number: data.mobile_number,
            pincode: data.pincode,
            flat_no: data.flat_no,
            city: data.city,
            state: data.state,
            street: data.street,
            landmark: data.landmark,
            created_at: now,
            updated_at: now,
        }
    }

    /// Inserts a new address
    ///
    /// Accepts any Postgres executor so the insert can join a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or a column constraint is violated.
    pub async fn create<'e, E>(executor: E, data: CreateAddress) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            r#"
            INSERT INTO addresses (full_name, mobile_number, pincode, flat_no, city, state, street, landmark)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ADDRESS_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Address>(&query)
            .bind(data.full_name)
            .bind(data.mobile_number)
            .bind(data.pincode)
            .bind(data.flat_no)
            .bind(data.city)
            .bind(data.state)
            .bind(data.street)
            .bind(data.landmark)
            .fetch_one(executor)
            .await
    }

    /// Finds an address by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1");

        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lists the addresses a user references, in the order they were attached
    ///
    /// References whose address has since been deleted are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Address>(
            r#"
            SELECT a.id, a.full_name, a.mobile_number, a.pincode, a.flat_no, a.city, a.state,
                   a.street, a.landmark, a.created_at, a.updated_at
            FROM user_addresses ua
            JOIN addresses a ON a.id = ua.address_id
            WHERE ua.user_id = $1
            ORDER BY ua.position ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Applies a patch to an existing address
    ///
    /// Absent fields bind as NULL and fall back to the stored column through
    /// `COALESCE`. `updated_at` is always bumped.
    ///
    /// # Returns
    ///
    /// The updated address, or None if no address has this ID
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: AddressPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE addresses SET
                full_name = COALESCE($2, full_name),
                mobile_number = COALESCE($3, mobile_number),
                pincode = COALESCE($4, pincode),
                flat_no = COALESCE($5, flat_no),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                street = COALESCE($8, street),
                landmark = COALESCE($9, landmark),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .bind(patch.full_name)
            .bind(patch.mobile_number)
            .bind(patch.pincode)
            .bind(patch.flat_no)
            .bind(patch.city)
            .bind(patch.state)
            .bind(patch.street)
            .bind(patch.landmark)
            .fetch_optional(pool)
            .await
    }

    /// Deletes an address by ID
    ///
    /// References to the address held by users are left in place.
    ///
    /// # Returns
    ///
    /// True if the address was deleted, false if it didn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl AddressPatch {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.mobile_number.is_none()
            && self.pincode.is_none()
            && self.flat_no.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.street.is_none()
            && self.landmark.is_none()
    }

    /// Merges present fields into `address` and bumps `updated_at`
    pub fn apply(self, address: &mut Address) {
        fn merge(slot: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        merge(&mut address.full_name, self.full_name);
        merge(&mut address.mobile_number, self.mobile_number);
        merge(&mut address.pincode, self.pincode);
        merge(&mut address.flat_no, self.flat_no);
        merge(&mut address.city, self.city);
        merge(&mut address.state, self.state);
        merge(&mut address.street, self.street);
        if let Some(landmark) = self.landmark {
            address.landmark = Some(landmark);
        }

        address.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        Address::new(CreateAddress {
            full_name: "Asha Rao".to_string(),
            mobile_number: "9876543210".to_string(),
            pincode: "411001".to_string(),
            flat_no: "12B".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            street: "FC Road".to_string(),
            landmark: None,
        })
    }

    #[test]
    fn test_serializes_with_client_field_names() {
        let address = sample();
        let json = serde_json::to_value(&address).unwrap();

        assert_eq!(json["_id"], address.id.to_string());
        assert_eq!(json["fullName"], "Asha Rao");
        assert_eq!(json["mobileNumber"], "9876543210");
        assert_eq!(json["flatNo"], "12B");
        assert_eq!(json["pincode"], "411001");
        assert!(json["landmark"].is_null());
        assert!(json.get("full_name").is_none());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut address = sample();
        let before = address.clone();

        AddressPatch {
            city: Some("Mumbai".to_string()),
            ..Default::default()
        }
        .apply(&mut address);

        assert_eq!(address.city, "Mumbai");
        assert_eq!(address.full_name, before.full_name);
        assert_eq!(address.pincode, before.pincode);
        assert_eq!(address.street, before.street);
        assert_eq!(address.landmark, before.landmark);
    }

    #[test]
    fn test_patch_applies_empty_values() {
        let mut address = sample();

        AddressPatch {
            pincode: Some(String::new()),
            landmark: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut address);

        assert_eq!(address.pincode, "");
        assert_eq!(address.landmark.as_deref(), Some(""));
    }

    #[test]
    fn test_empty_patch() {
        assert!(AddressPatch::default().is_empty());

        let patch = AddressPatch {
            street: Some("MG Road".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
