/// Address endpoints
///
/// CRUD over a user's addresses. Every handler follows the same preamble:
///
/// 1. Run the declared validation rules. Failures answer `400 { errors }`.
/// 2. Check identifier format. A malformed key answers
///    `400 { message: "Invalid user id" | "Invalid address id" }` without
///    touching the datastore.
///
/// An unknown user or address answers with the same message, as 400 unless
/// strict not-found mode is enabled (then 404).
///
/// # Endpoints
///
/// - `GET /api/addresses?user_id=` - List a user's addresses
/// - `POST /api/addresses` - Create an address and attach it to a user
/// - `GET /api/addresses/:address_id` - Fetch one address
/// - `PUT /api/addresses/:address_id` - Edit fields of an address
/// - `DELETE /api/addresses/:address_id` - Delete an address

use crate::{
    app::AppState,
    error::{ApiResult, MessageResponse, RequestLocation},
    validation::validate_request,
};
use addressbook_shared::{
    ids::{parse_record_id, RecordKind},
    models::address::{Address, AddressPatch, CreateAddress},
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

/// Query string of the list endpoint
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListAddressesQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

/// Create address request
///
/// Missing fields deserialize as empty strings so they are reported by the
/// validation rules alongside any other failures.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAddressRequest {
    /// Owning user
    #[serde(rename = "user_id")]
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    #[validate(length(min = 1, max = 255, message = "Full name is required (max 255 characters)"))]
    pub full_name: String,

    #[validate(length(min = 7, max = 15, message = "Mobile number must be 7-15 characters"))]
    pub mobile_number: String,

    #[validate(length(min = 3, max = 10, message = "Pincode must be 3-10 characters"))]
    pub pincode: String,

    #[validate(length(min = 1, max = 255, message = "Flat number is required (max 255 characters)"))]
    pub flat_no: String,

    #[validate(length(min = 1, max = 255, message = "City is required (max 255 characters)"))]
    pub city: String,

    #[validate(length(min = 1, max = 255, message = "State is required (max 255 characters)"))]
    pub state: String,

    #[validate(length(min = 1, max = 255, message = "Street is required (max 255 characters)"))]
    pub street: String,

    #[validate(length(max = 255, message = "Landmark must be at most 255 characters"))]
    pub landmark: Option<String>,
}

/// Edit address request
///
/// Each field is optional. A present field is held to the same rules as on
/// create, so an edit cannot store a record create would reject. An empty
/// `landmark` is applied. An absent or `null` field keeps the stored value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditAddressRequest {
    #[validate(length(min = 1, max = 255, message = "Full name is required (max 255 characters)"))]
    pub full_name: Option<String>,

    #[validate(length(min = 7, max = 15, message = "Mobile number must be 7-15 characters"))]
    pub mobile_number: Option<String>,

    #[validate(length(min = 3, max = 10, message = "Pincode must be 3-10 characters"))]
    pub pincode: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Flat number is required (max 255 characters)"))]
    pub flat_no: Option<String>,

    #[validate(length(min = 1, max = 255, message = "City is required (max 255 characters)"))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 255, message = "State is required (max 255 characters)"))]
    pub state: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Street is required (max 255 characters)"))]
    pub street: Option<String>,

    #[validate(length(max = 255, message = "Landmark must be at most 255 characters"))]
    pub landmark: Option<String>,
}

impl EditAddressRequest {
    /// Reads the request body
    ///
    /// A missing or blank body means no fields. Anything else must be a JSON
    /// object.
    pub fn from_body(body: &[u8]) -> Result<Self, JsonRejection> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let Json(req) = Json::from_bytes(body)?;
        Ok(req)
    }
}

/// List addresses response
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressListResponse {
    /// Addresses in the order they were attached, never null
    pub addresses: Vec<Address>,
}

/// Single address response
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: Address,
}

impl From<CreateAddressRequest> for CreateAddress {
    fn from(req: CreateAddressRequest) -> Self {
        CreateAddress {
            full_name: req.full_name,
            mobile_number: req.mobile_number,
            pincode: req.pincode,
            flat_no: req.flat_no,
            city: req.city,
            state: req.state,
            street: req.street,
            landmark: req.landmark,
        }
    }
}

impl From<EditAddressRequest> for AddressPatch {
    fn from(req: EditAddressRequest) -> Self {
        AddressPatch {
            full_name: req.full_name,
            mobile_number: req.mobile_number,
            pincode: req.pincode,
            flat_no: req.flat_no,
            city: req.city,
            state: req.state,
            street: req.street,
            landmark: req.landmark,
        }
    }
}

/// List a user's addresses
///
/// # Endpoint
///
/// ```text
/// GET /api/addresses?user_id=<uuid>
/// ```
///
/// # Response
///
/// ```json
/// { "addresses": [ { "_id": "uuid", "fullName": "...", ... } ] }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, malformed or unknown user id
/// - `500 Internal Server Error`: Datastore failure
pub async fn list_addresses(
    State(state): State<AppState>,
    query: Result<Query<ListAddressesQuery>, QueryRejection>,
) -> ApiResult<Json<AddressListResponse>> {
    let Query(query) = query?;
    validate_request(&query, RequestLocation::Query)?;

    let user_id = parse_record_id(RecordKind::User, &query.user_id)?;

    let Some(addresses) = state.store.list_user_addresses(user_id).await? else {
        debug!(user_id = %user_id, "List requested for unknown user");
        return Err(state.record_missing(RecordKind::User));
    };

    Ok(Json(AddressListResponse { addresses }))
}

/// Create an address and attach it to a user
///
/// # Endpoint
///
/// ```text
/// POST /api/addresses
/// Content-Type: application/json
///
/// {
///   "user_id": "uuid",
///   "fullName": "Asha Rao",
///   "mobileNumber": "9876543210",
///   "pincode": "411001",
///   "flatNo": "12B",
///   "city": "Pune",
///   "state": "Maharashtra",
///   "street": "FC Road",
///   "landmark": "Near the park"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "address": { ... } }`
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, malformed or unknown user id
/// - `500 Internal Server Error`: Datastore failure
pub async fn create_address(
    State(state): State<AppState>,
    body: Result<Json<CreateAddressRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AddressResponse>)> {
    let Json(req) = body?;
    validate_request(&req, RequestLocation::Body)?;

    let user_id = parse_record_id(RecordKind::User, &req.user_id)?;

    let Some(address) = state
        .store
        .create_address_for_user(user_id, req.into())
        .await?
    else {
        debug!(user_id = %user_id, "Create requested for unknown user");
        return Err(state.record_missing(RecordKind::User));
    };

    info!(user_id = %user_id, address_id = %address.id, "Address created");
    Ok((StatusCode::CREATED, Json(AddressResponse { address })))
}

/// Fetch one address
///
/// # Endpoint
///
/// ```text
/// GET /api/addresses/:address_id
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed or unknown address id
/// - `500 Internal Server Error`: Datastore failure
pub async fn get_address(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<AddressResponse>> {
    let Path(raw_id) = path?;
    let address_id = parse_record_id(RecordKind::Address, &raw_id)?;

    let address = state
        .store
        .find_address(address_id)
        .await?
        .ok_or_else(|| state.record_missing(RecordKind::Address))?;

    Ok(Json(AddressResponse { address }))
}

/// Edit fields of an address
///
/// Only fields present in the body change. `{}` or no body at all returns
/// the address as is.
///
/// # Endpoint
///
/// ```text
/// PUT /api/addresses/:address_id
/// Content-Type: application/json
///
/// { "city": "Mumbai" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, malformed or unknown address id
/// - `500 Internal Server Error`: Datastore failure
pub async fn edit_address(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<AddressResponse>> {
    let req = EditAddressRequest::from_body(&body)?;
    validate_request(&req, RequestLocation::Body)?;

    let Path(raw_id) = path?;
    let address_id = parse_record_id(RecordKind::Address, &raw_id)?;

    let patch = AddressPatch::from(req);
    let empty = patch.is_empty();

    let address = state
        .store
        .update_address(address_id, patch)
        .await?
        .ok_or_else(|| state.record_missing(RecordKind::Address))?;

    info!(address_id = %address_id, empty_patch = empty, "Address edited");
    Ok(Json(AddressResponse { address }))
}

/// Delete an address
///
/// The owning user's reference list is not modified.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/addresses/:address_id
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Address deleted successfully" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed or unknown address id
/// - `500 Internal Server Error`: Datastore failure
pub async fn delete_address(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(raw_id) = path?;
    let address_id = parse_record_id(RecordKind::Address, &raw_id)?;

    if !state.store.delete_address(address_id).await? {
        return Err(state.record_missing(RecordKind::Address));
    }

    info!(address_id = %address_id, "Address deleted");
    Ok(Json(MessageResponse::new("Address deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_reads_client_field_names() {
        let req: CreateAddressRequest = serde_json::from_value(serde_json::json!({
            "user_id": "abc",
            "fullName": "Asha Rao",
            "mobileNumber": "9876543210",
            "pincode": "411001",
            "flatNo": "12B",
            "city": "Pune",
            "state": "Maharashtra",
            "street": "FC Road"
        }))
        .unwrap();

        assert_eq!(req.user_id, "abc");
        assert_eq!(req.flat_no, "12B");
        assert!(req.landmark.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_missing_fields_fail_validation() {
        let req: CreateAddressRequest =
            serde_json::from_value(serde_json::json!({ "user_id": "abc" })).unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 7);
        assert!(!fields.contains_key("user_id"));
    }

    #[test]
    fn test_edit_request_distinguishes_absent_and_empty() {
        let req: EditAddressRequest =
            serde_json::from_value(serde_json::json!({ "pincode": "", "city": null })).unwrap();
        let patch = AddressPatch::from(req);

        assert_eq!(patch.pincode.as_deref(), Some(""));
        assert!(patch.city.is_none());
        assert!(patch.full_name.is_none());
    }

    #[test]
    fn test_edit_request_from_missing_or_blank_body() {
        for body in [&b""[..], b"  \n"] {
            let req = EditAddressRequest::from_body(body).unwrap();
            assert!(AddressPatch::from(req).is_empty());
        }

        let req = EditAddressRequest::from_body(br#"{ "city": "Mumbai" }"#).unwrap();
        assert_eq!(req.city.as_deref(), Some("Mumbai"));

        assert!(EditAddressRequest::from_body(b"{ not json").is_err());
    }

    #[test]
    fn test_edit_request_uses_create_bounds() {
        let req = EditAddressRequest {
            mobile_number: Some("1".to_string()),
            pincode: Some(String::new()),
            landmark: Some(String::new()),
            ..Default::default()
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("mobile_number"));
        assert!(fields.contains_key("pincode"));
        assert!(!fields.contains_key("landmark"));
    }
}
