/// Datastore key parsing
///
/// Every record is keyed by a UUID. Identifiers arrive from the outside world
/// as strings (query parameters, path segments, JSON bodies) and must be
/// checked for the right shape before any lookup is attempted.
///
/// # Example
///
/// ```
/// use addressbook_shared::ids::{parse_record_id, RecordKind};
///
/// let id = parse_record_id(RecordKind::Address, "550e8400-e29b-41d4-a716-446655440000");
/// assert!(id.is_ok());
///
/// let err = parse_record_id(RecordKind::User, "bad-id").unwrap_err();
/// assert_eq!(err.to_string(), "Invalid user id");
/// ```

use std::fmt;
use uuid::Uuid;

/// The kind of record an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    User,
    Address,
}

impl RecordKind {
    /// Message reported for a malformed or unknown identifier of this kind
    pub fn invalid_id_message(self) -> &'static str {
        match self {
            RecordKind::User => "Invalid user id",
            RecordKind::Address => "Invalid address id",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::User => write!(f, "user"),
            RecordKind::Address => write!(f, "address"),
        }
    }
}

/// Identifier that is not a syntactically valid datastore key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} id")]
pub struct IdError {
    /// Which identifier was malformed
    pub kind: RecordKind,
}

/// Parses a raw identifier into a datastore key
///
/// Only the canonical hyphenated UUID form is accepted. Braced, URN and
/// simple (no hyphens) forms are rejected so that every key has exactly one
/// spelling on the wire.
///
/// # Errors
///
/// Returns [`IdError`] naming `kind` if `raw` is not a valid key.
pub fn parse_record_id(kind: RecordKind, raw: &str) -> Result<Uuid, IdError> {
    if raw.len() != 36 {
        return Err(IdError { kind });
    }

    Uuid::try_parse(raw).map_err(|_| IdError { kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = Uuid::new_v4();
        let parsed = parse_record_id(RecordKind::Address, &id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_uppercase_id() {
        let id = Uuid::new_v4();
        let upper = id.to_string().to_uppercase();
        assert_eq!(parse_record_id(RecordKind::User, &upper).unwrap(), id);
    }

    #[test]
    fn test_reject_malformed_ids() {
        let simple = Uuid::new_v4().simple().to_string();
        for raw in ["", "bad-id", "507f1f77bcf86cd799439011", simple.as_str()] {
            let err = parse_record_id(RecordKind::User, raw).unwrap_err();
            assert_eq!(err.kind, RecordKind::User);
        }
    }

    #[test]
    fn test_error_message_names_kind() {
        let err = parse_record_id(RecordKind::User, "nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid user id");

        let err = parse_record_id(RecordKind::Address, "nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid address id");
    }
}
