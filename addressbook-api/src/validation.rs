/// Request validation preamble
///
/// Request types declare their rules with `validator` derive attributes.
/// [`validate_request`] runs them and turns any failures into
/// [`ApiError::ValidationError`], sorted by field so the response is stable.

use crate::error::{ApiError, ApiResult, RequestLocation, ValidationErrorDetail};
use validator::{Validate, ValidationErrors};

/// Runs the declared rules of `input`
///
/// # Errors
///
/// Returns `ApiError::ValidationError` listing every failed rule.
pub fn validate_request<T: Validate>(input: &T, location: RequestLocation) -> ApiResult<()> {
    input
        .validate()
        .map_err(|errors| ApiError::ValidationError(collect_details(&errors, location)))
}

fn collect_details(errors: &ValidationErrors, location: RequestLocation) -> Vec<ValidationErrorDetail> {
    let mut details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            let field = wire_name(field);
            errors.iter().map(move |error| ValidationErrorDetail {
                location,
                field: field.clone(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Name of a field as clients spell it
///
/// Identifier fields (`user_id`) stay snake_case, address fields are
/// camelCase (`full_name` -> `fullName`).
fn wire_name(field: &str) -> String {
    if field.starts_with('_') || field.ends_with("_id") {
        return field.to_string();
    }

    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
