//! Request payload validation helpers shared by HTTP handlers.

use serde_json::json;

use crate::domain::Error;

/// Error for a required field absent from the request payload.
pub fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Unwrap a required payload field or fail with [`missing_field_error`].
pub fn require_field<T>(value: Option<T>, field: &str) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}
