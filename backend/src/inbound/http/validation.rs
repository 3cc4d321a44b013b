//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Builds the error returned when a required JSON field is absent.
///
/// `field` uses the wire casing so the caller can paste it back into the
/// request body verbatim.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_input(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}
