//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope; the domain only decides
//! the failure category and the human-readable message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required field is missing, empty, or malformed.
    InvalidInput,
    /// A monetary amount is zero or negative.
    InvalidAmount,
    /// No trusted user identity was supplied with the request.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// The server either does not exist or belongs to another user; the
    /// store's compound ownership predicate deliberately does not distinguish
    /// the two cases.
    NotFoundOrForbidden,
    /// The user's balance does not cover the requested charge.
    InsufficientFunds,
    /// The user already holds their one free server.
    FreeLimitExceeded,
    /// Repeated identity collisions exhausted the bounded retry budget.
    AllocationExhausted,
    /// The persistent store could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload carried from services to adapters.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "insufficient_funds")]
    code: ErrorCode,
    #[schema(example = "balance does not cover the server fee")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    /// Panics when `message` is empty after trimming. All call sites pass
    /// literal messages, so this is a programming error, not a runtime one.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(
            !message.trim().is_empty(),
            "error messages must not be empty"
        );
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidAmount`].
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAmount, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFoundOrForbidden`].
    pub fn not_found_or_forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFoundOrForbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::InsufficientFunds`].
    pub fn insufficient_funds(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientFunds, message)
    }

    /// Convenience constructor for [`ErrorCode::FreeLimitExceeded`].
    pub fn free_limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FreeLimitExceeded, message)
    }

    /// Convenience constructor for [`ErrorCode::AllocationExhausted`].
    pub fn allocation_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AllocationExhausted, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn constructors_set_the_expected_code() {
        assert_eq!(Error::invalid_input("x").code(), ErrorCode::InvalidInput);
        assert_eq!(Error::invalid_amount("x").code(), ErrorCode::InvalidAmount);
        assert_eq!(
            Error::insufficient_funds("x").code(),
            ErrorCode::InsufficientFunds
        );
        assert_eq!(
            Error::free_limit_exceeded("x").code(),
            ErrorCode::FreeLimitExceeded
        );
        assert_eq!(
            Error::not_found_or_forbidden("x").code(),
            ErrorCode::NotFoundOrForbidden
        );
        assert_eq!(
            Error::allocation_exhausted("x").code(),
            ErrorCode::AllocationExhausted
        );
    }

    #[rstest]
    fn details_round_trip_through_serialisation() {
        let error = Error::invalid_input("name must not be empty")
            .with_details(json!({ "field": "name" }));

        let value = serde_json::to_value(&error).expect("serialise");
        assert_eq!(value["code"], "invalid_input");
        assert_eq!(value["details"]["field"], "name");
    }

    #[rstest]
    fn error_codes_serialise_as_snake_case() {
        let value = serde_json::to_value(ErrorCode::NotFoundOrForbidden).expect("serialise");
        assert_eq!(value, "not_found_or_forbidden");
    }

    #[test]
    #[should_panic(expected = "error messages must not be empty")]
    fn empty_messages_are_rejected() {
        let _ = Error::internal("   ");
    }
}
