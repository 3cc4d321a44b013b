//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        // The original panel reported business-rule rejections as plain 400s;
        // clients rely on the body's error code for the distinction.
        ErrorCode::InvalidInput
        | ErrorCode::InvalidAmount
        | ErrorCode::InsufficientFunds
        | ErrorCode::FreeLimitExceeded => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound | ErrorCode::NotFoundOrForbidden => StatusCode::NOT_FOUND,
        ErrorCode::AllocationExhausted | ErrorCode::ServiceUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        // Do not leak store-level details to clients.
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_input("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::invalid_amount("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::insufficient_funds("broke"), StatusCode::BAD_REQUEST)]
    #[case(Error::free_limit_exceeded("taken"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::not_found_or_forbidden("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::allocation_exhausted("full"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn domain_errors_map_to_expected_status_codes(
        #[case] error: Error,
        #[case] expected: StatusCode,
    ) {
        assert_eq!(error.status_code(), expected);
    }

    #[rstest]
    fn internal_messages_are_redacted() {
        let redacted = redact_if_internal(&Error::internal("connection string leaked"));
        assert_eq!(redacted.message(), "Internal server error");
    }

    #[rstest]
    fn business_messages_pass_through() {
        let error = Error::insufficient_funds("balance does not cover the server fee");
        assert_eq!(
            redact_if_internal(&error).message(),
            "balance does not cover the server fee"
        );
    }
}
