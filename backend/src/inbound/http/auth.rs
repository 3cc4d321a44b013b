//! Trusted-identity extraction for HTTP handlers.
//!
//! Authentication happens upstream; the gateway forwards the verified user
//! identifier in the `X-User-Id` header. This extractor only checks that the
//! header is present and well formed; a request without it is
//! `Unauthorized`, never anonymous.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::{Error, UserId};

/// Header carrying the gateway-verified user identifier.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The verified identity of the requesting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized("no user identity supplied"))?;

    UserId::parse(raw)
        .map(AuthenticatedUser)
        .map_err(|_| Error::unauthorized("malformed user identity"))
}
