use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

/// Fallback identity for unauthenticated callers, mirroring the demo user
/// the web frontend assumes when no session is present.
pub const DEMO_USER_ID: i64 = 1;

/// Caller identity resolved from the `x-user-id` header or the `userId`
/// cookie. Session issuance itself lives outside this service.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UserId(pub i64);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
        {
            return Ok(UserId(id));
        }

        if let Some(cookies) = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
        {
            for pair in cookies.split(';') {
                if let Some(("userId", value)) = pair.trim().split_once('=') {
                    if let Ok(id) = value.parse::<i64>() {
                        return Ok(UserId(id));
                    }
                }
            }
        }

        Ok(UserId(DEMO_USER_ID))
    }
}
