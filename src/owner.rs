use crate::errors::AppError;
use crate::state::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};

pub const OWNER_HEADER: &str = "x-owner-id";

/// Identity of the caller, taken from the `x-owner-id` header or the
/// configured default owner when the header is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub u64);

#[axum::async_trait]
impl FromRequestParts<AppState> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(OWNER_HEADER)
            .map(|value| value.to_str().unwrap_or_default());
        parse_owner(header, state.default_owner)
    }
}

fn parse_owner(header: Option<&str>, default_owner: u64) -> Result<Owner, AppError> {
    match header {
        None => Ok(Owner(default_owner)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Owner)
            .ok_or_else(|| AppError::bad_request(format!("{OWNER_HEADER} must be a positive integer"))),
    }
}
