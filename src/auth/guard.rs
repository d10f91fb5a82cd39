use axum::http::HeaderMap;
use uuid::Uuid;

use crate::auth::{verify_token, TokenError};
use crate::database::models::User;
use crate::error::ApiError;
use crate::services::user_service::UserService;
use crate::state::AppState;

/// Extract the bearer credential from the Authorization header.
/// The token is the second whitespace-separated segment of the value; the
/// scheme word itself is not validated.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("Authorization")?.to_str().ok()?;
    value.split_whitespace().nth(1)
}

/// Authentication gate for routes requiring identity. Invoked first in each
/// protected handler, returning early on failure; there is no implicit
/// middleware wrapping. Store faults are caught here and surfaced as 500s
/// so the gate never propagates an unhandled fault to the transport layer.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token =
        extract_token(headers).ok_or_else(|| ApiError::unauthorized("Token is missing!"))?;

    let user_id =
        verify_token(token, &state.config.security.jwt_secret).map_err(|e| match e {
            TokenError::Expired => ApiError::unauthorized("Token has expired"),
            _ => ApiError::unauthorized("Token is invalid"),
        })?;

    let user = UserService::new(state.pool.clone())
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            tracing::error!("Auth guard failed to resolve user {}: {}", user_id, e);
            ApiError::internal_server_error(e.to_string())
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(user)
}

/// Route-level ownership check: the authenticated identity must match the
/// user id named in the path. Not part of the guard; repeated per route.
pub fn check_ownership(user: &User, path_user_id: Uuid) -> Result<(), ApiError> {
    if user.id != path_user_id {
        return Err(ApiError::forbidden("Unauthorized access"));
    }
    Ok(())
}
