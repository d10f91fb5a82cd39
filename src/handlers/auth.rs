// Account endpoints: POST /register, POST /login.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::issue_token;
use crate::error::ApiError;
use crate::handlers::dto::MessageResponse;
use crate::response::{ApiResponse, ApiResult};
use crate::services::user_service::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub token: String,
}

/// POST /register - create an account with a hashed password
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<MessageResponse> {
    let username = payload.username.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    UserService::new(state.pool.clone())
        .register(&username, &email, &password)
        .await?;

    Ok(ApiResponse::created(MessageResponse::new(
        "User registered successfully",
    )))
}

/// POST /login - HTTP Basic credentials in, bearer token out
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<LoginResponse> {
    let (username, password) = basic_credentials(&headers)
        .ok_or_else(|| ApiError::bad_request("Missing username or password"))?;

    let user = UserService::new(state.pool.clone())
        .authenticate(&username, &password)
        .await?;

    let token = issue_token(
        user.id,
        &state.config.security.jwt_secret,
        state.config.security.jwt_expiry_hours,
    )
    .map_err(|e| {
        tracing::error!("Token issuance failed for user {}: {}", user.id, e);
        ApiError::internal_server_error(e.to_string())
    })?;

    Ok(ApiResponse::success(LoginResponse {
        user_id: user.id,
        token,
    }))
}

/// Decode `Authorization: Basic <base64(user:pass)>`. Any missing or empty
/// part reads as missing credentials.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get("Authorization")?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_basic(user: &str, pass: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let encoded = BASE64.encode(format!("{}:{}", user, pass));
        headers.insert(
            "Authorization",
            format!("Basic {}", encoded).parse().unwrap(),
        );
        headers
    }

    #[test]
    fn decodes_basic_credentials() {
        let headers = headers_with_basic("fan", "hunter2");
        assert_eq!(
            basic_credentials(&headers),
            Some(("fan".to_string(), "hunter2".to_string()))
        );
    }

    #[test]
    fn password_may_contain_colons() {
        let headers = headers_with_basic("fan", "a:b:c");
        assert_eq!(
            basic_credentials(&headers),
            Some(("fan".to_string(), "a:b:c".to_string()))
        );
    }

    #[test]
    fn missing_or_partial_credentials_read_as_none() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
        assert_eq!(basic_credentials(&headers_with_basic("", "pw")), None);
        assert_eq!(basic_credentials(&headers_with_basic("fan", "")), None);

        let mut bearer = HeaderMap::new();
        bearer.insert("Authorization", "Bearer abc".parse().unwrap());
        assert_eq!(basic_credentials(&bearer), None);
    }
}
