// Profile endpoints: GET/PUT/DELETE /users/:id. All are gated by the auth
// guard plus the route-level ownership check.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::guard::{authenticate, check_ownership};
use crate::handlers::dto::{MessageResponse, PlayerView, TeamView};
use crate::response::{ApiResponse, ApiResult};
use crate::services::catalog_service::CatalogService;
use crate::services::favorite_service::FavoriteService;
use crate::services::user_service::UserService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub username: String,
    pub email: String,
    pub favorite_players: Vec<PlayerView>,
    pub favorite_teams: Vec<TeamView>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
}

/// GET /users/:id - profile with curated favorites
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<UserProfileResponse> {
    let user = authenticate(&state, &headers).await?;
    check_ownership(&user, id)?;

    let favorites = FavoriteService::new(state.pool.clone());
    let players = favorites.list_favorite_players(user.id).await?;
    let teams = favorites.list_favorite_teams(user.id).await?;

    let catalog = CatalogService::new(state.pool.clone());
    let mut favorite_teams = Vec::with_capacity(teams.len());
    for team in &teams {
        let roster = catalog.team_roster(team.id).await?;
        favorite_teams.push(TeamView::from_model(team, &roster));
    }

    Ok(ApiResponse::success(UserProfileResponse {
        username: user.username,
        email: user.email,
        favorite_players: players.iter().map(PlayerView::from_model).collect(),
        favorite_teams,
    }))
}

/// PUT /users/:id - profile update; only email is supported
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<MessageResponse> {
    let user = authenticate(&state, &headers).await?;
    check_ownership(&user, id)?;

    UserService::new(state.pool.clone())
        .update_email(user.id, payload.email.as_deref())
        .await?;

    Ok(ApiResponse::success(MessageResponse::new(
        "Profile updated successfully",
    )))
}

/// DELETE /users/:id - account deletion; favorite relations cascade
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<MessageResponse> {
    let user = authenticate(&state, &headers).await?;
    check_ownership(&user, id)?;

    UserService::new(state.pool.clone()).delete(user.id).await?;

    Ok(ApiResponse::success(MessageResponse::new(
        "User deleted successfully",
    )))
}
