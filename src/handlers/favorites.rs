// Favorites endpoints: POST/DELETE /users/:id/favorites/players and
// /users/:id/favorites/teams. Guard first, then ownership, then presence of
// the entity id, then the favorites manager; the manager fixes the rest of
// the error precedence.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::guard::{authenticate, check_ownership};
use crate::error::ApiError;
use crate::handlers::dto::MessageResponse;
use crate::response::{ApiResponse, ApiResult};
use crate::services::favorite_service::FavoriteService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FavoritePlayerRequest {
    #[serde(rename = "playerId")]
    pub player_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteTeamRequest {
    #[serde(rename = "teamId")]
    pub team_id: Option<Uuid>,
}

/// POST /users/:id/favorites/players
pub async fn add_favorite_player(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<FavoritePlayerRequest>,
) -> ApiResult<MessageResponse> {
    let user = authenticate(&state, &headers).await?;
    check_ownership(&user, user_id)?;

    let player_id = payload
        .player_id
        .ok_or_else(|| ApiError::bad_request("Player ID is required"))?;

    FavoriteService::new(state.pool.clone())
        .add_favorite_player(user_id, player_id)
        .await?;

    Ok(ApiResponse::created(MessageResponse::new(
        "Player added to favorites",
    )))
}

/// DELETE /users/:id/favorites/players
pub async fn remove_favorite_player(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<FavoritePlayerRequest>,
) -> ApiResult<MessageResponse> {
    let user = authenticate(&state, &headers).await?;
    check_ownership(&user, user_id)?;

    let player_id = payload
        .player_id
        .ok_or_else(|| ApiError::bad_request("Player ID is required"))?;

    FavoriteService::new(state.pool.clone())
        .remove_favorite_player(user_id, player_id)
        .await?;

    Ok(ApiResponse::success(MessageResponse::new(
        "Player removed from favorites",
    )))
}

/// POST /users/:id/favorites/teams
pub async fn add_favorite_team(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<FavoriteTeamRequest>,
) -> ApiResult<MessageResponse> {
    let user = authenticate(&state, &headers).await?;
    check_ownership(&user, user_id)?;

    let team_id = payload
        .team_id
        .ok_or_else(|| ApiError::bad_request("Team ID is required"))?;

    FavoriteService::new(state.pool.clone())
        .add_favorite_team(user_id, team_id)
        .await?;

    Ok(ApiResponse::created(MessageResponse::new(
        "Team added to favorites",
    )))
}

/// DELETE /users/:id/favorites/teams
pub async fn remove_favorite_team(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<FavoriteTeamRequest>,
) -> ApiResult<MessageResponse> {
    let user = authenticate(&state, &headers).await?;
    check_ownership(&user, user_id)?;

    let team_id = payload
        .team_id
        .ok_or_else(|| ApiError::bad_request("Team ID is required"))?;

    FavoriteService::new(state.pool.clone())
        .remove_favorite_team(user_id, team_id)
        .await?;

    Ok(ApiResponse::success(MessageResponse::new(
        "Team removed from favorites",
    )))
}
