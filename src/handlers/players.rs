// Player directory: GET /players/:id, GET /players/search?name=

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::dto::{encode_picture, PlayerSummary, PlayerView};
use crate::response::{ApiResponse, ApiResult};
use crate::services::catalog_service::CatalogService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlayerDetailResponse {
    pub player: PlayerView,
    pub picture: Option<String>,
    /// Opaque payload from the external season-average source
    pub stats: Value,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerSearchResponse {
    pub players: Vec<PlayerSummary>,
}

/// GET /players/:id - player card with season-average stats
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> ApiResult<PlayerDetailResponse> {
    let player = CatalogService::new(state.pool.clone())
        .find_player(player_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Player does not exist"))?;

    let stats = state
        .stats
        .season_averages(&player.name)
        .await
        .map_err(|e| {
            tracing::error!("Stats lookup failed for player {}: {}", player.id, e);
            ApiError::internal_server_error(e.to_string())
        })?;

    Ok(ApiResponse::success(PlayerDetailResponse {
        picture: encode_picture(player.picture_data.as_deref()),
        player: PlayerView::from_model(&player),
        stats,
    }))
}

/// GET /players/search?name= - case-insensitive substring match
pub async fn search_players(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<PlayerSearchResponse> {
    let name_query = query
        .name
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("No search query provided"))?;

    let players = CatalogService::new(state.pool.clone())
        .search_players(&name_query)
        .await?;

    if players.is_empty() {
        return Err(ApiError::not_found(
            "No players found matching the search criteria",
        ));
    }

    Ok(ApiResponse::success(PlayerSearchResponse {
        players: players.iter().map(PlayerSummary::from_model).collect(),
    }))
}
