// Aggregate endpoints: GET /top-players, GET /top-teams.

use axum::extract::State;

use crate::handlers::dto::LeaderboardRow;
use crate::response::{ApiResponse, ApiResult};
use crate::services::leaderboard_service::LeaderboardService;
use crate::state::AppState;

/// GET /top-players - the five most-favorited players, fan count descending
pub async fn top_players(State(state): State<AppState>) -> ApiResult<Vec<LeaderboardRow>> {
    let entries = LeaderboardService::new(state.pool.clone())
        .top_players()
        .await?;

    Ok(ApiResponse::success(
        entries.iter().map(LeaderboardRow::from_entry).collect(),
    ))
}

/// GET /top-teams - the five most-favorited teams, fan count descending
pub async fn top_teams(State(state): State<AppState>) -> ApiResult<Vec<LeaderboardRow>> {
    let entries = LeaderboardService::new(state.pool.clone())
        .top_teams()
        .await?;

    Ok(ApiResponse::success(
        entries.iter().map(LeaderboardRow::from_entry).collect(),
    ))
}
