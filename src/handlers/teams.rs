// Team directory: GET /teams/:id, GET /teams/search?name=

use axum::extract::{Path, Query, State};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::dto::{encode_picture, TeamSummary, TeamView};
use crate::handlers::players::SearchQuery;
use crate::response::{ApiResponse, ApiResult};
use crate::services::catalog_service::CatalogService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    pub team: TeamView,
    pub picture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamSearchResponse {
    pub teams: Vec<TeamSummary>,
}

/// GET /teams/:id - team card with roster
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> ApiResult<TeamDetailResponse> {
    let catalog = CatalogService::new(state.pool.clone());

    let team = catalog
        .find_team(team_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team does not exist"))?;

    let roster = catalog.team_roster(team.id).await?;

    Ok(ApiResponse::success(TeamDetailResponse {
        picture: encode_picture(team.picture_data.as_deref()),
        team: TeamView::from_model(&team, &roster),
    }))
}

/// GET /teams/search?name= - case-insensitive substring match
pub async fn search_teams(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<TeamSearchResponse> {
    let name_query = query
        .name
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("No search query provided"))?;

    let teams = CatalogService::new(state.pool.clone())
        .search_teams(&name_query)
        .await?;

    if teams.is_empty() {
        return Err(ApiError::not_found(
            "No teams found matching the search criteria",
        ));
    }

    Ok(ApiResponse::success(TeamSearchResponse {
        teams: teams.iter().map(TeamSummary::from_model).collect(),
    }))
}
