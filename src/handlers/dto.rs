// Wire-facing views shared across handlers. Pictures travel as base64
// strings, or null when the entity has none.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{Player, Team};
use crate::services::leaderboard_service::LeaderboardEntry;

pub fn encode_picture(data: Option<&[u8]>) -> Option<String> {
    data.map(|bytes| BASE64.encode(bytes))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full player view used in profiles and the player page.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub player_id: Uuid,
    pub player_name: String,
    pub picture: Option<String>,
}

impl PlayerView {
    pub fn from_model(player: &Player) -> Self {
        Self {
            player_id: player.id,
            player_name: player.name.clone(),
            picture: encode_picture(player.picture_data.as_deref()),
        }
    }
}

/// Team view embedding its roster for display composition.
#[derive(Debug, Serialize)]
pub struct TeamView {
    pub team_id: Uuid,
    pub team_name: String,
    pub picture: Option<String>,
    pub players: Vec<PlayerView>,
}

impl TeamView {
    pub fn from_model(team: &Team, roster: &[Player]) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            picture: encode_picture(team.picture_data.as_deref()),
            players: roster.iter().map(PlayerView::from_model).collect(),
        }
    }
}

/// Compact row used by the search endpoints.
#[derive(Debug, Serialize)]
pub struct PlayerSummary {
    pub id: Uuid,
    pub name: String,
    pub picture: Option<String>,
}

impl PlayerSummary {
    pub fn from_model(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            picture: encode_picture(player.picture_data.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
    pub picture: Option<String>,
}

impl TeamSummary {
    pub fn from_model(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            picture: encode_picture(team.picture_data.as_deref()),
        }
    }
}

/// Ranked leaderboard row.
#[derive(Debug, Serialize)]
pub struct LeaderboardRow {
    pub id: Uuid,
    pub name: String,
    pub fan_count: i64,
    pub picture: Option<String>,
}

impl LeaderboardRow {
    pub fn from_entry(entry: &LeaderboardEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            fan_count: entry.fan_count,
            picture: encode_picture(entry.picture_data.as_deref()),
        }
    }
}
