use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Player, Team};

/// Read-mostly directory of players and teams.
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_player(&self, id: Uuid) -> Result<Option<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            "SELECT id, name, picture_data FROM players WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_team(&self, id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT id, name, picture_data FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Case-insensitive substring match on player name.
    pub async fn search_players(&self, name_query: &str) -> Result<Vec<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            "SELECT id, name, picture_data
             FROM players
             WHERE name ILIKE '%' || $1 || '%'",
        )
        .bind(name_query)
        .fetch_all(&self.pool)
        .await
    }

    /// Case-insensitive substring match on team name.
    pub async fn search_teams(&self, name_query: &str) -> Result<Vec<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            "SELECT id, name, picture_data
             FROM teams
             WHERE name ILIKE '%' || $1 || '%'",
        )
        .bind(name_query)
        .fetch_all(&self.pool)
        .await
    }

    /// Roster membership, used only for display composition.
    pub async fn team_roster(&self, team_id: Uuid) -> Result<Vec<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            "SELECT p.id, p.name, p.picture_data
             FROM players p
             JOIN team_players tp ON tp.player_id = p.id
             WHERE tp.team_id = $1",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }
}
