use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One ranked entity with its favorite count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub name: String,
    pub fan_count: i64,
    #[serde(skip)]
    pub picture_data: Option<Vec<u8>>,
}

/// Computes top-N entities ranked by favorite count. Entities nobody has
/// favorited do not appear. The order of entries with equal fan counts is
/// whatever the store returns; it is not specified.
pub struct LeaderboardService {
    pool: PgPool,
}

const TOP_LIMIT: i64 = 5;

impl LeaderboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn top_players(&self) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT p.id, p.name, COUNT(f.user_id) AS fan_count, p.picture_data
             FROM players p
             JOIN user_favorite_players f ON f.player_id = p.id
             GROUP BY p.id, p.name, p.picture_data
             ORDER BY fan_count DESC
             LIMIT $1",
        )
        .bind(TOP_LIMIT)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn top_teams(&self) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT t.id, t.name, COUNT(f.user_id) AS fan_count, t.picture_data
             FROM teams t
             JOIN user_favorite_teams f ON f.team_id = t.id
             GROUP BY t.id, t.name, t.picture_data
             ORDER BY fan_count DESC
             LIMIT $1",
        )
        .bind(TOP_LIMIT)
        .fetch_all(&self.pool)
        .await
    }
}
