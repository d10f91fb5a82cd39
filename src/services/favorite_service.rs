use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Player, Team};
use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("User not found")]
    UserNotFound,

    #[error("Player does not exist")]
    PlayerNotFound,

    #[error("Team does not exist")]
    TeamNotFound,

    #[error("Player is already in favorites")]
    PlayerAlreadyFavorite,

    #[error("Team is already in favorites")]
    TeamAlreadyFavorite,

    #[error("Player is not in favorites")]
    PlayerNotFavorite,

    #[error("Team is not in favorites")]
    TeamNotFavorite,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::UserNotFound
            | FavoriteError::PlayerNotFound
            | FavoriteError::TeamNotFound
            | FavoriteError::PlayerNotFavorite
            | FavoriteError::TeamNotFavorite => ApiError::not_found(err.to_string()),
            FavoriteError::PlayerAlreadyFavorite | FavoriteError::TeamAlreadyFavorite => {
                ApiError::conflict(err.to_string())
            }
            FavoriteError::Database(e) => e.into(),
        }
    }
}

/// Maintains the many-to-many relation between users and players/teams.
/// Check order is fixed for deterministic error precedence: user existence,
/// then entity existence, then relation state. Add is not idempotent (a
/// second add conflicts) and neither is remove (a second remove is not
/// found).
pub struct FavoriteService {
    pool: PgPool,
}

impl FavoriteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_favorite_player(
        &self,
        user_id: Uuid,
        player_id: Uuid,
    ) -> Result<(), FavoriteError> {
        self.require_user(user_id).await?;

        if !self.player_exists(player_id).await? {
            return Err(FavoriteError::PlayerNotFound);
        }

        if self.is_favorite_player(user_id, player_id).await? {
            return Err(FavoriteError::PlayerAlreadyFavorite);
        }

        // The composite primary key settles concurrent duplicate adds; the
        // read above only picks the message for the common case.
        sqlx::query("INSERT INTO user_favorite_players (user_id, player_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(player_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::translate_duplicate(e, FavoriteError::PlayerAlreadyFavorite))?;

        Ok(())
    }

    pub async fn remove_favorite_player(
        &self,
        user_id: Uuid,
        player_id: Uuid,
    ) -> Result<(), FavoriteError> {
        self.require_user(user_id).await?;

        if !self.player_exists(player_id).await? {
            return Err(FavoriteError::PlayerNotFound);
        }

        let result = sqlx::query(
            "DELETE FROM user_favorite_players WHERE user_id = $1 AND player_id = $2",
        )
        .bind(user_id)
        .bind(player_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(FavoriteError::PlayerNotFavorite);
        }

        Ok(())
    }

    pub async fn add_favorite_team(
        &self,
        user_id: Uuid,
        team_id: Uuid,
    ) -> Result<(), FavoriteError> {
        self.require_user(user_id).await?;

        if !self.team_exists(team_id).await? {
            return Err(FavoriteError::TeamNotFound);
        }

        if self.is_favorite_team(user_id, team_id).await? {
            return Err(FavoriteError::TeamAlreadyFavorite);
        }

        sqlx::query("INSERT INTO user_favorite_teams (user_id, team_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(team_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::translate_duplicate(e, FavoriteError::TeamAlreadyFavorite))?;

        Ok(())
    }

    pub async fn remove_favorite_team(
        &self,
        user_id: Uuid,
        team_id: Uuid,
    ) -> Result<(), FavoriteError> {
        self.require_user(user_id).await?;

        if !self.team_exists(team_id).await? {
            return Err(FavoriteError::TeamNotFound);
        }

        let result =
            sqlx::query("DELETE FROM user_favorite_teams WHERE user_id = $1 AND team_id = $2")
                .bind(user_id)
                .bind(team_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(FavoriteError::TeamNotFavorite);
        }

        Ok(())
    }

    /// Favorite players of a user, via an explicit join over the relation
    /// table.
    pub async fn list_favorite_players(&self, user_id: Uuid) -> Result<Vec<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            "SELECT p.id, p.name, p.picture_data
             FROM players p
             JOIN user_favorite_players f ON f.player_id = p.id
             WHERE f.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Favorite teams of a user.
    pub async fn list_favorite_teams(&self, user_id: Uuid) -> Result<Vec<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            "SELECT t.id, t.name, t.picture_data
             FROM teams t
             JOIN user_favorite_teams f ON f.team_id = t.id
             WHERE f.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    fn translate_duplicate(err: sqlx::Error, conflict: FavoriteError) -> FavoriteError {
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                return conflict;
            }
        }
        FavoriteError::Database(err)
    }

    async fn require_user(&self, user_id: Uuid) -> Result<(), FavoriteError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists.0 {
            return Err(FavoriteError::UserNotFound);
        }
        Ok(())
    }

    async fn player_exists(&self, player_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM players WHERE id = $1)")
                .bind(player_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists.0)
    }

    async fn team_exists(&self, team_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM teams WHERE id = $1)")
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn is_favorite_player(
        &self,
        user_id: Uuid,
        player_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM user_favorite_players
                 WHERE user_id = $1 AND player_id = $2
             )",
        )
        .bind(user_id)
        .bind(player_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    async fn is_favorite_team(&self, user_id: Uuid, team_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM user_favorite_teams
                 WHERE user_id = $1 AND team_id = $2
             )",
        )
        .bind(user_id)
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }
}
