use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password;
use crate::database::models::User;
use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Missing data")]
    MissingData,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingData => ApiError::bad_request(err.to_string()),
            UserError::UsernameTaken | UserError::EmailTaken => ApiError::conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            UserError::Hashing(msg) => {
                tracing::error!("Password hashing error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            UserError::Database(e) => e.into(),
        }
    }
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user with a hashed password. Username and email must be
    /// globally unique; the checks here pick the error message, the unique
    /// constraints decide under concurrency.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        plain_password: &str,
    ) -> Result<User, UserError> {
        if username.is_empty() || email.is_empty() || plain_password.is_empty() {
            return Err(UserError::MissingData);
        }

        if self.find_by_username(username).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }

        if self.find_by_email(email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        let digest =
            password::hash(plain_password).map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, username, email, password_hash, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(&digest)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::translate_unique_violation)?;

        tracing::info!("Registered user '{}' ({})", user.username, user.id);
        Ok(user)
    }

    // A racing registration can slip past the read checks above; the unique
    // constraints are authoritative and their violations map onto the same
    // conflict responses.
    fn translate_unique_violation(err: sqlx::Error) -> UserError {
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                return match db.constraint() {
                    Some("users_email_key") => UserError::EmailTaken,
                    _ => UserError::UsernameTaken,
                };
            }
        }
        UserError::Database(err)
    }

    /// Check credentials for login. The same failure is reported whether the
    /// user is unknown or the password mismatches.
    pub async fn authenticate(
        &self,
        username: &str,
        plain_password: &str,
    ) -> Result<User, UserError> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !password::verify(plain_password, &user.password_hash) {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at
             FROM users
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Profile update currently only supports email; an absent value keeps
    /// the stored one.
    pub async fn update_email(&self, id: Uuid, email: Option<&str>) -> Result<(), UserError> {
        let Some(email) = email else {
            return Ok(());
        };

        sqlx::query("UPDATE users SET email = $1 WHERE id = $2")
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Self::translate_unique_violation)?;

        Ok(())
    }

    /// Delete the account; favorite relations cascade at the store.
    pub async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}
