use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    // Digest only, never serialized back out
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
