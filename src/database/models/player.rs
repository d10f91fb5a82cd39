use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    // Raw bytes; the wire representation is base64 via the picture DTOs
    #[serde(skip)]
    pub picture_data: Option<Vec<u8>>,
}
