use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted photo. `id` and `upload_date` are assigned by the
/// store on insert, never by the client.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Uuid,
    pub user_id: i32,
    pub image_url: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub upload_date: DateTime<Utc>,
}

/// The client-known fields of a photo about to be persisted.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub user_id: i32,
    pub image_url: String,
    pub caption: String,
    pub tags: Vec<String>,
}
