use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    /// Always stored upper-cased.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// What the admin panel sends to create a category
#[derive(Debug, Deserialize)]
pub struct CreateCategorySchema {
    pub name: Option<String>,
}
