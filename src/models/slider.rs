use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::ImageBacked;
use crate::error::AppError;
use crate::storage::StoredImage;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    pub id: Uuid,
    pub image_url: String,
    #[serde(skip)]
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ImageBacked for Slider {
    type Fields = ();

    const ENTITY: &'static str = "Slider";
    const MISSING_INPUT: &'static str = "No file uploaded";

    fn validate(_: &()) -> Result<(), AppError> {
        Ok(())
    }

    fn build(id: Uuid, image: StoredImage, _: (), created_at: DateTime<Utc>) -> Self {
        Slider {
            id,
            image_url: image.url,
            image_key: Some(image.key),
            created_at,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn image_url(&self) -> &str {
        &self.image_url
    }

    fn image_key(&self) -> Option<&str> {
        self.image_key.as_deref()
    }
}
