use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::ImageBacked;
use crate::error::AppError;
use crate::storage::StoredImage;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: Uuid,
    pub image_url: String,
    #[serde(skip)]
    pub image_key: Option<String>,
    /// One of [`CHANNEL_GENRES`]. Not tied to the `categories` table.
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Genres a channel may be listed under.
pub const CHANNEL_GENRES: [&str; 8] = [
    "ENTERTAINMENT",
    "NEWS",
    "MOVIES",
    "INFOTAINMENT",
    "KIDS",
    "MUSIC",
    "RELIGIOUS",
    "SPORTS",
];

/// Form fields sent alongside a channel image.
#[derive(Debug, Clone, Default)]
pub struct ChannelFields {
    pub category: String,
}

impl ChannelFields {
    pub fn new(category: Option<&str>) -> Self {
        ChannelFields {
            category: category.map(str::trim).unwrap_or_default().to_uppercase(),
        }
    }
}

impl ImageBacked for Channel {
    type Fields = ChannelFields;

    const ENTITY: &'static str = "Channel";
    const MISSING_INPUT: &'static str = "Missing file or category";

    fn validate(fields: &ChannelFields) -> Result<(), AppError> {
        if fields.category.is_empty() {
            return Err(AppError::validation(Self::MISSING_INPUT));
        }
        if !CHANNEL_GENRES.contains(&fields.category.as_str()) {
            return Err(AppError::validation(format!(
                "Invalid category, expected one of {}",
                CHANNEL_GENRES.join(", ")
            )));
        }
        Ok(())
    }

    fn build(id: Uuid, image: StoredImage, fields: ChannelFields, created_at: DateTime<Utc>) -> Self {
        Channel {
            id,
            image_url: image.url,
            image_key: Some(image.key),
            category: fields.category,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_trimmed_and_upper_cased() {
        assert_eq!(ChannelFields::new(Some("  SPORTS ")).category, "SPORTS");
        assert_eq!(ChannelFields::new(Some("kids")).category, "KIDS");
    }

    #[test]
    fn every_genre_passes_validation() {
        for genre in CHANNEL_GENRES {
            assert!(Channel::validate(&ChannelFields::new(Some(genre))).is_ok(), "{genre}");
        }
        assert!(Channel::validate(&ChannelFields::new(Some("Religious"))).is_ok());
    }

    #[test]
    fn unknown_genre_fails_validation() {
        let err = Channel::validate(&ChannelFields::new(Some("COOKING"))).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("Invalid category")));
    }

    #[test]
    fn blank_category_fails_validation() {
        let err = Channel::validate(&ChannelFields::new(Some("   "))).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Missing file or category"));
        assert!(Channel::validate(&ChannelFields::new(None)).is_err());
    }
}
