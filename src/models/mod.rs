pub mod category;
pub mod channel;
pub mod footer;
pub mod response;
pub mod slider;
pub mod user;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::storage::StoredImage;

/// A record whose lifetime is tied to one image held in the object store.
///
/// Sliders and channels share the same create/delete lifecycle; this trait
/// carries the per-type parts (extra fields, validation, naming).
pub trait ImageBacked: Serialize + Clone + Send + Sync + 'static {
    /// Non-image fields supplied with the upload.
    type Fields: Send + 'static;

    /// Entity name used in logs and `NotFound` errors.
    const ENTITY: &'static str;

    /// Message returned when the upload or a required field is missing.
    const MISSING_INPUT: &'static str;

    fn validate(fields: &Self::Fields) -> Result<(), AppError>;

    fn build(id: Uuid, image: StoredImage, fields: Self::Fields, created_at: DateTime<Utc>) -> Self;

    fn id(&self) -> Uuid;

    fn image_url(&self) -> &str;

    /// Storage identifier recorded at creation, if any.
    fn image_key(&self) -> Option<&str>;
}
