//! Lifecycle shared by sliders and channels: a database record coupled to
//! one stored image.
//!
//! Create uploads first and only then inserts, so no record ever points at an
//! image that was never stored. Delete removes the image first and the record
//! unconditionally afterwards; a failed image delete is logged and ignored, so
//! the worst case is an unreferenced object left in the store.

use chrono::Utc;
use uuid::Uuid;

use crate::db::ImageCollection;
use crate::error::{AppError, AppResult};
use crate::models::ImageBacked;
use crate::storage::{ImageUpload, ObjectStore};

pub async fn list<R, C>(repo: &C) -> AppResult<Vec<R>>
where
    R: ImageBacked,
    C: ImageCollection<R> + ?Sized,
{
    Ok(repo.list_records().await?)
}

pub async fn create<R, C>(
    repo: &C,
    store: &dyn ObjectStore,
    image: Option<ImageUpload>,
    fields: R::Fields,
) -> AppResult<R>
where
    R: ImageBacked,
    C: ImageCollection<R> + ?Sized,
{
    // 1. Validate everything before touching storage
    let Some(image) = image else {
        return Err(AppError::validation(R::MISSING_INPUT));
    };
    R::validate(&fields)?;

    // 2. Store the image
    let stored = store.put(&image).await?;
    let key = stored.key.clone();

    // 3. Persist the record pointing at it
    let record = R::build(Uuid::new_v4(), stored, fields, Utc::now());
    if let Err(e) = repo.insert_record(&record).await {
        tracing::warn!(
            entity = R::ENTITY,
            backend = store.backend(),
            key = %key,
            "Record insert failed after upload, stored image left orphaned"
        );
        return Err(e.into());
    }

    tracing::info!(
        entity = R::ENTITY,
        id = %record.id(),
        image_url = %record.image_url(),
        "Record saved"
    );
    Ok(record)
}

pub async fn delete<R, C>(repo: &C, store: &dyn ObjectStore, id: &str) -> AppResult<()>
where
    R: ImageBacked,
    C: ImageCollection<R> + ?Sized,
{
    // A malformed id cannot match any record
    let id = Uuid::parse_str(id).map_err(|_| AppError::NotFound(R::ENTITY))?;

    // 1. Resolve the record
    let record = repo
        .find_record(id)
        .await?
        .ok_or(AppError::NotFound(R::ENTITY))?;

    // 2. Best-effort image removal
    let key = record
        .image_key()
        .map(str::to_string)
        .or_else(|| store.key_from_url(record.image_url()));
    match key {
        Some(key) => match store.delete(&key).await {
            Ok(()) => tracing::info!(entity = R::ENTITY, key = %key, "Image deleted"),
            Err(e) => tracing::warn!(
                entity = R::ENTITY,
                key = %key,
                error = %e,
                "Failed to delete image, removing record anyway"
            ),
        },
        None => tracing::warn!(
            entity = R::ENTITY,
            image_url = %record.image_url(),
            "Could not derive storage key from image URL, removing record anyway"
        ),
    }

    // 3. Remove the record regardless
    if !repo.remove_record(id).await? {
        // Lost a race with a concurrent delete
        return Err(AppError::NotFound(R::ENTITY));
    }

    tracing::info!(entity = R::ENTITY, id = %id, "Record deleted");
    Ok(())
}
