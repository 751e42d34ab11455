use chrono::Utc;
use uuid::Uuid;

use crate::db::{CategoryRepository, DbError};
use crate::error::{AppError, AppResult};
use crate::models::category::Category;

const DUPLICATE: &str = "Category already exists";

pub async fn list<C: CategoryRepository + ?Sized>(repo: &C) -> AppResult<Vec<Category>> {
    Ok(repo.list_categories().await?)
}

/// Names are stored upper-cased, which makes uniqueness case-insensitive.
pub async fn create<C: CategoryRepository + ?Sized>(
    repo: &C,
    name: Option<&str>,
) -> AppResult<Category> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::validation("Category name required"));
    }
    let name = name.to_uppercase();

    if repo.find_category_by_name(&name).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE.to_string()));
    }

    let category = Category {
        id: Uuid::new_v4(),
        name,
        created_at: Utc::now(),
    };
    match repo.insert_category(&category).await {
        Ok(()) => {}
        // Someone else inserted the same name between the check and the insert
        Err(DbError::UniqueViolation(_)) => return Err(AppError::Conflict(DUPLICATE.to_string())),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(id = %category.id, name = %category.name, "Category created");
    Ok(category)
}

/// Idempotent: deleting an unknown or malformed id still succeeds.
/// Channels keep their category text.
pub async fn delete<C: CategoryRepository + ?Sized>(repo: &C, id: &str) -> AppResult<()> {
    let Ok(id) = Uuid::parse_str(id) else {
        tracing::debug!(id, "Ignoring delete of malformed category id");
        return Ok(());
    };

    if repo.delete_category(id).await? {
        tracing::info!(id = %id, "Category deleted");
    }
    Ok(())
}
