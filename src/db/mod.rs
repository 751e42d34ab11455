pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use uuid::Uuid;

use crate::models::category::Category;
use crate::models::channel::Channel;
use crate::models::footer::FooterLink;
use crate::models::slider::Slider;
use crate::models::user::User;
use crate::models::ImageBacked;

// Alias for the Postgres pool
pub type DbPool = Pool<Postgres>;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply the bundled schema in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Query failed: {0}")]
    Query(sqlx::Error),

    /// A unique constraint rejected the write. Carries the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return DbError::UniqueViolation(constraint);
            }
        }
        DbError::Query(err)
    }
}

/// Storage for one image-backed record type.
#[async_trait]
pub trait ImageCollection<R: ImageBacked>: Send + Sync {
    /// All records, oldest first.
    async fn list_records(&self) -> Result<Vec<R>, DbError>;

    async fn find_record(&self, id: Uuid) -> Result<Option<R>, DbError>;

    async fn insert_record(&self, record: &R) -> Result<(), DbError>;

    /// Returns `false` when no row matched.
    async fn remove_record(&self, id: Uuid) -> Result<bool, DbError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Sorted by name ascending.
    async fn list_categories(&self) -> Result<Vec<Category>, DbError>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, DbError>;

    async fn insert_category(&self, category: &Category) -> Result<(), DbError>;

    async fn delete_category(&self, id: Uuid) -> Result<bool, DbError>;
}

#[async_trait]
pub trait FooterRepository: Send + Sync {
    async fn get_footer(&self) -> Result<Option<FooterLink>, DbError>;

    /// Create or replace the singleton.
    async fn save_footer(&self, footer: &FooterLink) -> Result<(), DbError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    async fn insert_user(&self, user: &User) -> Result<(), DbError>;
}

/// Everything the HTTP layer needs from the database.
pub trait Repository:
    ImageCollection<Slider>
    + ImageCollection<Channel>
    + CategoryRepository
    + FooterRepository
    + UserRepository
{
}

impl<T> Repository for T where
    T: ImageCollection<Slider>
        + ImageCollection<Channel>
        + CategoryRepository
        + FooterRepository
        + UserRepository
{
}

#[cfg(test)]
mod tests {
    const INIT_SQL: &str = include_str!("../../migrations/20250101000000_init.sql");

    #[test]
    fn schema_seeds_the_footer_singleton() {
        assert!(INIT_SQL.contains("INSERT INTO footer_links (id) VALUES (1) ON CONFLICT DO NOTHING"));
    }

    #[test]
    fn schema_constrains_channel_genres() {
        for genre in crate::models::channel::CHANNEL_GENRES {
            assert!(INIT_SQL.contains(&format!("'{genre}'")), "{genre}");
        }
    }
}
