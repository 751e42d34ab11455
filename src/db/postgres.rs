use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::{
    CategoryRepository, DbError, DbPool, FooterRepository, ImageCollection, UserRepository,
};
use crate::models::category::Category;
use crate::models::channel::Channel;
use crate::models::footer::{Contact, FooterLink, QuickLink, SocialLink};
use crate::models::slider::Slider;
use crate::models::user::User;

/// Postgres-backed repository.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageCollection<Slider> for PgStore {
    async fn list_records(&self) -> Result<Vec<Slider>, DbError> {
        let rows = sqlx::query_as::<_, Slider>(
            "SELECT id, image_url, image_key, created_at FROM sliders ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_record(&self, id: Uuid) -> Result<Option<Slider>, DbError> {
        let row = sqlx::query_as::<_, Slider>(
            "SELECT id, image_url, image_key, created_at FROM sliders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_record(&self, slider: &Slider) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO sliders (id, image_url, image_key, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(slider.id)
        .bind(&slider.image_url)
        .bind(&slider.image_key)
        .bind(slider.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_record(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM sliders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ImageCollection<Channel> for PgStore {
    async fn list_records(&self) -> Result<Vec<Channel>, DbError> {
        let rows = sqlx::query_as::<_, Channel>(
            "SELECT id, image_url, image_key, category, created_at FROM channels ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_record(&self, id: Uuid) -> Result<Option<Channel>, DbError> {
        let row = sqlx::query_as::<_, Channel>(
            "SELECT id, image_url, image_key, category, created_at FROM channels WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_record(&self, channel: &Channel) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO channels (id, image_url, image_key, category, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(channel.id)
        .bind(&channel.image_url)
        .bind(&channel.image_key)
        .bind(&channel.category)
        .bind(channel.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_record(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM channels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CategoryRepository for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, DbError> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_category(&self, category: &Category) -> Result<(), DbError> {
        sqlx::query("INSERT INTO categories (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(category.id)
            .bind(&category.name)
            .bind(category.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// Footer sections are stored as JSONB columns on a single row (id = 1)
#[derive(FromRow)]
struct FooterRow {
    contact: Json<Contact>,
    quick_links: Json<Vec<QuickLink>>,
    social_links: Json<Vec<SocialLink>>,
}

impl From<FooterRow> for FooterLink {
    fn from(row: FooterRow) -> Self {
        FooterLink {
            contact: row.contact.0,
            quick_links: row.quick_links.0,
            social_links: row.social_links.0,
        }
    }
}

#[async_trait]
impl FooterRepository for PgStore {
    async fn get_footer(&self) -> Result<Option<FooterLink>, DbError> {
        let row = sqlx::query_as::<_, FooterRow>(
            "SELECT contact, quick_links, social_links FROM footer_links WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(FooterLink::from))
    }

    async fn save_footer(&self, footer: &FooterLink) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO footer_links (id, contact, quick_links, social_links)
            VALUES (1, $1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                contact = EXCLUDED.contact,
                quick_links = EXCLUDED.quick_links,
                social_links = EXCLUDED.social_links
            "#,
        )
        .bind(Json(&footer.contact))
        .bind(Json(&footer.quick_links))
        .bind(Json(&footer.social_links))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_user(&self, user: &User) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
