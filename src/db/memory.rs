use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CategoryRepository, DbError, FooterRepository, ImageCollection, UserRepository,
};
use crate::models::category::Category;
use crate::models::channel::Channel;
use crate::models::footer::FooterLink;
use crate::models::slider::Slider;
use crate::models::user::User;
use crate::models::ImageBacked;

/// In-memory repository with the same uniqueness rules as the Postgres schema.
///
/// Clones share state. `fail_writes` makes every insert fail, which lets
/// tests exercise the paths where the database rejects a write.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    sliders: RwLock<Vec<Slider>>,
    channels: RwLock<Vec<Channel>>,
    categories: RwLock<Vec<Category>>,
    footer: RwLock<Option<FooterLink>>,
    users: RwLock<Vec<User>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), DbError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

async fn list_in<R: ImageBacked>(rows: &RwLock<Vec<R>>) -> Vec<R> {
    rows.read().await.clone()
}

async fn find_in<R: ImageBacked>(rows: &RwLock<Vec<R>>, id: Uuid) -> Option<R> {
    rows.read().await.iter().find(|r| r.id() == id).cloned()
}

async fn remove_from<R: ImageBacked>(rows: &RwLock<Vec<R>>, id: Uuid) -> bool {
    let mut rows = rows.write().await;
    let before = rows.len();
    rows.retain(|r| r.id() != id);
    rows.len() != before
}

#[async_trait]
impl ImageCollection<Slider> for MemoryStore {
    async fn list_records(&self) -> Result<Vec<Slider>, DbError> {
        Ok(list_in(&self.inner.sliders).await)
    }

    async fn find_record(&self, id: Uuid) -> Result<Option<Slider>, DbError> {
        Ok(find_in(&self.inner.sliders, id).await)
    }

    async fn insert_record(&self, slider: &Slider) -> Result<(), DbError> {
        self.check_writable()?;
        self.inner.sliders.write().await.push(slider.clone());
        Ok(())
    }

    async fn remove_record(&self, id: Uuid) -> Result<bool, DbError> {
        Ok(remove_from(&self.inner.sliders, id).await)
    }
}

#[async_trait]
impl ImageCollection<Channel> for MemoryStore {
    async fn list_records(&self) -> Result<Vec<Channel>, DbError> {
        Ok(list_in(&self.inner.channels).await)
    }

    async fn find_record(&self, id: Uuid) -> Result<Option<Channel>, DbError> {
        Ok(find_in(&self.inner.channels, id).await)
    }

    async fn insert_record(&self, channel: &Channel) -> Result<(), DbError> {
        self.check_writable()?;
        self.inner.channels.write().await.push(channel.clone());
        Ok(())
    }

    async fn remove_record(&self, id: Uuid) -> Result<bool, DbError> {
        Ok(remove_from(&self.inner.channels, id).await)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        let mut categories = self.inner.categories.read().await.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, DbError> {
        let categories = self.inner.categories.read().await;
        Ok(categories.iter().find(|c| c.name == name).cloned())
    }

    async fn insert_category(&self, category: &Category) -> Result<(), DbError> {
        self.check_writable()?;
        let mut categories = self.inner.categories.write().await;
        if categories.iter().any(|c| c.name == category.name) {
            return Err(DbError::UniqueViolation("uq_categories_name".to_string()));
        }
        categories.push(category.clone());
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, DbError> {
        let mut categories = self.inner.categories.write().await;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() != before)
    }
}

#[async_trait]
impl FooterRepository for MemoryStore {
    async fn get_footer(&self) -> Result<Option<FooterLink>, DbError> {
        Ok(self.inner.footer.read().await.clone())
    }

    async fn save_footer(&self, footer: &FooterLink) -> Result<(), DbError> {
        self.check_writable()?;
        *self.inner.footer.write().await = Some(footer.clone());
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let users = self.inner.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), DbError> {
        self.check_writable()?;
        let mut users = self.inner.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(DbError::UniqueViolation("uq_users_email".to_string()));
        }
        users.push(user.clone());
        Ok(())
    }
}
