use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{unique_file_name, ImageUpload, ObjectStore, StorageError, StoredImage};

/// In-process object store for tests and local experiments.
///
/// Clones share the same objects, so a test can keep a handle while the
/// application state owns another.
#[derive(Clone)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    base_url: String,
    fail_puts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
    put_count: Arc<AtomicUsize>,
    delete_count: Arc<AtomicUsize>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            base_url: "https://images.test".to_string(),
            fail_puts: Arc::new(AtomicBool::new(false)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
            put_count: Arc::new(AtomicUsize::new(0)),
            delete_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Insert an object directly, bypassing `put`.
    pub async fn seed(&self, key: &str, bytes: Vec<u8>) -> String {
        self.objects.write().await.insert(key.to_string(), bytes);
        format!("{}/{}", self.base_url, key)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    /// Look an object up by its public URL.
    pub async fn get_by_url(&self, url: &str) -> Option<Vec<u8>> {
        let key = self.key_from_url(url)?;
        self.objects.read().await.get(&key).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    /// Delete calls that reached the store, successful or not.
    pub fn delete_count(&self) -> usize {
        self.delete_count.load(Ordering::SeqCst)
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, image: &ImageUpload) -> Result<StoredImage, StorageError> {
        self.put_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("put rejected".to_string()));
        }

        let key = unique_file_name(image);
        self.objects
            .write()
            .await
            .insert(key.clone(), image.bytes.clone());
        Ok(StoredImage {
            url: format!("{}/{}", self.base_url, key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.delete_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("delete rejected".to_string()));
        }

        match self.objects.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.base_url)?
            .strip_prefix('/')
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
