use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs; // async filesystem

use super::{unique_file_name, ImageUpload, ObjectStore, StorageError, StoredImage};

/// Images written to a local directory and served statically.
///
/// URL shape: `<url_prefix>/<key>`, where the key is the file name inside
/// `root` (never a nested path).
#[derive(Debug, Clone)]
pub struct LocalDiskStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into();
        Self {
            root: root.into(),
            url_prefix: format!("/{}", url_prefix.trim_matches('/')),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Route prefix the directory should be mounted under, e.g. `/uploads`.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_plain_file_name(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

fn is_plain_file_name(key: &str) -> bool {
    !key.is_empty() && key != "." && key != ".." && !key.contains(['/', '\\'])
}

#[async_trait]
impl ObjectStore for LocalDiskStore {
    async fn put(&self, image: &ImageUpload) -> Result<StoredImage, StorageError> {
        // 1. Make sure the upload folder exists
        fs::create_dir_all(&self.root).await?;

        // 2. Write the bytes under a unique name
        let key = unique_file_name(image);
        let path = self.path_for(&key)?;
        fs::write(&path, &image.bytes).await?;

        tracing::debug!(path = %path.display(), size = image.bytes.len(), "Image written to disk");

        // 3. Public URL, served by the static files route
        Ok(StoredImage {
            url: format!("{}/{}", self.url_prefix, key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Image file deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Everything after the first `<url_prefix>/`, so both `/uploads/x.png`
    /// and `http://host/uploads/x.png` resolve to `x.png`.
    fn key_from_url(&self, url: &str) -> Option<String> {
        let marker = format!("{}/", self.url_prefix);
        let (_, rest) = url.split_once(&marker)?;
        let key = rest.split(['?', '#']).next().unwrap_or(rest);
        is_plain_file_name(key).then(|| key.to_string())
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
