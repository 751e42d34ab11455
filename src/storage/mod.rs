//! Object storage for uploaded images.
//!
//! The database only keeps URLs; the bytes live in one of the backends below.
//! Each successful [`ObjectStore::put`] yields a public URL for display and a
//! key that identifies the object for later deletion.

pub mod cloud;
pub mod local;
pub mod memory;

pub use cloud::CloudImageStore;
pub use local::LocalDiskStore;
pub use memory::MemoryObjectStore;

use async_trait::async_trait;
use mime::Mime;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object store unavailable: {0}")]
    Unavailable(String),
}

/// A validated image file taken from an upload form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

/// Where an image ended up: the URL clients use and the key needed to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub key: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, image: &ImageUpload) -> Result<StoredImage, StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Recover the storage key from a public URL.
    ///
    /// Only used for records created without a stored key.
    fn key_from_url(&self, url: &str) -> Option<String>;

    fn backend(&self) -> &'static str;
}

/// Unique, filesystem-safe name for an upload: `<uuid>-<sanitized name>`.
///
/// Uploads without a usable name fall back to `<uuid>.<ext>` with the
/// extension taken from the content type.
pub fn unique_file_name(image: &ImageUpload) -> String {
    let id = Uuid::new_v4();
    let sanitized = image
        .file_name
        .as_deref()
        .map(sanitize_file_name)
        .filter(|name| name.chars().any(|c| c.is_ascii_alphanumeric()));

    match sanitized {
        Some(name) => format!("{id}-{name}"),
        None => format!("{id}.{}", extension_for(&image.content_type)),
    }
}

fn sanitize_file_name(raw: &str) -> String {
    // Browsers on Windows may send the full client path
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

fn extension_for(content_type: &Mime) -> &str {
    let subtype = content_type.subtype().as_str();
    match subtype {
        "jpeg" => "jpg",
        other => other.split('+').next().unwrap_or("img"),
    }
}

/// Drop the extension from the last path segment.
pub(crate) fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
