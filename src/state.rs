use std::path::PathBuf;
use std::sync::Arc;

use crate::db::Repository;
use crate::storage::ObjectStore;
use crate::utils::jwt::JwtKeys;

/// Shared application state handed to every handler via `State<AppState>`.
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub images: Arc<dyn ObjectStore>,
    pub jwt: Arc<JwtKeys>,
    /// Directory served statically when images live on local disk.
    pub uploads: Option<UploadsMount>,
}

#[derive(Debug, Clone)]
pub struct UploadsMount {
    pub url_prefix: String,
    pub dir: PathBuf,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, images: Arc<dyn ObjectStore>, jwt: JwtKeys) -> Self {
        Self {
            repo,
            images,
            jwt: Arc::new(jwt),
            uploads: None,
        }
    }

    pub fn with_uploads_mount(mut self, url_prefix: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.uploads = Some(UploadsMount {
            url_prefix: url_prefix.into(),
            dir: dir.into(),
        });
        self
    }
}
