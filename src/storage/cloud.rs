use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{strip_extension, unique_file_name, ImageUpload, ObjectStore, StorageError, StoredImage};

/// Credentials and options for a Cloudinary-compatible image host.
#[derive(Debug, Clone)]
pub struct CloudImageConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: Option<String>,
    pub api_base: String,
    /// Optional bounded resize applied on upload, e.g. `c_limit,w_1920,h_1080`.
    pub transformation: Option<String>,
}

/// Remote image host reached over its signed upload/destroy API.
///
/// Delivery URLs look like
/// `https://res.cloudinary.com/<cloud>/image/upload/v<version>/<folder>/<name>.<ext>`
/// and the key is the host's public id (`<folder>/<name>`).
pub struct CloudImageStore {
    http: reqwest::Client,
    config: CloudImageConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudImageStore {
    pub fn new(config: CloudImageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name,
            action
        )
    }

    /// Signature over the alphabetically sorted parameters followed by the secret.
    fn sign(&self, params: &BTreeMap<&'static str, String>) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let digest = Sha256::digest(format!("{to_sign}{}", self.config.api_secret).as_bytes());
        format!("{digest:x}")
    }

    fn signed_form(&self, params: BTreeMap<&'static str, String>) -> Form {
        let signature = self.sign(&params);
        let mut form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (name, value) in params {
            form = form.text(name, value);
        }
        form
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, StorageError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or(text);
        return Err(StorageError::Remote {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

fn is_version_segment(segment: &str) -> bool {
    segment.len() > 1
        && segment.starts_with('v')
        && segment[1..].chars().all(|c| c.is_ascii_digit())
}

#[async_trait]
impl ObjectStore for CloudImageStore {
    async fn put(&self, image: &ImageUpload) -> Result<StoredImage, StorageError> {
        let file_name = unique_file_name(image);

        let mut params = BTreeMap::new();
        params.insert("public_id", strip_extension(&file_name).to_string());
        params.insert("timestamp", Utc::now().timestamp().to_string());
        if let Some(folder) = &self.config.folder {
            params.insert("folder", folder.clone());
        }
        if let Some(transformation) = &self.config.transformation {
            params.insert("transformation", transformation.clone());
        }

        let part = Part::bytes(image.bytes.clone())
            .file_name(file_name)
            .mime_str(image.content_type.as_ref())?;
        let form = self.signed_form(params).part("file", part);

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadResponse = parse_response(response).await?;

        tracing::debug!(public_id = %uploaded.public_id, "Image uploaded to image host");

        Ok(StoredImage {
            url: uploaded.secure_url,
            key: uploaded.public_id,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut params = BTreeMap::new();
        params.insert("invalidate", "true".to_string());
        params.insert("public_id", key.to_string());
        params.insert("timestamp", Utc::now().timestamp().to_string());

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .multipart(self.signed_form(params))
            .send()
            .await?;
        let destroyed: DestroyResponse = parse_response(response).await?;

        match destroyed.result.as_str() {
            "ok" => Ok(()),
            "not found" => Err(StorageError::NotFound(key.to_string())),
            other => Err(StorageError::Remote {
                status: 200,
                message: other.to_string(),
            }),
        }
    }

    /// Segments between `upload` and the last one (minus a leading `v<digits>`
    /// version), then the last segment without its extension.
    fn key_from_url(&self, url: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        let upload_idx = segments.iter().position(|s| *s == "upload")?;
        let (last, middle) = segments[upload_idx + 1..].split_last()?;

        let middle = match middle.first() {
            Some(first) if is_version_segment(first) => &middle[1..],
            _ => middle,
        };
        let name = strip_extension(last);
        if name.is_empty() {
            return None;
        }

        let mut parts: Vec<&str> = middle.to_vec();
        parts.push(name);
        Some(parts.join("/"))
    }

    fn backend(&self) -> &'static str {
        "cloud"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: &str) -> CloudImageConfig {
        CloudImageConfig {
            cloud_name: "demo".to_string(),
            api_key: "key123".to_string(),
            api_secret: "abcd".to_string(),
            folder: Some("ctv".to_string()),
            api_base: api_base.to_string(),
            transformation: None,
        }
    }

    // Body matchers only see valid UTF-8, so the payload stays ASCII
    fn png() -> ImageUpload {
        ImageUpload {
            file_name: Some("chan.png".to_string()),
            content_type: mime::IMAGE_PNG,
            bytes: b"PNGDATA".to_vec(),
        }
    }

    #[test]
    fn signature_matches_sorted_params_plus_secret() {
        let store = CloudImageStore::new(config("http://unused"));
        let mut params = BTreeMap::new();
        params.insert("timestamp", "1315060510".to_string());
        params.insert("public_id", "sample_image".to_string());

        assert_eq!(
            store.sign(&params),
            "e3c44b54e67a3ecc918f5d7236ca5faa36250ea8a8cd6cbabfd2d6bb2453acac"
        );
    }

    #[test]
    fn key_from_url_skips_version_and_extension() {
        let store = CloudImageStore::new(config("http://unused"));

        assert_eq!(
            store
                .key_from_url("https://res.cloudinary.com/demo/image/upload/v1712345678/ctv/abc-chan.png")
                .as_deref(),
            Some("ctv/abc-chan")
        );
        assert_eq!(
            store
                .key_from_url("https://res.cloudinary.com/demo/image/upload/sample.jpg")
                .as_deref(),
            Some("sample")
        );
        assert_eq!(
            store
                .key_from_url("https://res.cloudinary.com/demo/image/upload/a/b/c.tar.gz")
                .as_deref(),
            Some("a/b/c.tar")
        );
    }

    #[test]
    fn key_from_url_requires_upload_segment() {
        let store = CloudImageStore::new(config("http://unused"));

        assert_eq!(store.key_from_url("/uploads/abc.png"), None);
        assert_eq!(store.key_from_url("https://cdn.example.com/images/abc.png"), None);
        assert_eq!(store.key_from_url("https://res.cloudinary.com/demo/image/upload"), None);
    }

    #[tokio::test]
    async fn put_uploads_signed_form_and_returns_public_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .and(body_string_contains("signature_algorithm"))
            .and(body_string_contains("key123"))
            .and(body_string_contains("PNGDATA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/ctv/abc-chan.png",
                "public_id": "ctv/abc-chan"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = CloudImageStore::new(config(&server.uri()));
        let stored = store.put(&png()).await.unwrap();

        assert_eq!(stored.key, "ctv/abc-chan");
        assert_eq!(
            stored.url,
            "https://res.cloudinary.com/demo/image/upload/v1/ctv/abc-chan.png"
        );
        assert_eq!(store.key_from_url(&stored.url), Some(stored.key));
    }

    #[tokio::test]
    async fn put_surfaces_remote_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Invalid image file" }
            })))
            .mount(&server)
            .await;

        let store = CloudImageStore::new(config(&server.uri()));
        let err = store.put(&png()).await.unwrap_err();

        match err {
            StorageError::Remote { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid image file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_maps_destroy_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/destroy"))
            .and(body_string_contains("ctv/gone"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "not found" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/destroy"))
            .and(body_string_contains("ctv/abc-chan"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "ok" })),
            )
            .mount(&server)
            .await;

        let store = CloudImageStore::new(config(&server.uri()));

        store.delete("ctv/abc-chan").await.unwrap();
        assert!(matches!(
            store.delete("ctv/gone").await,
            Err(StorageError::NotFound(key)) if key == "ctv/gone"
        ));
    }
}
