use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use mime::Mime;

use crate::error::{AppError, AppResult};
use crate::storage::ImageUpload;

// Upload limits
pub const IMAGE_FIELD: &str = "image";
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024; // 5MB
/// Request body limit for upload routes: the image plus multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

/// A parsed upload form: at most one image plus any text fields.
#[derive(Debug, Default)]
pub struct ImageForm {
    pub image: Option<ImageUpload>,
    fields: HashMap<String, String>,
}

impl ImageForm {
    /// Read the whole form, rejecting bad files before anything is stored.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ImageForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                if form.image.is_some() {
                    return Err(AppError::validation("Only one image file is allowed"));
                }

                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;

                // An empty file input is the same as no file at all
                if data.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                    continue;
                }

                let content_type = validate_image(content_type.as_deref(), data.len())?;
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: data.to_vec(),
                });
            } else if !name.is_empty() {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        if let Some(image) = &form.image {
            tracing::debug!(
                file_name = ?image.file_name,
                content_type = %image.content_type,
                size = image.bytes.len(),
                "Image received"
            );
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Size ceiling and `image/*` content type check.
pub fn validate_image(content_type: Option<&str>, len: usize) -> AppResult<Mime> {
    if len == 0 {
        return Err(AppError::validation("Uploaded file is empty"));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(AppError::validation("Image exceeds the 5MB size limit"));
    }

    let mime = content_type
        .and_then(|ct| ct.parse::<Mime>().ok())
        .filter(|m| m.type_() == mime::IMAGE)
        .ok_or_else(|| AppError::validation("Only image files are allowed"))?;
    Ok(mime)
}

fn multipart_error(err: MultipartError) -> AppError {
    tracing::debug!(error = %err, "Rejected multipart body");
    let status = err.status();
    if status == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        AppError::validation("Image exceeds the 5MB size limit")
    } else {
        AppError::validation(format!("Invalid upload: {}", err.body_text()))
    }
}
