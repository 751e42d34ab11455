use serde::Serialize;

/// `{ "success": true, ...record }` returned after an upload.
#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub success: bool,
    #[serde(flatten)]
    pub record: T,
}

impl<T> Created<T> {
    pub fn new(record: T) -> Self {
        Created {
            success: true,
            record,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct Updated<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
