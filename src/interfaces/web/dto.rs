use serde::{Deserialize, Serialize};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully.";
pub const INVALID_UPLOAD_MESSAGE: &str = "No file uploaded or invalid file type.";
pub const LISTING_ERROR_MESSAGE: &str = "Error reading uploads directory.";
pub const STORAGE_ERROR_MESSAGE: &str = "Error saving uploaded file.";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Uploaded file is too large.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// `{success, message}` envelope used by every non-listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingResponse {
    pub success: bool,
    pub files: Vec<String>,
}

impl ListingResponse {
    pub fn new(files: Vec<String>) -> Self {
        Self {
            success: true,
            files,
        }
    }
}
