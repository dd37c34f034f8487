use super::dto::{ApiResponse, ListingResponse, UPLOAD_SUCCESS_MESSAGE};
use super::error_response::ApiError;
use crate::application::use_cases::{ListImagesUseCase, UploadImageUseCase};
use crate::domain::image::{
    ContentType, FILE_FIELD_NAMES, ImageError, ImageRepository, ImageUpload,
};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared handler state
pub struct ImageState {
    pub upload: UploadImageUseCase,
    pub listing: ListImagesUseCase,
}

impl ImageState {
    pub fn new(repository: Arc<dyn ImageRepository>) -> Self {
        Self {
            upload: UploadImageUseCase::new(repository.clone()),
            listing: ListImagesUseCase::new(repository),
        }
    }
}

/// Accept one image upload
pub async fn upload_image(
    State(state): State<Arc<ImageState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Not a multipart upload: {}", e);
        ApiError::invalid_upload()
    })?;

    let upload = read_file_field(&mut multipart).await?;
    let stored = state.upload.execute(upload).await?;
    info!("Upload stored as {}", stored.filename);

    Ok(Json(ApiResponse::ok(UPLOAD_SUCCESS_MESSAGE)))
}

/// List stored images
pub async fn list_images(
    State(state): State<Arc<ImageState>>,
) -> Result<Json<ListingResponse>, ApiError> {
    let files = state.listing.execute().await?;
    Ok(Json(ListingResponse::new(files)))
}

/// Take the first file field, checking its declared type before reading the body
async fn read_file_field(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_file_field = field
            .name()
            .is_some_and(|name| FILE_FIELD_NAMES.contains(&name));
        let original_name = match field.file_name() {
            Some(name) if is_file_field && !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let content_type = field
            .content_type()
            .map(ContentType::new)
            .unwrap_or_else(ContentType::octet_stream);
        ImageUpload::check_content_type(&content_type)?;

        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(ImageUpload::new(original_name, content_type, bytes.to_vec())?);
    }

    Err(ImageError::MissingFile.into())
}

fn multipart_error(error: MultipartError) -> ApiError {
    warn!("Malformed multipart body: {}", error);
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large()
    } else {
        ApiError::invalid_upload()
    }
}
