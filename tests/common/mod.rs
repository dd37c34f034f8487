#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use camera_uploader::infrastructure::storage::FilesystemImageRepository;
use camera_uploader::interfaces::web::{ImageState, server::build_router};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "----camera-uploader-test-boundary";

/// Router over a fresh temporary storage root
pub struct TestSetup {
    pub router: Router,
    pub uploads: TempDir,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_body_limit(10 * 1024 * 1024)
    }

    pub fn with_body_limit(body_limit: usize) -> Self {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();

        let uploads = tempfile::tempdir().expect("temp dir");
        let router = router_for(uploads.path(), body_limit);
        Self { router, uploads }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn upload(&self, parts: &[FormPart]) -> Response<Body> {
        let request = Request::builder()
            .uri("/upload")
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    /// Names currently in the storage root, sorted
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }
}

pub fn router_for(uploads: &Path, body_limit: usize) -> Router {
    let repository = Arc::new(FilesystemImageRepository::new(uploads));
    build_router(Arc::new(ImageState::new(repository)), uploads, body_limit)
}

/// One part of a multipart form
pub struct FormPart {
    pub field: &'static str,
    pub filename: Option<&'static str>,
    pub content_type: Option<&'static str>,
    pub bytes: Vec<u8>,
}

impl FormPart {
    pub fn file(
        field: &'static str,
        filename: &'static str,
        content_type: &'static str,
        bytes: &[u8],
    ) -> Self {
        Self {
            field,
            filename: Some(filename),
            content_type: Some(content_type),
            bytes: bytes.to_vec(),
        }
    }

    pub fn image(filename: &'static str, bytes: &[u8]) -> Self {
        Self::file("image", filename, "image/png", bytes)
    }

    pub fn text(field: &'static str, value: &str) -> Self {
        Self {
            field,
            filename: None,
            content_type: None,
            bytes: value.as_bytes().to_vec(),
        }
    }
}

pub fn multipart_body(parts: &[FormPart]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match part.filename {
            Some(filename) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, filename
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.field),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    use http_body_util::BodyExt;

    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}
