use crate::domain::capture::{AcquiredImage, ImageService, ServiceError};
use crate::domain::image::FILE_FIELD_NAMES;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Either response envelope the service sends
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    files: Option<Vec<String>>,
}

/// Talks to a running upload service over HTTP
#[derive(Debug, Clone)]
pub struct HttpImageService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_envelope(response: reqwest::Response) -> Result<(u16, Envelope), ServiceError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let envelope = serde_json::from_str::<Envelope>(&body).map_err(|e| {
            if (200..300).contains(&status) {
                ServiceError::InvalidResponse(e.to_string())
            } else {
                // Non-JSON failure body (e.g. a proxy error page)
                ServiceError::Rejected {
                    status,
                    message: String::new(),
                }
            }
        })?;

        Ok((status, envelope))
    }
}

#[async_trait]
impl ImageService for HttpImageService {
    async fn upload(&self, image: &AcquiredImage) -> Result<String, ServiceError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(image.content_type.as_str())
            .map_err(|e| ServiceError::InvalidResponse(format!("bad content type: {e}")))?;
        let form = Form::new().part(FILE_FIELD_NAMES[0], part);

        debug!("POST {} ({} bytes)", self.url("/upload"), image.size());
        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let (status, envelope) = Self::read_envelope(response).await?;
        let message = envelope.message.unwrap_or_default();
        if (200..300).contains(&status) && envelope.success {
            Ok(message)
        } else {
            Err(ServiceError::Rejected { status, message })
        }
    }

    async fn list(&self) -> Result<Vec<String>, ServiceError> {
        let response = self
            .client
            .get(self.url("/files"))
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let (status, envelope) = Self::read_envelope(response).await?;
        match (envelope.success, envelope.files) {
            (true, Some(files)) if (200..300).contains(&status) => Ok(files),
            (true, None) if (200..300).contains(&status) => Err(ServiceError::InvalidResponse(
                "listing without files".to_string(),
            )),
            _ => Err(ServiceError::Rejected {
                status,
                message: envelope.message.unwrap_or_default(),
            }),
        }
    }

    fn file_url(&self, filename: &str) -> String {
        let Ok(mut url) = reqwest::Url::parse(&self.url("/uploads/")) else {
            return self.url(&format!("/uploads/{filename}"));
        };
        // push percent-encodes the name as a single segment
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(filename);
        }
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let service = HttpImageService::new("http://localhost:3000/").unwrap();
        assert_eq!(service.base_url(), "http://localhost:3000");
        assert_eq!(
            service.file_url("1-abc-photo.png"),
            "http://localhost:3000/uploads/1-abc-photo.png"
        );
    }

    #[test]
    fn test_file_url_encodes_the_name() {
        let service = HttpImageService::new("http://localhost:3000").unwrap();
        assert_eq!(
            service.file_url("my pic#1.png"),
            "http://localhost:3000/uploads/my%20pic%231.png"
        );
        assert_eq!(
            service.file_url("a?b/c.png"),
            "http://localhost:3000/uploads/a%3Fb%2Fc.png"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        // Grab a free port, then close it again
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = HttpImageService::new(format!("http://{addr}")).unwrap();
        let err = service.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
