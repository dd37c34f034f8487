//! クライアント側の撮影・アップロードフロー
//!
//! 1 つのコントローラが撮影状態、現在の通知、表示中のギャラリーを所有し、
//! ユーザー操作はすべて明示的な状態遷移になる

use crate::domain::capture::{
    AcquiredImage, AcquisitionError, AcquisitionMode, CaptureError, CaptureState, ImageService,
    ImageSource, Notice, NoticeBoard, ServiceError,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    State(#[from] CaptureError),
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub struct CaptureController<S> {
    service: S,
    state: CaptureState,
    notices: NoticeBoard,
    /// 最後に取得に成功した一覧の公開 URL
    gallery: Vec<String>,
}

impl<S: ImageService> CaptureController<S> {
    pub fn new(service: S) -> Self {
        Self::with_notices(service, NoticeBoard::default())
    }

    pub fn with_notices(service: S, notices: NoticeBoard) -> Self {
        Self {
            service,
            state: CaptureState::Idle,
            notices,
            gallery: Vec::new(),
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn gallery(&self) -> &[String] {
        &self.gallery
    }

    pub fn pending_image(&self) -> Option<&AcquiredImage> {
        self.state.pending_image()
    }

    pub fn current_notice(&mut self) -> Option<&Notice> {
        self.notices.current()
    }

    /// `source` から画像を取得し、アップロード用に保持する
    pub async fn acquire(&mut self, source: &dyn ImageSource) -> Result<(), ControllerError> {
        let mode = source.mode();
        if let Err(e) = self.state.start_preview(mode) {
            self.notices.danger(e.to_string());
            return Err(e.into());
        }

        match source.acquire().await {
            Ok(image) => {
                info!("Acquired {:?} via {}", image, mode);
                self.state.capture(image)?;
                let message = match mode {
                    AcquisitionMode::Camera => "Image captured. Ready to upload.",
                    _ => "Image selected. Ready to upload.",
                };
                self.notices.info(message);
                Ok(())
            }
            Err(e) => {
                self.state.cancel_preview()?;
                let message = match mode {
                    AcquisitionMode::Camera => format!("Error accessing camera: {e}"),
                    _ => format!("Error selecting image: {e}"),
                };
                warn!("{}", message);
                self.notices.danger(message);
                Err(e.into())
            }
        }
    }

    /// 保持中の画像をアップロードし、成功したら破棄してギャラリーを再読み込みする
    pub async fn submit(&mut self) -> Result<String, ControllerError> {
        let image = match self.state.begin_upload() {
            Ok(image) => image,
            Err(e) => {
                self.notices.danger(e.to_string());
                return Err(e.into());
            }
        };

        self.notices.info("Uploading image...");
        match self.service.upload(&image).await {
            Ok(message) => {
                self.state.upload_succeeded()?;
                info!("Uploaded {}: {}", image.filename, message);
                self.notices.success("Image uploaded successfully!");
                // 再読み込みの失敗は自身で通知を出し、古いギャラリーを残す
                let _ = self.reload_gallery().await;
                Ok(message)
            }
            Err(e) => {
                let message = match (e.server_message(), &e) {
                    (Some(message), _) => message.to_string(),
                    (None, ServiceError::Transport(_)) => format!("Error uploading image: {e}"),
                    (None, _) => "Upload failed. Try again.".to_string(),
                };
                warn!("Upload of {} failed: {}", image.filename, e);
                self.state.upload_failed(message.clone())?;
                self.notices.danger(message);
                Err(e.into())
            }
        }
    }

    /// 一覧を取得してギャラリーを置き換える
    pub async fn refresh_listing(&mut self) -> Result<&[String], ControllerError> {
        self.reload_gallery().await?;
        self.notices.success("Fetched images from server.");
        Ok(&self.gallery)
    }

    async fn reload_gallery(&mut self) -> Result<(), ControllerError> {
        match self.service.list().await {
            Ok(files) => {
                self.gallery = files
                    .iter()
                    .map(|file| self.service.file_url(file))
                    .collect();
                Ok(())
            }
            Err(e) => {
                self.notices.danger(format!("Error fetching images: {e}"));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capture::NoticeKind;
    use crate::domain::image::ContentType;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted service: pops one canned reply per call
    #[derive(Default)]
    struct ScriptedService {
        uploads: Mutex<Vec<Result<String, ServiceError>>>,
        listings: Mutex<Vec<Result<Vec<String>, ServiceError>>>,
        uploaded: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn upload_reply(self, reply: Result<String, ServiceError>) -> Self {
            self.uploads.lock().unwrap().insert(0, reply);
            self
        }

        fn listing_reply(self, reply: Result<Vec<String>, ServiceError>) -> Self {
            self.listings.lock().unwrap().insert(0, reply);
            self
        }
    }

    #[async_trait]
    impl ImageService for ScriptedService {
        async fn upload(&self, image: &AcquiredImage) -> Result<String, ServiceError> {
            self.uploaded.lock().unwrap().push(image.filename.clone());
            self.uploads
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ServiceError::Transport("no reply".to_string())))
        }

        async fn list(&self) -> Result<Vec<String>, ServiceError> {
            self.listings
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ServiceError::Transport("no reply".to_string())))
        }

        fn file_url(&self, filename: &str) -> String {
            format!("http://server/uploads/{filename}")
        }
    }

    struct StaticSource(Result<AcquiredImage, fn() -> AcquisitionError>, AcquisitionMode);

    #[async_trait]
    impl ImageSource for StaticSource {
        fn mode(&self) -> AcquisitionMode {
            self.1
        }

        async fn acquire(&self) -> Result<AcquiredImage, AcquisitionError> {
            self.0.clone().map_err(|make| make())
        }
    }

    fn png() -> AcquiredImage {
        AcquiredImage::new("captured_image.png", ContentType::new("image/png"), vec![1, 2])
    }

    fn camera_ok() -> StaticSource {
        StaticSource(Ok(png()), AcquisitionMode::Camera)
    }

    fn server_error() -> ServiceError {
        ServiceError::Rejected {
            status: 500,
            message: "An error occurred.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_capture_upload_and_refresh() {
        let service = ScriptedService::default()
            .upload_reply(Ok("File uploaded successfully.".to_string()))
            .listing_reply(Ok(vec!["1-a-captured_image.png".to_string()]));
        let mut controller = CaptureController::new(service);

        controller.acquire(&camera_ok()).await.unwrap();
        assert_eq!(controller.state().name(), "captured");
        assert_eq!(
            controller.current_notice().unwrap().message,
            "Image captured. Ready to upload."
        );

        let message = controller.submit().await.unwrap();
        assert_eq!(message, "File uploaded successfully.");
        assert_eq!(controller.state(), &CaptureState::Done);
        assert!(controller.pending_image().is_none());
        assert_eq!(
            controller.gallery(),
            ["http://server/uploads/1-a-captured_image.png".to_string()]
        );
        let notice = controller.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "Image uploaded successfully!");
    }

    #[tokio::test]
    async fn test_server_error_keeps_gallery_and_image() {
        let service = ScriptedService::default()
            .listing_reply(Ok(vec!["old.png".to_string()]))
            .upload_reply(Err(server_error()));
        let mut controller = CaptureController::new(service);

        controller.refresh_listing().await.unwrap();
        controller.acquire(&camera_ok()).await.unwrap();

        let err = controller.submit().await.unwrap_err();
        assert!(matches!(err, ControllerError::Service(_)));

        let notice = controller.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Danger);
        assert_eq!(notice.message, "An error occurred.");
        assert_eq!(controller.gallery(), ["http://server/uploads/old.png".to_string()]);
        assert_eq!(controller.state().name(), "failed");
        assert_eq!(controller.pending_image(), Some(&png()));
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let service = ScriptedService::default()
            .upload_reply(Err(ServiceError::Transport("connection reset".to_string())))
            .upload_reply(Ok("File uploaded successfully.".to_string()))
            .listing_reply(Ok(Vec::new()));
        let mut controller = CaptureController::new(service);

        controller.acquire(&camera_ok()).await.unwrap();
        assert!(controller.submit().await.is_err());
        assert!(
            controller
                .current_notice()
                .unwrap()
                .message
                .starts_with("Error uploading image:")
        );

        controller.submit().await.unwrap();
        assert_eq!(controller.state(), &CaptureState::Done);
        assert_eq!(controller.service.uploaded.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_without_image() {
        let mut controller = CaptureController::new(ScriptedService::default());

        let err = controller.submit().await.unwrap_err();

        assert!(matches!(
            err,
            ControllerError::State(CaptureError::NothingToUpload)
        ));
        assert_eq!(controller.current_notice().unwrap().message, "No image to upload.");
        assert!(controller.service.uploaded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_gallery_untouched() {
        let service = ScriptedService::default()
            .listing_reply(Ok(vec!["a.png".to_string()]))
            .listing_reply(Err(server_error()));
        let mut controller = CaptureController::new(service);

        controller.refresh_listing().await.unwrap();
        assert!(controller.refresh_listing().await.is_err());

        assert_eq!(controller.gallery(), ["http://server/uploads/a.png".to_string()]);
        assert!(
            controller
                .current_notice()
                .unwrap()
                .message
                .starts_with("Error fetching images:")
        );
    }

    #[tokio::test]
    async fn test_camera_error_returns_to_idle() {
        let source = StaticSource(
            Err(|| AcquisitionError::DeviceUnavailable("permission denied".to_string())),
            AcquisitionMode::Camera,
        );
        let mut controller = CaptureController::new(ScriptedService::default());

        assert!(controller.acquire(&source).await.is_err());

        assert_eq!(controller.state(), &CaptureState::Idle);
        assert_eq!(
            controller.current_notice().unwrap().message,
            "Error accessing camera: Capture device unavailable: permission denied"
        );
    }
}
