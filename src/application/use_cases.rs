pub mod capture_session;
pub mod list_images;
pub mod run_server;
pub mod upload_image;

pub use capture_session::CaptureController;
pub use list_images::ListImagesUseCase;
pub use run_server::RunServerUseCase;
pub use upload_image::{UploadError, UploadImageUseCase};
