pub mod image_service_client;

pub use image_service_client::HttpImageService;
