pub mod filesystem_image_repository;

pub use filesystem_image_repository::FilesystemImageRepository;
