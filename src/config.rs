//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listening port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Default directory holding accepted uploads
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Default maximum request body size (10 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Everything the upload service needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Storage root for uploaded images
    pub uploads_dir: PathBuf,
    /// Maximum accepted request body in bytes
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            uploads_dir: uploads_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}
