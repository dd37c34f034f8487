//! ログ設定
//!
//! クレート全体のコンソール出力、またはローテーションするファイル出力

use std::fs;
use std::path::PathBuf;
use tracing::{Level, debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// ログ設定
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// `RUST_LOG` 未設定時にこのクレートへ適用するレベル
    pub log_level: Level,
    /// 指定時はコンソールではなく、このディレクトリへ日次ローテーションの JSON ログを出力
    pub log_directory: Option<PathBuf>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            log_directory: None,
        }
    }
}

impl DebugConfig {
    /// 開発用の詳細なコンソールログ
    pub fn development() -> Self {
        Self {
            log_level: Level::DEBUG,
            log_directory: None,
        }
    }

    /// 本番用の JSON ファイルログ
    pub fn production(log_directory: impl Into<PathBuf>) -> Self {
        Self {
            log_level: Level::INFO,
            log_directory: Some(log_directory.into()),
        }
    }

    /// `RUST_LOG` 未設定時のフィルタ
    pub fn default_filter(&self) -> String {
        let level = self.log_level.as_str().to_lowercase();
        format!("camera_uploader={level},tower_http={level}")
    }
}

/// グローバルな tracing サブスクライバを設定する
pub fn init_logging(
    config: &DebugConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_filter()))?;

    match &config.log_directory {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, dir, "camera-uploader.log");

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(file_appender)
                .json()
                .try_init()?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .try_init()?;
        }
    }

    info!("ログシステムが初期化されました");
    debug!("ログ設定: {:?}", config);

    Ok(())
}

/// ブロックを実行し、処理時間をログに記録する
#[macro_export]
macro_rules! measure_time {
    ($name:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration = start.elapsed();
        tracing::debug!(
            operation = $name,
            duration_ms = duration.as_millis(),
            "operation finished"
        );
        result
    }};
}

/// エラーとその原因チェーンをログに記録する
pub fn log_error_details(error: &dyn std::error::Error, context: &str) {
    tracing::error!(context = context, error = %error, "request failed");

    let mut cause = error.source();
    let mut depth = 1;
    while let Some(inner) = cause {
        tracing::error!(context, depth, cause = %inner, "caused by");
        cause = inner.source();
        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_default_filter() {
        assert_eq!(
            DebugConfig::default().default_filter(),
            "camera_uploader=info,tower_http=info"
        );
        assert_eq!(
            DebugConfig::development().default_filter(),
            "camera_uploader=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_production_writes_to_directory() {
        let config = DebugConfig::production("/var/log/camera-uploader");
        assert_eq!(
            config.log_directory,
            Some(PathBuf::from("/var/log/camera-uploader"))
        );
        assert!(DebugConfig::development().log_directory.is_none());
    }

    #[test]
    fn test_init_logging_reports_unusable_log_directory() {
        // サブスクライバのエラーは Send + Sync なので `?` で変換できること
        let _: fn(&DebugConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> =
            init_logging;

        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("taken");
        fs::write(&not_a_dir, b"file").unwrap();

        let result = init_logging(&DebugConfig::production(not_a_dir.join("logs")));
        assert!(result.is_err());
    }

    #[traced_test]
    #[test]
    fn test_measure_time_returns_block_value() {
        let result = measure_time!("test_operation", { 40 + 2 });
        assert_eq!(result, 42);
    }

    #[traced_test]
    #[test]
    fn test_log_error_details_walks_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        log_error_details(&inner, "listing");
        assert!(logs_contain("missing dir"));
    }
}
