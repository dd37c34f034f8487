use super::{
    ImageState, embedded_assets::serve_asset, error_response::handle_panic, list_images,
    upload_image,
};
use crate::config::ServerConfig;
use crate::domain::image::ImageRepository;
use crate::infrastructure::storage::FilesystemImageRepository;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::info;

/// Build the full application router
///
/// `uploads_dir` must be the same directory `state` stores into.
pub fn build_router(state: Arc<ImageState>, uploads_dir: &Path, body_limit: usize) -> Router {
    let router = Router::new()
        .route("/upload", post(upload_image))
        .route("/files", get(list_images))
        .with_state(state)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        // Everything else is the UI
        .fallback(serve_asset);

    with_middleware(router, body_limit)
}

/// Tracing, panic recovery, body limit and CORS around every route
fn with_middleware(router: Router, body_limit: usize) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(CorsLayer::permissive()),
    )
}

pub async fn create_server(config: ServerConfig) -> anyhow::Result<()> {
    info!(
        "Starting camera-uploader {} ({} build, {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP")
    );

    let addr = config.socket_addr()?;

    // The service cannot run without its storage root
    let repository = Arc::new(FilesystemImageRepository::new(&config.uploads_dir));
    repository.ensure_root().await?;
    info!("Storing uploads in {}", config.uploads_dir.display());

    let state = Arc::new(ImageState::new(repository));
    let app = build_router(state, &config.uploads_dir, config.body_limit);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn exploding_handler() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_json_500() {
        let router = with_middleware(Router::new().route("/boom", get(exploding_handler)), 1024);

        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&bytes).unwrap(),
            serde_json::json!({"success": false, "message": "An error occurred."})
        );
    }
}
