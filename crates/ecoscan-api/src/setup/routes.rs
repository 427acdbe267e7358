//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Json, Router,
};
use ecoscan_core::{Config, UploadFolder};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::error_detail_scope;
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = api_routes(config)
        .merge(static_routes(&state))
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_detail_scope,
        ))
        // Server-level concurrency limit to protect against resource exhaustion under extreme load
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn api_routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::image_upload::upload_image))
        .route(
            "/upload-product1",
            post(handlers::image_upload::upload_product1),
        )
        .route(
            "/upload-product2",
            post(handlers::image_upload::upload_product2),
        )
        .route(
            "/upload/{folder}",
            post(handlers::image_upload::upload_to_folder),
        )
        .route(
            "/folder-status/{folder}",
            get(handlers::folder_status::folder_status),
        )
        .route(
            "/api/get-eco-score",
            post(handlers::eco_score::get_eco_score),
        )
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        // Enforced while the body streams, never from Content-Length, so an oversized
        // upload surfaces as a multipart error and gets the JSON 400
        .layer(DefaultBodyLimit::max(config.max_request_body_bytes()))
}

/// Serve each upload folder at `/<folder>` so returned `fileUrl`s resolve.
fn static_routes(state: &AppState) -> Router<Arc<AppState>> {
    UploadFolder::ALL
        .iter()
        .fold(Router::new(), |router, folder| {
            router.nest_service(
                &format!("/{}", folder.as_str()),
                ServeDir::new(state.slots.directory(*folder)),
            )
        })
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
