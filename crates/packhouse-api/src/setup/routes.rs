//! Route configuration and setup

use crate::constants::OPENAPI_JSON_PATH;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use packhouse_core::constants::UPLOADS_URL_PREFIX;
use packhouse_core::Config;
use packhouse_infra::request_id_middleware;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/packers",
            get(handlers::packers::list_packers).post(handlers::packers::create_packer),
        )
        .route(
            "/packers/{id}",
            put(handlers::packers::replace_packer)
                .patch(handlers::packers::update_packer)
                .delete(handlers::packers::delete_packer),
        )
        .route("/orders", get(handlers::orders::list_orders))
        .route(
            "/notifications/whatsapp",
            post(handlers::notifications::send_whatsapp),
        )
        .route("/notifications/sms", post(handlers::notifications::send_sms))
        .route(
            "/notifications/low-stock",
            post(handlers::notifications::send_low_stock_alerts),
        )
        .route("/upload", post(handlers::upload::upload_file))
        .route("/events", get(handlers::events::stream_events))
        .with_state(state);

    // Multipart uploads exceed axum's 2 MB default; the explicit limit takes over.
    let body_limit = config.max_upload_size_bytes();

    let app = api_routes
        .route(
            OPENAPI_JSON_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_JSON_PATH).path("/docs"))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(config.upload_dir()))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware));

    tracing::info!(body_limit_bytes = body_limit, "Routes configured");

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins - not recommended for production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
