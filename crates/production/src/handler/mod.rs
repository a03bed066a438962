mod product;
mod reference;
mod web;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::product::product_routes;
pub use self::reference::reference_routes;
pub use self::web::{HtmlTemplate, ProductForm, web_routes};

#[derive(OpenApi)]
#[openapi(
    paths(
        product::get_products,
        product::get_product,
        product::create_product,
        product::create_product_with_workshops,
        product::delete_product,

        reference::get_materials,
        reference::get_product_types,
        reference::get_workshops,
    ),
    tags(
        (name = "Product", description = "Product endpoints"),
        (name = "Reference", description = "Materials, product types and workshops"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(product_routes(shared_state.clone()))
            .merge(reference_routes(shared_state.clone()));

        let (app_router, api) = api_router.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .merge(web_routes(shared_state))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server terminated with an error")?;

        Ok(())
    }
}
