use crate::state::AppState;
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::DynReferenceQueryService,
    domain::responses::{MaterialResponse, ProductTypeResponse, WorkshopResponse},
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/materials",
    tag = "Reference",
    responses(
        (status = 200, description = "Materials ordered by name", body = Vec<MaterialResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_materials(
    Extension(service): Extension<DynReferenceQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let materials = service.find_materials().await.map_err(|err| {
        error!("❌ Failed to list materials: {err}");
        HttpError::from(err)
    })?;

    Ok((StatusCode::OK, Json(materials)))
}

#[utoipa::path(
    get,
    path = "/api/product-types",
    tag = "Reference",
    responses(
        (status = 200, description = "Product types ordered by name", body = Vec<ProductTypeResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product_types(
    Extension(service): Extension<DynReferenceQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let types = service.find_product_types().await.map_err(|err| {
        error!("❌ Failed to list product types: {err}");
        HttpError::from(err)
    })?;

    Ok((StatusCode::OK, Json(types)))
}

#[utoipa::path(
    get,
    path = "/api/workshops",
    tag = "Reference",
    responses(
        (status = 200, description = "Workshops ordered by name", body = Vec<WorkshopResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_workshops(
    Extension(service): Extension<DynReferenceQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let workshops = service.find_workshops().await.map_err(|err| {
        error!("❌ Failed to list workshops: {err}");
        HttpError::from(err)
    })?;

    Ok((StatusCode::OK, Json(workshops)))
}

pub fn reference_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/materials", get(get_materials))
        .route("/api/product-types", get(get_product_types))
        .route("/api/workshops", get(get_workshops))
        .layer(Extension(app_state.di_container.reference_service.clone()))
}
