use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use shared::{
    abstract_trait::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::{CreateProductRequest, CreateProductWithWorkshopsRequest},
        responses::{MessageResponse, ProductListResponse, ProductResponse},
    },
    errors::{ErrorResponse, HttpError},
    utils::parse_id,
};
use std::sync::Arc;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;

fn product_id(raw: &str) -> Result<i32, HttpError> {
    parse_id(raw).ok_or_else(|| HttpError::BadRequest("Invalid product ID".into()))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    responses(
        (status = 200, description = "All products with their total production time", body = ProductListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_all().await.map_err(|err| {
        error!("❌ Failed to list products: {err}");
        HttpError::from(err)
    })?;

    Ok((StatusCode::OK, Json(ProductListResponse::from(products))))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 400, description = "Invalid product ID", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = product_id(&id)?;

    let product = service.find_by_id(id).await.map_err(|err| {
        error!("❌ Failed to fetch product {id}: {err}");
        HttpError::from(err)
    })?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 500, description = "Insert or read-back failed", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.create_product(&body).await.map_err(|err| {
        error!("❌ Failed to create product {}: {err}", body.product_name);
        HttpError::from(err)
    })?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    post,
    path = "/api/products/with-workshops",
    tag = "Product",
    request_body = CreateProductWithWorkshopsRequest,
    responses(
        (status = 201, description = "Product and workshop links created", body = ProductResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 500, description = "Transaction rolled back", body = ErrorResponse)
    )
)]
pub async fn create_product_with_workshops(
    Extension(service): Extension<DynProductCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductWithWorkshopsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service
        .create_product_with_workshops(&body)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create product {} with workshops: {err}",
                body.product.product_name
            );
            HttpError::from(err)
        })?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Invalid product ID", body = ErrorResponse),
        (status = 502, description = "Nothing was deleted", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = product_id(&id)?;

    service.delete_product(id).await.map_err(|err| {
        error!("❌ Failed to delete product {id}: {err}");
        HttpError::BadGateway(format!("Failed to delete product {id}"))
    })?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Product deleted successfully".into(),
        }),
    ))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let products = &app_state.di_container.product_service;

    OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products", post(create_product))
        .route(
            "/api/products/with-workshops",
            post(create_product_with_workshops),
        )
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/{id}", delete(delete_product))
        .layer(Extension(products.query.clone()))
        .layer(Extension(products.command.clone()))
}
