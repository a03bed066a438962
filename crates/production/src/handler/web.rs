//! Server-rendered pages for browsers. Forms post back here and the
//! outcome is carried to the product list through `?message=` / `?error=`.

use crate::state::AppState;
use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use shared::{
    domain::{
        requests::{CreateProductRequest, CreateProductWithWorkshopsRequest, WorkshopTimeRequest},
        responses::{MaterialResponse, ProductResponse, ProductTypeResponse, WorkshopResponse},
    },
    errors::ServiceError,
    utils::{parse_decimal, parse_id},
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct HtmlTemplate<T>(pub StatusCode, pub T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.1.render() {
            Ok(html) => (self.0, Html(html)).into_response(),
            Err(err) => {
                error!("❌ Failed to render template: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render template",
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub products: Vec<ProductResponse>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "products_new.html")]
pub struct ProductFormTemplate {
    pub materials: Vec<MaterialResponse>,
    pub types: Vec<ProductTypeResponse>,
    pub workshops: Vec<WorkshopResponse>,
    pub form: ProductForm,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Raw form fields. `workshop_id` and `production_time` repeat once per
/// workshop row and are paired by position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub material_id: String,
    #[serde(default)]
    pub type_id: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub article: String,
    #[serde(default)]
    pub workshop_id: Vec<String>,
    #[serde(default)]
    pub production_time: Vec<String>,
}

impl ProductForm {
    pub fn to_request(&self) -> Result<CreateProductWithWorkshopsRequest, String> {
        let min_price = if self.min_price.trim().is_empty() {
            0.0
        } else {
            parse_decimal(&self.min_price)
                .ok_or_else(|| format!("min_price is not a number: {}", self.min_price))?
        };

        let workshops = self
            .workshop_id
            .iter()
            .zip(&self.production_time)
            .filter_map(|(id, time)| {
                let workshop_id = parse_id(id)?;
                let production_time = parse_decimal(time)?;
                (workshop_id > 0 && production_time > 0.0).then_some(WorkshopTimeRequest {
                    workshop_id,
                    production_time,
                })
            })
            .collect();

        Ok(CreateProductWithWorkshopsRequest {
            product: CreateProductRequest {
                product_name: self.product_name.trim().to_string(),
                material_id: parse_id(&self.material_id).unwrap_or(0),
                type_id: parse_id(&self.type_id).unwrap_or(0),
                min_price,
                article: self.article.trim().to_string(),
            },
            workshops,
        })
    }

    pub fn selected_material(&self) -> i32 {
        parse_id(&self.material_id).unwrap_or(0)
    }

    pub fn selected_type(&self) -> i32 {
        parse_id(&self.type_id).unwrap_or(0)
    }

    /// Production time submitted for `workshop_id`, empty when none was.
    pub fn time_for(&self, workshop_id: i32) -> &str {
        self.workshop_id
            .iter()
            .position(|id| parse_id(id) == Some(workshop_id))
            .and_then(|index| self.production_time.get(index))
            .map_or("", String::as_str)
    }
}

fn redirect_with(key: &str, text: &str) -> Redirect {
    match serde_urlencoded::to_string([(key, text)]) {
        Ok(query) => Redirect::to(&format!("/?{query}")),
        Err(err) => {
            warn!("⚠️ Failed to encode redirect query: {err}");
            Redirect::to("/")
        }
    }
}

fn failure_text(err: &ServiceError) -> String {
    match err {
        ServiceError::Validation(messages) => messages.join("; "),
        other => other.to_string(),
    }
}

async fn render_form(
    state: &AppState,
    status: StatusCode,
    form: ProductForm,
    error: Option<String>,
) -> Response {
    let references = &state.di_container.reference_service;

    let materials = references.find_materials().await.unwrap_or_else(|err| {
        warn!("⚠️ Materials unavailable for the product form: {err}");
        Vec::new()
    });
    let types = references.find_product_types().await.unwrap_or_else(|err| {
        warn!("⚠️ Product types unavailable for the product form: {err}");
        Vec::new()
    });
    let workshops = references.find_workshops().await.unwrap_or_else(|err| {
        warn!("⚠️ Workshops unavailable for the product form: {err}");
        Vec::new()
    });

    HtmlTemplate(
        status,
        ProductFormTemplate {
            materials,
            types,
            workshops,
            form,
            error,
        },
    )
    .into_response()
}

pub async fn products_page(
    State(state): State<Arc<AppState>>,
    Query(flash): Query<FlashQuery>,
) -> Response {
    match state.di_container.product_service.query.find_all().await {
        Ok(products) => HtmlTemplate(
            StatusCode::OK,
            ProductsTemplate {
                products,
                message: flash.message,
                error: flash.error,
            },
        )
        .into_response(),
        Err(err) => {
            error!("❌ Failed to load products page: {err}");
            HtmlTemplate(
                StatusCode::INTERNAL_SERVER_ERROR,
                ProductsTemplate {
                    products: Vec::new(),
                    message: None,
                    error: Some("Failed to load products".into()),
                },
            )
            .into_response()
        }
    }
}

pub async fn new_product_page(State(state): State<Arc<AppState>>) -> Response {
    render_form(&state, StatusCode::OK, ProductForm::default(), None).await
}

pub async fn create_product_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ProductForm>,
) -> Response {
    let request = match form.to_request() {
        Ok(request) => request,
        Err(message) => {
            warn!("⚠️ Rejected product form: {message}");
            return render_form(
                &state,
                StatusCode::BAD_REQUEST,
                form,
                Some(format!("Failed to create product: {message}")),
            )
            .await;
        }
    };

    match state
        .di_container
        .product_service
        .command
        .create_product_with_workshops(&request)
        .await
    {
        Ok(product) => {
            info!("✅ Product {} created from form", product.id);
            redirect_with("message", "Product created successfully").into_response()
        }
        Err(err) => {
            error!("❌ Failed to create product from form: {err}");
            let message = format!("Failed to create product: {}", failure_text(&err));
            render_form(&state, StatusCode::BAD_REQUEST, form, Some(message)).await
        }
    }
}

pub async fn delete_product_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    let Some(id) = parse_id(&id) else {
        return Redirect::to("/");
    };

    match state
        .di_container
        .product_service
        .command
        .delete_product(id)
        .await
    {
        Ok(()) => redirect_with("message", "Product deleted successfully"),
        Err(err) => {
            error!("❌ Failed to delete product {id} from form: {err}");
            redirect_with("error", "Failed to delete product")
        }
    }
}

pub fn web_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(products_page))
        .route("/products/new", get(new_product_page))
        .route("/products/create", post(create_product_form))
        .route("/products/{id}/delete", post(delete_product_form))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(workshop_id: &[&str], production_time: &[&str]) -> ProductForm {
        ProductForm {
            product_name: " Widget ".into(),
            material_id: "1".into(),
            type_id: "2".into(),
            min_price: "12,50".into(),
            article: "W-1".into(),
            workshop_id: workshop_id.iter().map(|s| s.to_string()).collect(),
            production_time: production_time.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn submitted_times_are_found_by_workshop() {
        let form = form(&["1", "2", "3"], &["2.5", "", "abc"]);

        assert_eq!(form.time_for(1), "2.5");
        assert_eq!(form.time_for(2), "");
        assert_eq!(form.time_for(3), "abc");
        assert_eq!(form.time_for(4), "");
        assert_eq!(ProductForm::default().time_for(1), "");
    }

    #[test]
    fn workshop_rows_pair_by_position_and_drop_blanks() {
        let request = form(&["1", "", "3", "2"], &["2.5", "4", "0", "1,5"])
            .to_request()
            .unwrap();

        let pairs: Vec<(i32, f64)> = request
            .workshops
            .iter()
            .map(|w| (w.workshop_id, w.production_time))
            .collect();
        assert_eq!(pairs, vec![(1, 2.5), (2, 1.5)]);
        assert_eq!(request.product.product_name, "Widget");
        assert_eq!(request.product.min_price, 12.5);
        assert_eq!(request.product.type_id, 2);
    }

    #[test]
    fn unparsable_price_is_reported() {
        let mut raw = form(&[], &[]);
        raw.min_price = "cheap".into();
        assert!(raw.to_request().is_err());
    }

    #[test]
    fn blank_ids_fall_through_to_validation() {
        let mut raw = form(&[], &[]);
        raw.material_id.clear();
        let request = raw.to_request().unwrap();
        assert_eq!(request.product.material_id, 0);
    }
}
