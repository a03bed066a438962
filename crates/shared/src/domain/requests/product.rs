use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "product_name is required"))]
    #[schema(example = "Widget")]
    pub product_name: String,

    #[serde(default)]
    #[validate(range(min = 1, message = "material_id is required"))]
    #[schema(example = 1)]
    pub material_id: i32,

    #[serde(default)]
    #[validate(range(min = 1, message = "type_id is required"))]
    #[schema(example = 1)]
    pub type_id: i32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "min_price cannot be negative"))]
    #[schema(example = 9.99)]
    pub min_price: f64,

    #[serde(default)]
    #[schema(example = "W-1")]
    pub article: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WorkshopTimeRequest {
    #[validate(range(min = 1, message = "workshop_id is required"))]
    #[schema(example = 1)]
    pub workshop_id: i32,

    #[validate(range(min = 0.0, message = "production_time cannot be negative"))]
    #[schema(example = 2.5)]
    pub production_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductWithWorkshopsRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub product: CreateProductRequest,

    #[serde(default)]
    #[validate(nested)]
    pub workshops: Vec<WorkshopTimeRequest>,
}
