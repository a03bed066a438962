use crate::model::ProductWithTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: i32,
    pub product_name: String,
    pub material_id: i32,
    pub material_name: String,
    pub type_id: i32,
    pub type_name: String,
    pub min_price: f64,
    pub article: String,
    pub total_production_time: f64,
}

impl From<ProductWithTime> for ProductResponse {
    fn from(value: ProductWithTime) -> Self {
        ProductResponse {
            id: value.id,
            product_name: value.product_name,
            material_id: value.material_id,
            material_name: value.material_name,
            type_id: value.type_id,
            type_name: value.type_name,
            min_price: value.min_price,
            article: value.article,
            total_production_time: value.total_production_time,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub count: usize,
}

impl From<Vec<ProductResponse>> for ProductListResponse {
    fn from(products: Vec<ProductResponse>) -> Self {
        let count = products.len();
        Self { products, count }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct MessageResponse {
    pub message: String,
}
