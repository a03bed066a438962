use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub material_id: i32,
    pub type_id: i32,
    pub min_price: f64,
    pub article: String,
}

/// One row of `products_workshop`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductWorkshop {
    pub id: i32,
    pub product_id: i32,
    pub workshop_id: i32,
    pub production_time: f64,
}

/// Product joined with its material and type names, plus the summed
/// production time over all of its workshop links.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductWithTime {
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
