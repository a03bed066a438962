use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductType {
    pub id: i32,
    pub type_name: String,
    pub ratio: f64,
}
