use crate::model::{Material, ProductType, Workshop};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct MaterialResponse {
    pub id: i32,
    pub material_name: String,
    pub waste_percentage: f64,
}

impl From<Material> for MaterialResponse {
    fn from(value: Material) -> Self {
        MaterialResponse {
            id: value.id,
            material_name: value.material_name,
            waste_percentage: value.waste_percentage,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductTypeResponse {
    pub id: i32,
    pub type_name: String,
    pub ratio: f64,
}

impl From<ProductType> for ProductTypeResponse {
    fn from(value: ProductType) -> Self {
        ProductTypeResponse {
            id: value.id,
            type_name: value.type_name,
            ratio: value.ratio,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct WorkshopResponse {
    pub id: i32,
    pub name: String,
    pub kind: String,
}

impl From<Workshop> for WorkshopResponse {
    fn from(value: Workshop) -> Self {
        WorkshopResponse {
            id: value.id,
            name: value.name,
            kind: value.kind,
        }
    }
}
