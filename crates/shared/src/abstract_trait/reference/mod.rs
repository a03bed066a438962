use crate::{
    domain::responses::{MaterialResponse, ProductTypeResponse, WorkshopResponse},
    errors::{RepositoryError, ServiceError},
    model::{Material, ProductType, Workshop},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynReferenceQueryRepository = Arc<dyn ReferenceQueryRepositoryTrait + Send + Sync>;
pub type DynReferenceQueryService = Arc<dyn ReferenceQueryServiceTrait + Send + Sync>;

/// Read access to the lookup tables products point at.
#[async_trait]
pub trait ReferenceQueryRepositoryTrait {
    async fn find_materials(&self) -> Result<Vec<Material>, RepositoryError>;
    async fn find_product_types(&self) -> Result<Vec<ProductType>, RepositoryError>;
    async fn find_workshops(&self) -> Result<Vec<Workshop>, RepositoryError>;

    /// Case-insensitive exact match on `material_name`.
    async fn find_material_id_by_name(&self, name: &str) -> Result<Option<i32>, RepositoryError>;

    /// Case-insensitive exact match on `type_name`.
    async fn find_type_id_by_name(&self, name: &str) -> Result<Option<i32>, RepositoryError>;
}

#[async_trait]
pub trait ReferenceQueryServiceTrait {
    async fn find_materials(&self) -> Result<Vec<MaterialResponse>, ServiceError>;
    async fn find_product_types(&self) -> Result<Vec<ProductTypeResponse>, ServiceError>;
    async fn find_workshops(&self) -> Result<Vec<WorkshopResponse>, ServiceError>;
}
