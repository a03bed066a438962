use crate::{
    domain::{
        requests::{CreateProductRequest, CreateProductWithWorkshopsRequest, WorkshopTimeRequest},
        responses::ProductResponse,
    },
    errors::{RepositoryError, ServiceError},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts a single product row and returns its generated id.
    async fn create_product(&self, req: &CreateProductRequest) -> Result<i32, RepositoryError>;

    /// Inserts the product and every workshop link in one transaction.
    /// Either all rows are persisted or none are.
    async fn create_product_with_workshops(
        &self,
        req: &CreateProductRequest,
        workshops: &[WorkshopTimeRequest],
    ) -> Result<i32, RepositoryError>;

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn create_product_with_workshops(
        &self,
        req: &CreateProductWithWorkshopsRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn delete_product(&self, id: i32) -> Result<(), ServiceError>;
}
