use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, ProductCommandServiceTrait,
    },
    domain::{
        requests::{CreateProductRequest, CreateProductWithWorkshopsRequest},
        responses::ProductResponse,
    },
    errors::ServiceError,
    service::Operation,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        command: DynProductCommandRepository,
        query: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self {
            command,
            query,
            metrics,
        }
    }

    async fn read_back(&self, product_id: i32) -> Result<ProductResponse, ServiceError> {
        match self.query.find_by_id(product_id).await {
            Ok(Some(product)) => Ok(ProductResponse::from(product)),
            Ok(None) => {
                error!("❌ Product {product_id} vanished right after creation");
                Err(ServiceError::Internal(
                    "Product created, but its data could not be read back".to_string(),
                ))
            }
            Err(err) => {
                error!("❌ Failed to read back product {product_id}: {err:?}");
                Err(ServiceError::Internal(
                    "Product created, but its data could not be read back".to_string(),
                ))
            }
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating new Product: {}", req.product_name);

        req.validate()?;

        let operation = Operation::start(&self.metrics, Method::Post, "create_product");

        let product_id = match self.command.create_product(req).await {
            Ok(id) => id,
            Err(err) => {
                operation.failure(&format!("Failed to create product: {err}"));
                return Err(ServiceError::Repo(err));
            }
        };

        operation.success("Product created successfully");

        self.read_back(product_id).await
    }

    async fn create_product_with_workshops(
        &self,
        req: &CreateProductWithWorkshopsRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!(
            "🏗️ Creating new Product {} with {} workshop(s)",
            req.product.product_name,
            req.workshops.len()
        );

        req.validate()?;

        let operation =
            Operation::start(&self.metrics, Method::Post, "create_product_with_workshops");

        let product_id = match self
            .command
            .create_product_with_workshops(&req.product, &req.workshops)
            .await
        {
            Ok(id) => id,
            Err(err) => {
                operation.failure(&format!("Transactional create failed: {err}"));
                return Err(ServiceError::Repo(err));
            }
        };

        operation.success("Product and workshop links created successfully");

        self.read_back(product_id).await
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        info!("💀 Deleting Product with ID: {id}");

        let operation = Operation::start(&self.metrics, Method::Delete, "delete_product");

        match self.command.delete_product(id).await {
            Ok(()) => {
                operation.success("Product deleted");
                Ok(())
            }
            Err(err) => {
                operation.failure(&format!("Failed to delete product {id}: {err}"));
                Err(ServiceError::Repo(err))
            }
        }
    }
}
