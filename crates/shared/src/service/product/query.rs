use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::responses::ProductResponse,
    errors::{RepositoryError, ServiceError},
    service::Operation,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tracing::info;

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Finding all products");

        let operation = Operation::start(&self.metrics, Method::Get, "product_find_all");

        let products = match self.query.find_all().await {
            Ok(products) => products,
            Err(err) => {
                operation.failure(&format!("Failed to fetch products: {err}"));
                return Err(ServiceError::Repo(err));
            }
        };

        operation.success(&format!("Retrieved {} products", products.len()));

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let operation = Operation::start(&self.metrics, Method::Get, "product_find_by_id");

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                operation.success("Product retrieved");
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                operation.failure(&format!("Product {id} not found"));
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(err) => {
                operation.failure(&format!("Failed to fetch product {id}: {err}"));
                Err(ServiceError::Repo(err))
            }
        }
    }
}
