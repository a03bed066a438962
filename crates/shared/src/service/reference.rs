use crate::{
    abstract_trait::{DynReferenceQueryRepository, ReferenceQueryServiceTrait},
    domain::responses::{MaterialResponse, ProductTypeResponse, WorkshopResponse},
    errors::ServiceError,
    service::Operation,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;

#[derive(Clone)]
pub struct ReferenceQueryService {
    pub query: DynReferenceQueryRepository,
    pub metrics: Metrics,
}

impl ReferenceQueryService {
    pub fn new(query: DynReferenceQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "reference_query_service");

        Self { query, metrics }
    }
}

#[async_trait]
impl ReferenceQueryServiceTrait for ReferenceQueryService {
    async fn find_materials(&self) -> Result<Vec<MaterialResponse>, ServiceError> {
        let operation = Operation::start(&self.metrics, Method::Get, "find_materials");

        match self.query.find_materials().await {
            Ok(materials) => {
                operation.success(&format!("Retrieved {} materials", materials.len()));
                Ok(materials.into_iter().map(MaterialResponse::from).collect())
            }
            Err(err) => {
                operation.failure(&format!("Failed to fetch materials: {err}"));
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_product_types(&self) -> Result<Vec<ProductTypeResponse>, ServiceError> {
        let operation = Operation::start(&self.metrics, Method::Get, "find_product_types");

        match self.query.find_product_types().await {
            Ok(types) => {
                operation.success(&format!("Retrieved {} product types", types.len()));
                Ok(types.into_iter().map(ProductTypeResponse::from).collect())
            }
            Err(err) => {
                operation.failure(&format!("Failed to fetch product types: {err}"));
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_workshops(&self) -> Result<Vec<WorkshopResponse>, ServiceError> {
        let operation = Operation::start(&self.metrics, Method::Get, "find_workshops");

        match self.query.find_workshops().await {
            Ok(workshops) => {
                operation.success(&format!("Retrieved {} workshops", workshops.len()));
                Ok(workshops.into_iter().map(WorkshopResponse::from).collect())
            }
            Err(err) => {
                operation.failure(&format!("Failed to fetch workshops: {err}"));
                Err(ServiceError::Repo(err))
            }
        }
    }
}
