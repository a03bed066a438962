use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, DynReferenceQueryRepository,
        DynReferenceQueryService,
    },
    config::ConnectionPool,
    repository::{ProductRepository, ReferenceQueryRepository},
    service::{ProductService, ReferenceQueryService},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_service: ProductService,
    pub reference_service: DynReferenceQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_service", &self.product_service)
            .field("reference_service", &"ReferenceQueryService")
            .finish()
    }
}

/// Repositories the services are built on. Production code fills it from a
/// pool; tests pass in-memory implementations.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub reference_query: DynReferenceQueryRepository,
}

impl DependenciesInjectDeps {
    pub fn from_pool(pool: ConnectionPool) -> Self {
        let product = ProductRepository::new(pool.clone());
        let reference_query =
            Arc::new(ReferenceQueryRepository::new(pool)) as DynReferenceQueryRepository;

        Self {
            product_query: product.query,
            product_command: product.command,
            reference_query,
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            product_query,
            product_command,
            reference_query,
        } = deps;

        let product_service = ProductService::new(product_query, product_command, registry);

        let reference_service =
            Arc::new(ReferenceQueryService::new(reference_query, registry)) as DynReferenceQueryService;

        Self {
            product_service,
            reference_service,
        }
    }
}
