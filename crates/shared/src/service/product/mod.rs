mod command;
mod query;

pub use self::command::ProductCommandService;
pub use self::query::ProductQueryService;

use crate::abstract_trait::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct ProductService {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl fmt::Debug for ProductService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductService")
            .field("query", &"Arc<dyn ProductQueryServiceTrait>")
            .field("command", &"Arc<dyn ProductCommandServiceTrait>")
            .finish()
    }
}

impl ProductService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let query_service =
            Arc::new(ProductQueryService::new(query.clone(), registry)) as DynProductQueryService;
        let command_service = Arc::new(ProductCommandService::new(command, query, registry))
            as DynProductCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}
