mod product;
mod reference;

pub use self::product::{ProductCommandService, ProductQueryService, ProductService};
pub use self::reference::ReferenceQueryService;

use crate::utils::{Method, Metrics, Status};
use tokio::time::Instant;
use tracing::{error, info};

/// Timing handle for one service call; records into the service's metrics
/// when completed.
pub(crate) struct Operation<'a> {
    metrics: &'a Metrics,
    method: Method,
    name: &'static str,
    start_time: Instant,
}

impl<'a> Operation<'a> {
    pub(crate) fn start(metrics: &'a Metrics, method: Method, name: &'static str) -> Self {
        info!("Starting operation: {name}");
        Self {
            metrics,
            method,
            name,
            start_time: Instant::now(),
        }
    }

    pub(crate) fn success(self, message: &str) {
        info!("✅ Operation {} completed successfully: {message}", self.name);
        self.finish(Status::Success);
    }

    pub(crate) fn failure(self, message: &str) {
        error!("❌ Operation {} failed: {message}", self.name);
        self.finish(Status::Error);
    }

    fn finish(self, status: Status) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        self.metrics.record(self.method, status, elapsed);
    }
}
