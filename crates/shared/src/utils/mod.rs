mod logs;
mod metrics;
mod number;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status};
pub use self::number::{parse_decimal, parse_id};
pub use self::shutdown::shutdown_signal;
