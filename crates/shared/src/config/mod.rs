mod database;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::myconfig::{Config, DatabaseConfig, parse_bool_flag};
