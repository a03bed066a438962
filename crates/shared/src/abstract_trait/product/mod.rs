mod service;

pub use self::service::*;
