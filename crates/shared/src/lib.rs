pub mod abstract_trait;
pub mod config;
pub mod di;
pub mod domain;
pub mod errors;
pub mod model;
pub mod repository;
pub mod schema;
pub mod service;
pub mod test_utils;
pub mod utils;
