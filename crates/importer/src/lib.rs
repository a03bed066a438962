pub mod config;
pub mod row;
pub mod runner;
pub mod workbook;
