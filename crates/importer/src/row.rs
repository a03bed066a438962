use shared::{errors::RepositoryError, utils::parse_decimal};
use thiserror::Error;

pub const MIN_COLUMNS: usize = 5;

#[derive(Debug, Error)]
pub enum RowError {
    #[error("expected at least 5 columns, found {0}")]
    TooFewColumns(usize),

    #[error("column {column} is not a number: {value:?}")]
    InvalidNumber { column: &'static str, value: String },

    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("unknown product type: {0}")]
    UnknownType(String),

    #[error("invalid product: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("name lookup failed: {0}")]
    Lookup(#[source] RepositoryError),

    #[error("insert failed: {0}")]
    Insert(#[source] RepositoryError),
}

/// One data row of the import sheet, columns in sheet order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub type_name: String,
    pub product_name: String,
    pub article: String,
    pub min_price: f64,
    pub material_name: String,
}

pub fn parse_row(cells: &[String]) -> Result<ImportRow, RowError> {
    let width = cells
        .iter()
        .rposition(|cell| !cell.trim().is_empty())
        .map_or(0, |last| last + 1);

    if width < MIN_COLUMNS {
        return Err(RowError::TooFewColumns(width));
    }

    let text = |index: usize| cells[index].trim().to_string();

    let raw_price = text(3);
    let min_price = parse_decimal(&raw_price).ok_or(RowError::InvalidNumber {
        column: "min_price",
        value: raw_price,
    })?;

    Ok(ImportRow {
        type_name: text(0),
        product_name: text(1),
        article: text(2),
        min_price,
        material_name: text(4),
    })
}
