use crate::row::{ImportRow, RowError, parse_row};
use shared::{
    abstract_trait::{DynProductCommandRepository, DynReferenceQueryRepository},
    config::ConnectionPool,
    domain::requests::CreateProductRequest,
    errors::validation_messages,
    repository::{ProductRepository, ReferenceQueryRepository},
};
use std::{fmt, sync::Arc};
use tracing::{debug, error, info};
use validator::Validate;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Import finished: {} succeeded, {} failed",
            self.succeeded, self.failed
        )
    }
}

/// Inserts workbook rows one by one through the product repository.
/// A failing row is logged and counted, never fatal.
pub struct Importer {
    command: DynProductCommandRepository,
    reference: DynReferenceQueryRepository,
}

impl Importer {
    pub fn new(command: DynProductCommandRepository, reference: DynReferenceQueryRepository) -> Self {
        Self { command, reference }
    }

    pub fn from_pool(pool: ConnectionPool) -> Self {
        let products = ProductRepository::new(pool.clone());
        let reference = Arc::new(ReferenceQueryRepository::new(pool)) as DynReferenceQueryRepository;
        Self::new(products.command, reference)
    }

    /// Imports every row after the header.
    pub async fn run(&self, rows: &[Vec<String>]) -> ImportSummary {
        let mut summary = ImportSummary::default();

        // Sheet row numbers are 1-based and row 1 is the header.
        for (index, cells) in rows.iter().enumerate().skip(1) {
            let line = index + 1;

            if cells.iter().all(|cell| cell.trim().is_empty()) {
                debug!("Row {line}: blank, skipped");
                continue;
            }

            match self.import_cells(cells).await {
                Ok(id) => {
                    info!("✅ Row {line}: created product ID {id}");
                    summary.succeeded += 1;
                }
                Err(err) => {
                    error!("❌ Row {line}: {err}");
                    summary.failed += 1;
                }
            }
        }

        info!("📦 {summary}");
        summary
    }

    async fn import_cells(&self, cells: &[String]) -> Result<i32, RowError> {
        let row = parse_row(cells)?;
        let request = self.resolve(&row).await?;

        request
            .validate()
            .map_err(|errors| RowError::Invalid(validation_messages(&errors)))?;

        self.command
            .create_product(&request)
            .await
            .map_err(RowError::Insert)
    }

    async fn resolve(&self, row: &ImportRow) -> Result<CreateProductRequest, RowError> {
        let material_id = self
            .reference
            .find_material_id_by_name(&row.material_name)
            .await
            .map_err(RowError::Lookup)?
            .ok_or_else(|| RowError::UnknownMaterial(row.material_name.clone()))?;

        let type_id = self
            .reference
            .find_type_id_by_name(&row.type_name)
            .await
            .map_err(RowError::Lookup)?
            .ok_or_else(|| RowError::UnknownType(row.type_name.clone()))?;

        Ok(CreateProductRequest {
            product_name: row.product_name.clone(),
            material_id,
            type_id,
            min_price: row.min_price,
            article: row.article.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::test_utils::InMemoryCatalog;

    fn sheet(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn importer(catalog: &InMemoryCatalog) -> Importer {
        Importer::new(catalog.command_repository(), catalog.reference_repository())
    }

    const HEADER: &[&str] = &["Type", "Name", "Article", "Min price", "Material"];

    #[tokio::test]
    async fn valid_rows_are_inserted_with_resolved_names() {
        let catalog = InMemoryCatalog::with_reference_data();

        let summary = importer(&catalog)
            .run(&sheet(&[
                HEADER,
                &["chair", "Widget", "W-1", "12,50", "OAK"],
                &["Table", "Desk", "D-7", "1 000", "Steel"],
            ]))
            .await;

        assert_eq!(summary, ImportSummary { succeeded: 2, failed: 0 });

        let products = catalog.products();
        assert_eq!(products[0].min_price, 12.5);
        assert_eq!(products[0].material_id, 2);
        assert_eq!(products[0].type_id, 1);
        assert_eq!(products[1].min_price, 1000.0);
        assert_eq!(products[1].type_id, 2);
    }

    #[tokio::test]
    async fn bad_rows_are_counted_and_skipped() {
        let catalog = InMemoryCatalog::with_reference_data();

        let summary = importer(&catalog)
            .run(&sheet(&[
                HEADER,
                &["Chair", "Short", "S-1", "5"],
                &["Chair", "Ghost", "G-1", "5", "Unobtainium"],
                &["Sofa", "Couch", "C-1", "5", "Oak"],
                &["Chair", "", "E-1", "5", "Oak"],
                &["Chair", "Widget", "W-1", "12,50", "Oak"],
            ]))
            .await;

        assert_eq!(summary, ImportSummary { succeeded: 1, failed: 4 });
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.products()[0].product_name, "Widget");
    }

    #[tokio::test]
    async fn blank_rows_are_not_counted() {
        let catalog = InMemoryCatalog::with_reference_data();

        let summary = importer(&catalog)
            .run(&sheet(&[
                HEADER,
                &[],
                &["", " ", "", "", ""],
                &["Chair", "Widget", "W-1", "1", "Oak"],
            ]))
            .await;

        assert_eq!(summary, ImportSummary { succeeded: 1, failed: 0 });
    }

    #[tokio::test]
    async fn unresolved_material_is_a_row_error() {
        let catalog = InMemoryCatalog::with_reference_data();
        let cells = sheet(&[&["Chair", "Ghost", "G-1", "5", "Unobtainium"]]);

        let err = importer(&catalog).import_cells(&cells[0]).await.unwrap_err();
        assert!(matches!(err, RowError::UnknownMaterial(name) if name == "Unobtainium"));
    }

    #[tokio::test]
    async fn storage_failures_do_not_abort_the_run() {
        let catalog = InMemoryCatalog::with_reference_data();
        catalog.set_broken(true);

        let summary = importer(&catalog)
            .run(&sheet(&[HEADER, &["Chair", "Widget", "W-1", "1", "Oak"]]))
            .await;

        assert_eq!(summary, ImportSummary { succeeded: 0, failed: 1 });
    }

    #[test]
    fn summary_line_format() {
        let summary = ImportSummary { succeeded: 3, failed: 1 };
        assert_eq!(summary.to_string(), "Import finished: 3 succeeded, 1 failed");
    }
}
