use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, WorkshopTimeRequest},
    errors::RepositoryError,
};
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::{error, info, warn};

const INSERT_PRODUCT: &str = r#"
    INSERT INTO products (product_name, material_id, type_id, min_price, article)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

const INSERT_PRODUCT_WORKSHOP: &str = r#"
    INSERT INTO products_workshop (product_id, workshop_id, production_time)
    VALUES ($1, $2, $3)
"#;

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

async fn rollback(tx: Transaction<'_, Postgres>) {
    if let Err(err) = tx.rollback().await {
        warn!("⚠️ Rollback failed, connection will discard the transaction: {:?}", err);
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<i32, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product_id = sqlx::query_scalar::<_, i32>(INSERT_PRODUCT)
            .bind(&req.product_name)
            .bind(req.material_id)
            .bind(req.type_id)
            .bind(req.min_price)
            .bind(&req.article)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create product {}: {:?}", req.product_name, err);
                RepositoryError::classify(err)
            })?;

        info!("✅ Created product ID {} ({})", product_id, req.product_name);
        Ok(product_id)
    }

    async fn create_product_with_workshops(
        &self,
        req: &CreateProductRequest,
        workshops: &[WorkshopTimeRequest],
    ) -> Result<i32, RepositoryError> {
        info!(
            "🏗️ Creating product {} with {} workshop(s)",
            req.product_name,
            workshops.len()
        );

        let mut tx = self.db.begin().await.map_err(|err| {
            error!("❌ Failed to begin transaction: {:?}", err);
            RepositoryError::BeginTransaction(err)
        })?;

        let product_id = match sqlx::query_scalar::<_, i32>(INSERT_PRODUCT)
            .bind(&req.product_name)
            .bind(req.material_id)
            .bind(req.type_id)
            .bind(req.min_price)
            .bind(&req.article)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(id) => id,
            Err(err) => {
                error!("❌ Failed to create product {}: {:?}", req.product_name, err);
                rollback(tx).await;
                return Err(RepositoryError::CreateProduct(err));
            }
        };

        for workshop in workshops {
            let inserted = sqlx::query(INSERT_PRODUCT_WORKSHOP)
                .bind(product_id)
                .bind(workshop.workshop_id)
                .bind(workshop.production_time)
                .execute(&mut *tx)
                .await;

            if let Err(err) = inserted {
                error!(
                    "❌ Failed to attach workshop {} to product {}: {:?}",
                    workshop.workshop_id, req.product_name, err
                );
                rollback(tx).await;
                return Err(RepositoryError::AttachWorkshop {
                    workshop_id: workshop.workshop_id,
                    source: err,
                });
            }
        }

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit product {}: {:?}", req.product_name, err);
            RepositoryError::Commit(err)
        })?;

        info!(
            "✅ Created product ID {} ({}) with {} workshop(s)",
            product_id,
            req.product_name,
            workshops.len()
        );
        Ok(product_id)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        info!("❌ Deleting product: {}", id);

        // Executed on the pool so that acquire failures land in the outcome too.
        let outcome = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await;

        // Row count is checked before the execution error.
        let rows_affected = match &outcome {
            Ok(result) => result.rows_affected(),
            Err(err) => {
                error!("❌ Delete of product {} failed: {:?}", id, err);
                0
            }
        };

        if rows_affected == 0 {
            warn!("⚠️ No product deleted for ID {}", id);
            return Err(RepositoryError::NothingDeleted(id));
        }

        info!("✅ Product ID {} deleted", id);
        Ok(())
    }
}
