use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::ProductWithTime,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductWithTime>, RepositoryError> {
        info!("🔍 Fetching all products with production time");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductWithTime>(
            r#"
            SELECT
                p.id,
                p.product_name,
                p.material_id,
                m.material_name,
                p.type_id,
                pt.type_name,
                p.min_price,
                p.article,
                COALESCE(SUM(pw.production_time), 0)::DOUBLE PRECISION AS total_production_time
            FROM products p
            JOIN materials m ON p.material_id = m.id
            JOIN products_types pt ON p.type_id = pt.id
            LEFT JOIN products_workshop pw ON pw.product_id = p.id
            GROUP BY p.id, p.product_name, p.material_id, m.material_name,
                     p.type_id, pt.type_name, p.min_price, p.article
            ORDER BY p.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductWithTime>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductWithTime>(
            r#"
            SELECT
                p.id,
                p.product_name,
                p.material_id,
                m.material_name,
                p.type_id,
                pt.type_name,
                p.min_price,
                p.article,
                COALESCE(SUM(pw.production_time), 0)::DOUBLE PRECISION AS total_production_time
            FROM products p
            JOIN materials m ON p.material_id = m.id
            JOIN products_types pt ON p.type_id = pt.id
            LEFT JOIN products_workshop pw ON pw.product_id = p.id
            WHERE p.id = $1
            GROUP BY p.id, p.product_name, p.material_id, m.material_name,
                     p.type_id, pt.type_name, p.min_price, p.article
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(result)
    }
}
