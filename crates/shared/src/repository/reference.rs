use crate::{
    abstract_trait::ReferenceQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{Material, ProductType, Workshop},
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ReferenceQueryRepository {
    db: ConnectionPool,
}

impl ReferenceQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReferenceQueryRepositoryTrait for ReferenceQueryRepository {
    async fn find_materials(&self) -> Result<Vec<Material>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Material>(
            "SELECT id, material_name, waste_percentage FROM materials ORDER BY material_name",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch materials: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_product_types(&self) -> Result<Vec<ProductType>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductType>(
            "SELECT id, type_name, ratio FROM products_types ORDER BY type_name",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product types: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_workshops(&self) -> Result<Vec<Workshop>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Workshop>("SELECT id, name, kind FROM workshops ORDER BY name")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch workshops: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_material_id_by_name(&self, name: &str) -> Result<Option<i32>, RepositoryError> {
        info!("🔎 Resolving material name: {}", name);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, i32>(
            "SELECT id FROM materials WHERE LOWER(material_name) = LOWER($1) ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_type_id_by_name(&self, name: &str) -> Result<Option<i32>, RepositoryError> {
        info!("🔎 Resolving product type name: {}", name);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, i32>(
            "SELECT id FROM products_types WHERE LOWER(type_name) = LOWER($1) ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }
}
