//! Test helpers shared by the workspace crates.
//!
//! [`InMemoryCatalog`] implements every repository trait over plain vectors,
//! enforcing the same foreign-key, uniqueness and cascade rules as
//! `schema.sql`, so handler and importer tests can run without PostgreSQL.
//! [`setup_test_db`] prepares a real database for the `#[sqlx::test]`
//! suites.

use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, DynReferenceQueryRepository,
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
        ReferenceQueryRepositoryTrait,
    },
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, WorkshopTimeRequest},
    errors::RepositoryError,
    model::{Material, Product, ProductType, ProductWithTime, ProductWorkshop, Workshop},
    schema::apply_schema,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
struct CatalogState {
    materials: Vec<Material>,
    product_types: Vec<ProductType>,
    workshops: Vec<Workshop>,
    products: Vec<Product>,
    links: Vec<ProductWorkshop>,
    next_product_id: i32,
    next_link_id: i32,
    broken: bool,
}

impl CatalogState {
    fn insert_product(&mut self, req: &CreateProductRequest) -> Result<i32, String> {
        if !self.materials.iter().any(|m| m.id == req.material_id) {
            return Err(format!(
                "insert on table \"products\" violates foreign key constraint: material {}",
                req.material_id
            ));
        }
        if !self.product_types.iter().any(|t| t.id == req.type_id) {
            return Err(format!(
                "insert on table \"products\" violates foreign key constraint: type {}",
                req.type_id
            ));
        }

        self.next_product_id += 1;
        let id = self.next_product_id;
        self.products.push(Product {
            id,
            product_name: req.product_name.clone(),
            material_id: req.material_id,
            type_id: req.type_id,
            min_price: req.min_price,
            article: req.article.clone(),
        });
        Ok(id)
    }

    fn insert_link(&mut self, product_id: i32, workshop: &WorkshopTimeRequest) -> Result<(), String> {
        if !self.workshops.iter().any(|w| w.id == workshop.workshop_id) {
            return Err(format!(
                "insert on table \"products_workshop\" violates foreign key constraint: workshop {}",
                workshop.workshop_id
            ));
        }
        if self
            .links
            .iter()
            .any(|l| l.product_id == product_id && l.workshop_id == workshop.workshop_id)
        {
            return Err(
                "duplicate key value violates unique constraint \"products_workshop_product_workshop_key\""
                    .to_string(),
            );
        }

        self.next_link_id += 1;
        self.links.push(ProductWorkshop {
            id: self.next_link_id,
            product_id,
            workshop_id: workshop.workshop_id,
            production_time: workshop.production_time,
        });
        Ok(())
    }

    fn with_time(&self, product: &Product) -> Option<ProductWithTime> {
        let material = self.materials.iter().find(|m| m.id == product.material_id)?;
        let product_type = self.product_types.iter().find(|t| t.id == product.type_id)?;
        let total_production_time = self
            .links
            .iter()
            .filter(|l| l.product_id == product.id)
            .map(|l| l.production_time)
            .sum();

        Some(ProductWithTime {
            id: product.id,
            product_name: product.product_name.clone(),
            material_id: product.material_id,
            material_name: material.material_name.clone(),
            type_id: product.type_id,
            type_name: product_type.type_name.clone(),
            min_price: product.min_price,
            article: product.article.clone(),
            total_production_time,
        })
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::Sqlx(sqlx::Error::PoolTimedOut)
}

/// In-memory stand-in for the PostgreSQL repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with two materials, two product types and three
    /// workshops, ids starting at 1.
    pub fn with_reference_data() -> Self {
        let catalog = Self::new();
        {
            let mut state = catalog.lock();
            state.materials = vec![
                Material {
                    id: 1,
                    material_name: "Steel".into(),
                    waste_percentage: 0.5,
                },
                Material {
                    id: 2,
                    material_name: "Oak".into(),
                    waste_percentage: 1.2,
                },
            ];
            state.product_types = vec![
                ProductType {
                    id: 1,
                    type_name: "Chair".into(),
                    ratio: 1.5,
                },
                ProductType {
                    id: 2,
                    type_name: "Table".into(),
                    ratio: 2.0,
                },
            ];
            state.workshops = vec![
                Workshop {
                    id: 1,
                    name: "Assembly".into(),
                    kind: "assembly".into(),
                },
                Workshop {
                    id: 2,
                    name: "Painting".into(),
                    kind: "finishing".into(),
                },
                Workshop {
                    id: 3,
                    name: "Packing".into(),
                    kind: "logistics".into(),
                },
            ];
        }
        catalog
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Makes every subsequent repository call fail as if the pool timed out.
    pub fn set_broken(&self, broken: bool) {
        self.lock().broken = broken;
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn links(&self) -> Vec<ProductWorkshop> {
        self.lock().links.clone()
    }

    pub fn query_repository(&self) -> DynProductQueryRepository {
        Arc::new(self.clone())
    }

    pub fn command_repository(&self) -> DynProductCommandRepository {
        Arc::new(self.clone())
    }

    pub fn reference_repository(&self) -> DynReferenceQueryRepository {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryCatalog {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<i32, RepositoryError> {
        let mut state = self.lock();
        if state.broken {
            return Err(unavailable());
        }
        state.insert_product(req).map_err(RepositoryError::ForeignKey)
    }

    async fn create_product_with_workshops(
        &self,
        req: &CreateProductRequest,
        workshops: &[WorkshopTimeRequest],
    ) -> Result<i32, RepositoryError> {
        let mut state = self.lock();
        if state.broken {
            return Err(RepositoryError::BeginTransaction(sqlx::Error::PoolTimedOut));
        }

        // Work on a copy and swap it in only when every insert succeeded.
        let mut tx = state.clone();
        let product_id = tx
            .insert_product(req)
            .map_err(|msg| RepositoryError::CreateProduct(sqlx::Error::Protocol(msg)))?;

        for workshop in workshops {
            tx.insert_link(product_id, workshop)
                .map_err(|msg| RepositoryError::AttachWorkshop {
                    workshop_id: workshop.workshop_id,
                    source: sqlx::Error::Protocol(msg),
                })?;
        }

        *state = tx;
        Ok(product_id)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.broken {
            return Err(RepositoryError::NothingDeleted(id));
        }

        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(RepositoryError::NothingDeleted(id));
        }
        state.links.retain(|l| l.product_id != id);
        Ok(())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<ProductWithTime>, RepositoryError> {
        let state = self.lock();
        if state.broken {
            return Err(unavailable());
        }

        let mut products: Vec<ProductWithTime> =
            state.products.iter().filter_map(|p| state.with_time(p)).collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductWithTime>, RepositoryError> {
        let state = self.lock();
        if state.broken {
            return Err(unavailable());
        }

        Ok(state
            .products
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| state.with_time(p)))
    }
}

#[async_trait]
impl ReferenceQueryRepositoryTrait for InMemoryCatalog {
    async fn find_materials(&self) -> Result<Vec<Material>, RepositoryError> {
        let state = self.lock();
        if state.broken {
            return Err(unavailable());
        }
        let mut materials = state.materials.clone();
        materials.sort_by(|a, b| a.material_name.cmp(&b.material_name));
        Ok(materials)
    }

    async fn find_product_types(&self) -> Result<Vec<ProductType>, RepositoryError> {
        let state = self.lock();
        if state.broken {
            return Err(unavailable());
        }
        let mut types = state.product_types.clone();
        types.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        Ok(types)
    }

    async fn find_workshops(&self) -> Result<Vec<Workshop>, RepositoryError> {
        let state = self.lock();
        if state.broken {
            return Err(unavailable());
        }
        let mut workshops = state.workshops.clone();
        workshops.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(workshops)
    }

    async fn find_material_id_by_name(&self, name: &str) -> Result<Option<i32>, RepositoryError> {
        let state = self.lock();
        if state.broken {
            return Err(unavailable());
        }
        let wanted = name.to_lowercase();
        Ok(state
            .materials
            .iter()
            .find(|m| m.material_name.to_lowercase() == wanted)
            .map(|m| m.id))
    }

    async fn find_type_id_by_name(&self, name: &str) -> Result<Option<i32>, RepositoryError> {
        let state = self.lock();
        if state.broken {
            return Err(unavailable());
        }
        let wanted = name.to_lowercase();
        Ok(state
            .product_types
            .iter()
            .find(|t| t.type_name.to_lowercase() == wanted)
            .map(|t| t.id))
    }
}

/// Applies the schema to a fresh database and seeds the same reference
/// rows as [`InMemoryCatalog::with_reference_data`].
pub async fn setup_test_db(pool: &ConnectionPool) -> anyhow::Result<()> {
    apply_schema(pool).await?;

    sqlx::raw_sql(
        r#"
        INSERT INTO materials (id, material_name, waste_percentage)
        VALUES (1, 'Steel', 0.5), (2, 'Oak', 1.2);
        INSERT INTO products_types (id, type_name, ratio)
        VALUES (1, 'Chair', 1.5), (2, 'Table', 2.0);
        INSERT INTO workshops (id, name, kind)
        VALUES (1, 'Assembly', 'assembly'), (2, 'Painting', 'finishing'), (3, 'Packing', 'logistics');
        SELECT setval(pg_get_serial_sequence('materials', 'id'), 2);
        SELECT setval(pg_get_serial_sequence('products_types', 'id'), 2);
        SELECT setval(pg_get_serial_sequence('workshops', 'id'), 3);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Shorthand for a valid creation request against the seeded references.
pub fn product_request(name: &str) -> CreateProductRequest {
    CreateProductRequest {
        product_name: name.to_string(),
        material_id: 1,
        type_id: 1,
        min_price: 9.99,
        article: format!("{name}-1"),
    }
}

pub fn workshop_time(workshop_id: i32, production_time: f64) -> WorkshopTimeRequest {
    WorkshopTimeRequest {
        workshop_id,
        production_time,
    }
}
