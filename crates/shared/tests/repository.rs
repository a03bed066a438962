//! Repository tests against a real PostgreSQL. Run with `DATABASE_URL`
//! pointing at a server where the user may create databases:
//! `cargo test -p shared -- --ignored`.

use shared::{
    abstract_trait::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, ReferenceQueryRepositoryTrait,
    },
    errors::RepositoryError,
    repository::{ProductRepository, ReferenceQueryRepository},
    test_utils::{product_request, setup_test_db, workshop_time},
};
use sqlx::PgPool;

async fn count(pool: &PgPool, table: &str) -> anyhow::Result<i64> {
    let n = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(n)
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn workshops_are_linked_in_one_transaction(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    let id = repo
        .command
        .create_product_with_workshops(
            &product_request("Widget"),
            &[workshop_time(1, 2.5), workshop_time(2, 3.5)],
        )
        .await?;

    let product = repo.query.find_by_id(id).await?.expect("product exists");
    assert_eq!(product.total_production_time, 6.0);
    assert_eq!(product.material_name, "Steel");
    assert_eq!(product.type_name, "Chair");
    assert_eq!(count(&pool, "products_workshop").await?, 2);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn failing_link_rolls_back_the_product(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    let err = repo
        .command
        .create_product_with_workshops(
            &product_request("Widget"),
            &[workshop_time(1, 2.0), workshop_time(99, 1.0)],
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::AttachWorkshop { workshop_id: 99, .. }
    ));
    assert_eq!(count(&pool, "products").await?, 0);
    assert_eq!(count(&pool, "products_workshop").await?, 0);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn duplicate_workshop_is_rejected_and_prior_state_kept(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    repo.command
        .create_product_with_workshops(&product_request("Existing"), &[workshop_time(3, 1.0)])
        .await?;

    let err = repo
        .command
        .create_product_with_workshops(
            &product_request("Widget"),
            &[workshop_time(1, 2.0), workshop_time(1, 3.0)],
        )
        .await
        .unwrap_err();

    assert!(err.is_transactional());
    assert_eq!(count(&pool, "products").await?, 1);
    assert_eq!(count(&pool, "products_workshop").await?, 1);

    let names: Vec<String> = repo
        .query
        .find_all()
        .await?
        .into_iter()
        .map(|p| p.product_name)
        .collect();
    assert_eq!(names, vec!["Existing".to_string()]);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn product_without_links_has_zero_production_time(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    let id = repo.command.create_product(&product_request("Bare")).await?;

    let all = repo.query.find_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].total_production_time, 0.0);
    assert!(repo.query.find_by_id(id + 1).await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn unknown_material_is_a_foreign_key_error(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    let mut req = product_request("Orphan");
    req.material_id = 42;

    let err = repo.command.create_product(&req).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ForeignKey(_)));
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn deleting_a_missing_product_deletes_nothing(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    let err = repo.command.delete_product(12345).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NothingDeleted(12345)));
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn deleting_a_product_cascades_to_links(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    let id = repo
        .command
        .create_product_with_workshops(&product_request("Widget"), &[workshop_time(1, 2.0)])
        .await?;

    repo.command.delete_product(id).await?;

    assert_eq!(count(&pool, "products").await?, 0);
    assert_eq!(count(&pool, "products_workshop").await?, 0);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn referenced_material_cannot_be_deleted(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ProductRepository::new(pool.clone());

    repo.command.create_product(&product_request("Widget")).await?;

    let result = sqlx::query("DELETE FROM materials WHERE id = 1")
        .execute(&pool)
        .await;

    assert!(result.is_err());
    assert_eq!(count(&pool, "materials").await?, 2);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn names_resolve_case_insensitively(pool: PgPool) -> anyhow::Result<()> {
    setup_test_db(&pool).await?;
    let repo = ReferenceQueryRepository::new(pool.clone());

    assert_eq!(repo.find_material_id_by_name("oAK").await?, Some(2));
    assert_eq!(repo.find_type_id_by_name("TABLE").await?, Some(2));
    assert_eq!(repo.find_material_id_by_name("Oa").await?, None);

    let materials: Vec<String> = repo
        .find_materials()
        .await?
        .into_iter()
        .map(|m| m.material_name)
        .collect();
    assert_eq!(materials, vec!["Oak".to_string(), "Steel".to_string()]);
    Ok(())
}
