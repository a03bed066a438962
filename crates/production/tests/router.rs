use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use production::{handler::AppRouter, state::AppState};
use serde_json::{Value, json};
use shared::{
    abstract_trait::ProductCommandRepositoryTrait,
    di::DependenciesInjectDeps,
    test_utils::{InMemoryCatalog, product_request, workshop_time},
};
use tower::ServiceExt;

fn app(catalog: &InMemoryCatalog) -> Router {
    let deps = DependenciesInjectDeps {
        product_query: catalog.query_repository(),
        product_command: catalog.command_repository(),
        reference_query: catalog.reference_repository(),
    };
    AppRouter::build(AppState::new(deps))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn empty_catalog_lists_no_products() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(&app, get("/api/products")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "products": [], "count": 0 })
    );
}

#[tokio::test]
async fn create_product_returns_created_aggregate() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_json(
            "/api/products",
            r#"{"product_name":"Widget","material_id":2,"type_id":1,"min_price":12.5,"article":"W-1"}"#,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["material_name"], "Oak");
    assert_eq!(body["type_name"], "Chair");
    assert_eq!(body["total_production_time"], 0.0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(&app, post_json("/api/products", "{not json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "error");
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn missing_required_fields_never_reach_storage() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(&app, post_json("/api/products", r#"{"material_id":1}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let message = body_json(response).await["message"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(message.contains("product_name"));
    assert!(message.contains("type_id"));
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn unknown_material_is_a_server_error() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_json(
            "/api/products",
            r#"{"product_name":"Widget","material_id":99,"type_id":1}"#,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn with_workshops_sums_production_time() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_json(
            "/api/products/with-workshops",
            r#"{"product_name":"Widget","material_id":1,"type_id":1,"min_price":10.0,"article":"W",
                "workshops":[{"workshop_id":1,"production_time":2.5},{"workshop_id":2,"production_time":3.5}]}"#,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["total_production_time"], 6.0);
    assert_eq!(catalog.links().len(), 2);
}

#[tokio::test]
async fn duplicate_workshop_leaves_no_widget_behind() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_json(
            "/api/products/with-workshops",
            r#"{"product_name":"Widget","material_id":1,"type_id":1,"min_price":10.0,"article":"W",
                "workshops":[{"workshop_id":1,"production_time":2.0},{"workshop_id":1,"production_time":3.0}]}"#,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = body_json(response).await["message"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(message.contains("workshop 1"));

    let listed = body_json(send(&app, get("/api/products")).await).await;
    assert_eq!(listed["count"], 0);
    assert!(catalog.products().iter().all(|p| p.product_name != "Widget"));
    assert!(catalog.links().is_empty());
}

#[tokio::test]
async fn negative_production_time_is_rejected() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_json(
            "/api/products/with-workshops",
            r#"{"product_name":"Widget","material_id":1,"type_id":1,
                "workshops":[{"workshop_id":1,"production_time":-1.0}]}"#,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn product_lookup_distinguishes_bad_ids_from_missing_rows() {
    let catalog = InMemoryCatalog::with_reference_data();
    catalog
        .create_product(&product_request("Widget"))
        .await
        .unwrap();
    let app = app(&catalog);

    let response = send(&app, get("/api/products/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid product ID");

    let response = send(&app, get("/api/products/42")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/api/products/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["product_name"], "Widget");
}

#[tokio::test]
async fn delete_reports_missing_rows_as_bad_gateway() {
    let catalog = InMemoryCatalog::with_reference_data();
    catalog
        .create_product_with_workshops(&product_request("Widget"), &[workshop_time(1, 2.0)])
        .await
        .unwrap();
    let app = app(&catalog);

    let delete = |uri: &str| {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };

    let response = send(&app, delete("/api/products/x")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, delete("/api/products/7")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = send(&app, delete("/api/products/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Product deleted successfully"
    );
    assert!(catalog.products().is_empty());
    assert!(catalog.links().is_empty());
}

#[tokio::test]
async fn storage_outage_surfaces_as_error_json() {
    let catalog = InMemoryCatalog::with_reference_data();
    catalog.set_broken(true);
    let app = app(&catalog);

    let response = send(&app, get("/api/products")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["status"], "error");
}

#[tokio::test]
async fn reference_lists_are_ordered_by_name() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let materials = body_json(send(&app, get("/api/materials")).await).await;
    let names: Vec<&str> = materials
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["material_name"].as_str())
        .collect();
    assert_eq!(names, vec!["Oak", "Steel"]);

    let workshops = body_json(send(&app, get("/api/workshops")).await).await;
    assert_eq!(workshops.as_array().unwrap().len(), 3);

    let response = send(&app, get("/api/product-types")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_page_shows_products_and_flash_message() {
    let catalog = InMemoryCatalog::with_reference_data();
    catalog
        .create_product(&product_request("Widget"))
        .await
        .unwrap();
    let app = app(&catalog);

    let response = send(&app, get("/?message=Saved")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Widget"));
    assert!(html.contains("Saved"));
}

#[tokio::test]
async fn new_product_form_lists_references() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(&app, get("/products/new")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Steel"));
    assert!(html.contains("Table"));
    assert!(html.contains("Painting"));
}

#[tokio::test]
async fn form_submit_pairs_workshop_rows_and_redirects() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_form(
            "/products/create",
            "product_name=Widget&material_id=1&type_id=2&min_price=12%2C50&article=W-1\
             &workshop_id=1&production_time=2.5\
             &workshop_id=2&production_time=\
             &workshop_id=3&production_time=1",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?message="));

    let products = catalog.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].min_price, 12.5);

    let workshops: Vec<i32> = catalog.links().iter().map(|l| l.workshop_id).collect();
    assert_eq!(workshops, vec![1, 3]);
}

#[tokio::test]
async fn invalid_form_is_rendered_again_with_an_error() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_form("/products/create", "product_name=&material_id=1&type_id=1"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Failed to create product"));
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn invalid_form_keeps_entered_production_times() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    let response = send(
        &app,
        post_form(
            "/products/create",
            "product_name=Widget&material_id=1&type_id=1&min_price=abc\
             &workshop_id=1&production_time=2.5&workshop_id=2&production_time=",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains(r#"value="2.5""#));
    assert!(html.contains(r#"value="abc""#));
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn form_delete_redirects_with_outcome() {
    let catalog = InMemoryCatalog::with_reference_data();
    catalog
        .create_product(&product_request("Widget"))
        .await
        .unwrap();
    let app = app(&catalog);

    let response = send(&app, post_form("/products/abc/delete", "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = send(&app, post_form("/products/9/delete", "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?error="));

    let response = send(&app, post_form("/products/1/delete", "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?message="));
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn metrics_are_exposed_after_requests() {
    let catalog = InMemoryCatalog::with_reference_data();
    let app = app(&catalog);

    send(&app, get("/api/products")).await;

    let response = send(&app, get("/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("product_query_service"));
}
