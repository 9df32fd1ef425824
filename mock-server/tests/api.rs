use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody, Product};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_products_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/v1/products/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_without_trailing_slash() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/v1/products"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let app = app();
    for name in ["First", "Second", "Third"] {
        let body = format!(r#"{{"name":"{name}","quantity":1,"pricePerUnit":1}}"#);
        app.clone()
            .oneshot(json_request("POST", "/api/v1/products/", &body))
            .await
            .unwrap();
    }

    let resp = app
        .oneshot(empty_request("GET", "/api/v1/products/"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// --- create ---

#[tokio::test]
async fn create_product_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/products/",
            r#"{"name":"Widget","quantity":5,"pricePerUnit":2.5}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Product = body_json(resp).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.quantity, 5);
    assert_eq!(product.price_per_unit, 2.5);
}

#[tokio::test]
async fn create_product_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/products/", r#"{"title":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_product_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/v1/products/7",
            r#"{"id":7,"name":"Nope","quantity":1,"pricePerUnit":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.message, "Product not found: 7");
}

#[tokio::test]
async fn update_product_bad_id_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/v1/products/abc",
            r#"{"name":"Nope","quantity":1,"pricePerUnit":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_product_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/v1/products/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/v1/products/",
            r#"{"name":"Widget","quantity":5,"pricePerUnit":2.5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Product = body_json(resp).await;
    let id = created.id;

    // update replaces every field
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/v1/products/{id}"),
            &format!(r#"{{"id":{id},"name":"Widget","quantity":10,"pricePerUnit":3}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.id, id);
    assert_eq!(updated.quantity, 10);
    assert_eq!(updated.price_per_unit, 3.0);

    // list reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/v1/products/"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products, vec![updated]);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/v1/products/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: bool = body_json(resp).await;
    assert!(deleted);

    // delete again: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/v1/products/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/v1/products/"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}
