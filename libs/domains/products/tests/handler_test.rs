//! Handler tests for the Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They exercise only the products router backed by the in-memory
//! repository, not the full application with routing and auth middleware.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::{handlers, InMemoryProductRepository, Product, ProductService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    handlers::router(service)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app();

    let response = app
        .oneshot(post(
            "/",
            json!({
                "name": "Ceramic Mug",
                "price": 24.0,
                "image": "https://example.com/mug.jpg",
                "description": "Hand-thrown stoneware mug.",
                "category": "Home"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, "Ceramic Mug");
    assert_eq!(product.price, 24.0);
}

#[tokio::test]
async fn test_create_product_with_empty_name_returns_400() {
    let app = app();

    let response = app
        .oneshot(post(
            "/",
            json!({
                "name": "",
                "price": 24.0,
                "image": "https://example.com/mug.jpg",
                "description": "Hand-thrown stoneware mug.",
                "category": "Home"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_product_returns_404_with_message() {
    let app = app();

    let response = app
        .oneshot(get(&format!("/{}", uuid::Uuid::now_v7())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert!(body.get("message").is_some());
    assert!(body.get("name").is_none());
}

#[tokio::test]
async fn test_get_malformed_id_returns_400() {
    let app = app();

    let response = app.oneshot(get("/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seed_twice_only_inserts_once() {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    let app = handlers::router(service);

    let first = app.clone().oneshot(post("/seed", json!({}))).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let body: Value = json_body(first.into_body()).await;
    assert_eq!(body["message"], "Products seeded successfully");
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 8);
    assert!(products.iter().any(|p| p["name"] == "Minimalist Watch"
        && p["price"] == 299.0
        && p["category"] == "Accessories"));

    let second = app.clone().oneshot(post("/seed", json!({}))).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let body: Value = json_body(second.into_body()).await;
    assert_eq!(body["message"], "Products already seeded");
    assert!(body.get("products").is_none());

    let listing = app.oneshot(get("/")).await.unwrap();
    let all: Vec<Product> = json_body(listing.into_body()).await;
    assert_eq!(all.len(), 8);
}

#[tokio::test]
async fn test_list_returns_every_product() {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    let app = handlers::router(service);

    for name in ["One", "Two", "Three"] {
        let response = app
            .clone()
            .oneshot(post(
                "/",
                json!({
                    "name": name,
                    "price": 1.0,
                    "image": "https://example.com/p.jpg",
                    "description": "desc",
                    "category": "General"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 3);
}
