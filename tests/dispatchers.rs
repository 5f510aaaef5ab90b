//! Dispatcher tests against a stub catalog service.
//!
//! Each test drives a command handler end to end: stub HTTP service in,
//! session log out. The stub mirrors the shapes the real service produces,
//! including the bulk-import report whose `failureCount` field decides the
//! log entry's error flag.
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use catalog_demo::api::ApiClient;
use catalog_demo::console::commands::{errors, import, products, purchase};
use catalog_demo::console::{CommandContext, ScriptedPrompts};
use catalog_demo::output::SessionLog;

#[derive(Clone, Default)]
struct HitCounter(Arc<AtomicUsize>);

impl HitCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing listens on, for connection-refused scenarios.
async fn refused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn context_at(addr: SocketAddr, answers: Vec<Option<String>>) -> (CommandContext, Arc<SessionLog>) {
    let sink = Arc::new(SessionLog::new());
    let context = CommandContext::new(
        Arc::new(ApiClient::new(&format!("http://{}", addr))),
        sink.clone(),
        Arc::new(ScriptedPrompts::new(answers)),
    );
    (context, sink)
}

fn stub_product(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Stub catalog entry",
        "price": 999.99,
        "stock": 5,
        "category": "Electronics",
        "active": true
    })
}

async fn trigger_error(Path(kind): Path<String>) -> (StatusCode, String) {
    match kind.as_str() {
        "database-error" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database connection failed: Connection pool exhausted".to_string(),
        ),
        other => (
            StatusCode::NOT_FOUND,
            format!("No error simulation named: {}", other),
        ),
    }
}

async fn validation_error(Json(payload): Json<Value>) -> (StatusCode, String) {
    if payload.get("requiredField").is_none() {
        (
            StatusCode::BAD_REQUEST,
            "Missing required field: requiredField".to_string(),
        )
    } else {
        (StatusCode::OK, "Valid payload received".to_string())
    }
}

async fn list_products() -> Json<Value> {
    Json(json!([
        stub_product(1, "iPhone 15"),
        stub_product(2, "MacBook Pro"),
    ]))
}

async fn get_product(Path(id): Path<i64>) -> Result<Json<Value>, (StatusCode, String)> {
    if id == 1 {
        Ok(Json(stub_product(1, "iPhone 15")))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("Product not found with id: {}", id),
        ))
    }
}

async fn search_products(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let query = params.get("query").cloned().unwrap_or_default();
    if query == "iPhone" {
        Ok(Json(json!([stub_product(1, "iPhone 15")])))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("No products found matching: {}", query) })),
        ))
    }
}

async fn create_product(Json(draft): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut created = draft;
    created["id"] = json!(42);
    created["active"] = json!(true);
    (StatusCode::CREATED, Json(created))
}

async fn purchase_product(
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let quantity = params.get("quantity").cloned().unwrap_or_default();
    if quantity == "999" {
        (
            StatusCode::CONFLICT,
            "Insufficient stock for product iPhone 15. Available: 5, Requested: 999".to_string(),
        )
    } else {
        (
            StatusCode::OK,
            format!("Order confirmed for product {} (quantity {})", id, quantity),
        )
    }
}

async fn bulk_import(Json(batch): Json<Vec<Value>>) -> Json<Value> {
    Json(json!({
        "totalProcessed": batch.len(),
        "successCount": batch.len() - 2,
        "failureCount": 2,
        "errors": [
            "Failed to import 'iPhone 15': duplicate product",
            "Failed to import 'Bulk Product 3': price must be positive"
        ]
    }))
}

fn catalog_stub() -> Router {
    Router::new()
        .route("/api/demo/errors/validation-error", post(validation_error))
        .route("/api/demo/errors/:kind", get(trigger_error))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/search", get(search_products))
        .route("/api/products/:id", get(get_product))
        .route("/api/products/:id/purchase", post(purchase_product))
        .route("/api/products/bulk-import", post(bulk_import))
}

#[tokio::test]
async fn error_trigger_logs_status_and_body() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    errors::trigger_error(&context, "database-error")
        .await
        .unwrap();

    let contents = sink.contents();
    assert!(contents.contains("❌ ERROR"));
    assert!(contents.contains("500 - Internal Server Error"));
    assert!(contents.contains("Connection pool exhausted"));
}

#[tokio::test]
async fn validation_failure_is_flagged() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    errors::validation_error(&context).await.unwrap();

    let contents = sink.contents();
    assert!(contents.contains("❌ ERROR"));
    assert!(contents.contains("Validation Error: Missing required field: requiredField"));
}

#[tokio::test]
async fn product_listing_logs_a_count_and_pretty_body() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    products::list_products(&context).await.unwrap();

    let contents = sink.contents();
    assert!(contents.contains("✅ SUCCESS"));
    assert!(contents.contains("Found 2 products:"));
    assert!(contents.contains("MacBook Pro"));
}

#[tokio::test]
async fn product_lookup_reports_missing_ids() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    products::show_product(&context, "1").await.unwrap();
    products::show_product(&context, "7").await.unwrap();

    let contents = sink.contents();
    assert!(contents.contains("✅ SUCCESS"));
    assert!(contents.contains("iPhone 15"));
    assert!(contents.contains("Product lookup failed: 404 - Not Found"));
    assert!(contents.contains("Product not found with id: 7"));
}

#[tokio::test]
async fn search_success_and_failure_branches() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    products::search_products(&context, "iPhone").await.unwrap();
    products::search_products(&context, "Nokia").await.unwrap();

    let contents = sink.contents();
    assert!(contents.contains("Search results for \"iPhone\":"));
    assert!(contents.contains("Search failed: No products found matching: Nokia"));
}

#[tokio::test]
async fn created_product_is_echoed_back() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    let draft = catalog_demo::types::ProductDraft::new("Widget", 249.0, 12, "Test");
    products::create_product(&context, draft).await.unwrap();

    let contents = sink.contents();
    assert!(contents.contains("✅ SUCCESS"));
    assert!(contents.contains("Product created:"));
    assert!(contents.contains("Widget"));
}

#[tokio::test]
async fn purchase_success_and_insufficient_stock() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    purchase::purchase_product(&context, "1", "5").await.unwrap();
    purchase::purchase_product(&context, "1", "999").await.unwrap();

    let contents = sink.contents();
    assert!(contents.contains("Purchase successful:\nOrder confirmed for product 1 (quantity 5)"));
    assert!(contents.contains("Purchase failed: Insufficient stock"));
}

#[tokio::test]
async fn bulk_import_partial_failure_flags_the_entry() {
    let addr = serve(catalog_stub()).await;
    let (context, sink) = context_at(addr, Vec::new());

    import::bulk_import(&context).await.unwrap();

    let contents = sink.contents();
    // Transport succeeded, but the report's failure count marks the entry.
    assert!(contents.contains("❌ ERROR"));
    assert!(contents.contains("Bulk import results:"));
    assert!(contents.contains("\"failureCount\": 2"));
    assert!(contents.contains("duplicate product"));
}

#[tokio::test]
async fn bulk_import_clean_run_is_a_success_entry() {
    let app = Router::new().route(
        "/api/products/bulk-import",
        post(|Json(batch): Json<Vec<Value>>| async move {
            Json(json!({
                "totalProcessed": batch.len(),
                "successCount": batch.len(),
                "failureCount": 0,
                "errors": []
            }))
        }),
    );
    let addr = serve(app).await;
    let (context, sink) = context_at(addr, Vec::new());

    import::bulk_import(&context).await.unwrap();

    let contents = sink.contents();
    assert!(contents.contains("✅ SUCCESS"));
    assert!(contents.contains("\"failureCount\": 0"));
}

#[tokio::test]
async fn transport_failures_are_logged_not_thrown() {
    let addr = refused_addr().await;
    let (context, sink) = context_at(addr, Vec::new());

    errors::trigger_error(&context, "arithmetic").await.unwrap();
    errors::validation_error(&context).await.unwrap();
    products::list_products(&context).await.unwrap();
    products::search_products(&context, "iPhone").await.unwrap();
    purchase::purchase_product(&context, "1", "5").await.unwrap();
    import::bulk_import(&context).await.unwrap();

    let contents = sink.contents();
    assert_eq!(contents.matches("❌ ERROR").count(), 6);
    assert!(contents.contains("Network error:"));
    assert!(contents.contains("Error fetching products:"));
    assert!(contents.contains("Search error:"));
    assert!(contents.contains("Purchase error:"));
    assert!(contents.contains("Bulk import error:"));
}

#[tokio::test]
async fn declined_prompts_issue_no_requests() {
    let hits = HitCounter::default();
    let app = Router::new()
        .fallback(|State(hits): State<HitCounter>| async move {
            hits.0.fetch_add(1, Ordering::SeqCst);
            StatusCode::NOT_FOUND
        })
        .with_state(hits.clone());
    let addr = serve(app).await;

    // `search` declines its only prompt; `purchase` accepts the ID but
    // declines the quantity.
    let (context, sink) = context_at(addr, vec![None, Some("1".to_string()), None]);
    products::handle_search(&context).await.unwrap();
    purchase::handle_purchase(&context).await.unwrap();

    assert_eq!(hits.count(), 0);
    assert!(sink.contents().is_empty());
}
