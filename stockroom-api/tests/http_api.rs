use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use stockroom_api::{app, AppState};
use stockroom_store::MemoryStore;
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> Router {
    app(AppState::in_memory(
        MemoryStore::new(),
        vec!["http://localhost:4200".to_string()],
    ))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(app: &Router, name: &str, quantity: i32, threshold: i32) -> Value {
    let response = send(
        app,
        "POST",
        "/items",
        Some(json!({
            "name": name,
            "description": "Test Description",
            "quantity": quantity,
            "minStockThreshold": threshold,
            "price": 150
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_service_info() {
    let app = test_app();
    let response = send(&app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Running");
    assert_eq!(body["documentation"], "/scalar/v1");
}

#[tokio::test]
async fn test_openapi_document_lists_every_route() {
    let app = test_app();
    let response = send(&app, "GET", "/openapi/v1.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(response).await;
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/items",
        "/items/{id}",
        "/items/low-stock",
        "/stock/in/{item_id}",
        "/stock/out/{item_id}",
        "/stock/transactions/{item_id}",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
    assert!(paths["/items/{id}"].get("put").is_some());
    assert!(doc["components"]["schemas"].get("InventoryItem").is_some());
}

#[tokio::test]
async fn test_docs_ui_is_served() {
    let app = test_app();
    let response = send(&app, "GET", "/scalar/v1", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Stockroom Inventory API"));
}

#[tokio::test]
async fn test_create_returns_item_and_location() {
    let app = test_app();
    let response = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "name": "New Item",
            "quantity": 15,
            "minStockThreshold": 5,
            "price": "150.5"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let item = body_json(response).await;

    assert_eq!(item["name"], "New Item");
    assert_eq!(item["quantity"], 15);
    assert_eq!(item["price"], "150.50");
    assert_eq!(location, format!("/items/{}", item["id"].as_str().unwrap()));

    let fetched = send(&app, "GET", &location, None).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await, item);
}

#[tokio::test]
async fn test_create_invalid_lists_fields_and_persists_nothing() {
    let app = test_app();
    let response = send(&app, "POST", "/items", Some(json!({ "name": "" }))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    for field in ["name", "quantity", "minStockThreshold", "price"] {
        assert!(body["fields"].get(field).is_some(), "missing {}", field);
    }

    let list = send(&app, "GET", "/items", None).await;
    assert_eq!(body_json(list).await, json!([]));
}

#[tokio::test]
async fn test_get_unknown_item_is_404() {
    let app = test_app();
    let response = send(&app, "GET", &format!("/items/{}", Uuid::new_v4()), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_items_sorted_by_name() {
    let app = test_app();
    create(&app, "Item 2", 20, 10).await;
    create(&app, "Item 1", 10, 5).await;

    let response = send(&app, "GET", "/items", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<String> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Item 1", "Item 2"]);
}

#[tokio::test]
async fn test_update_then_delete() {
    let app = test_app();
    let item = create(&app, "Original Name", 10, 5).await;
    let uri = format!("/items/{}", item["id"].as_str().unwrap());

    let response = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "name": "Updated Name", "quantity": 20 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let updated = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(updated["name"], "Updated Name");
    assert_eq!(updated["quantity"], 20);
    assert_eq!(updated["minStockThreshold"], 5);
    assert_eq!(updated["description"], "Test Description");
    assert_eq!(updated["createdDate"], item["createdDate"]);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "GET", &uri, None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_blank_name_is_400_and_keeps_item() {
    let app = test_app();
    let item = create(&app, "Original Name", 10, 5).await;
    let uri = format!("/items/{}", item["id"].as_str().unwrap());

    let response = send(&app, "PUT", &uri, Some(json!({ "name": "  ", "quantity": 99 }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert!(body["fields"]["name"].is_array());

    let stored = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(stored, item);
}

#[tokio::test]
async fn test_price_beyond_column_precision_is_400() {
    let app = test_app();
    let response = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "name": "Priceless",
            "quantity": 1,
            "minStockThreshold": 1,
            "price": "1000000000000000000.00"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["fields"]["price"].is_array());
    assert!(body["fields"].get("name").is_none());

    let item = create(&app, "Cheap", 1, 1).await;
    let uri = format!("/items/{}", item["id"].as_str().unwrap());
    let response = send(&app, "PUT", &uri, Some(json!({ "price": "1000000000000000000" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_unknown_item_are_404() {
    let app = test_app();
    let uri = format!("/items/{}", Uuid::new_v4());

    let response = send(&app, "PUT", &uri, Some(json!({ "name": "Updated Name" }))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_low_stock_route_is_not_an_item_id() {
    let app = test_app();
    create(&app, "Low Stock Item", 3, 5).await;
    create(&app, "Normal Stock Item", 20, 10).await;
    create(&app, "Another Low Stock", 2, 5).await;

    let response = send(&app, "GET", "/items/low-stock", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let quantities: Vec<i64> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["quantity"].as_i64().unwrap())
        .collect();
    assert_eq!(quantities, vec![2, 3]);
}

#[tokio::test]
async fn test_stock_in_and_out_flow() {
    let app = test_app();
    let item = create(&app, "Test Item", 10, 5).await;
    let id = item["id"].as_str().unwrap();

    let response = send(
        &app,
        "POST",
        &format!("/stock/in/{}", id),
        Some(json!({ "quantity": 5, "notes": "Adding stock" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Stock added successfully");
    assert_eq!(body["newQuantity"], 15);
    assert_eq!(body["isLowStock"], false);

    let response = send(
        &app,
        "POST",
        &format!("/stock/out/{}", id),
        Some(json!({ "quantity": 13 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Stock removed successfully");
    assert_eq!(body["newQuantity"], 2);
    assert!(body["lowStockAlert"].as_str().unwrap().contains("Low stock alert"));

    let response = send(&app, "GET", &format!("/stock/transactions/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let transactions = body_json(response).await;
    let transactions = transactions.as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["type"], "Out");
    assert_eq!(transactions[0]["quantity"], 13);
    assert_eq!(transactions[1]["type"], "In");
    assert_eq!(transactions[1]["notes"], "Adding stock");
}

#[tokio::test]
async fn test_stock_out_insufficient_reports_available() {
    let app = test_app();
    let item = create(&app, "Test Item", 5, 2).await;
    let id = item["id"].as_str().unwrap();

    let response = send(
        &app,
        "POST",
        &format!("/stock/out/{}", id),
        Some(json!({ "quantity": 10, "notes": "Removing stock" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Insufficient stock. Available: 5");

    let fetched = body_json(send(&app, "GET", &format!("/items/{}", id), None).await).await;
    assert_eq!(fetched["quantity"], 5);
}

#[tokio::test]
async fn test_stock_on_unknown_item_is_404() {
    let app = test_app();
    let id = Uuid::new_v4();

    for direction in ["in", "out"] {
        let response = send(
            &app,
            "POST",
            &format!("/stock/{}/{}", direction, id),
            Some(json!({ "quantity": 5 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = send(&app, "GET", &format!("/stock/transactions/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_deleting_item_drops_its_ledger() {
    let app = test_app();
    let item = create(&app, "Test Item", 10, 5).await;
    let id = item["id"].as_str().unwrap();

    send(&app, "POST", &format!("/stock/in/{}", id), Some(json!({ "quantity": 1 }))).await;
    send(&app, "DELETE", &format!("/items/{}", id), None).await;

    let response = send(&app, "GET", &format!("/stock/transactions/{}", id), None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_reads_are_repeatable() {
    let app = test_app();
    create(&app, "Item 1", 1, 5).await;

    let first = body_json(send(&app, "GET", "/items/low-stock", None).await).await;
    let second = body_json(send(&app, "GET", "/items/low-stock", None).await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = test_app();
    let request = Request::builder()
        .method("GET")
        .uri("/items")
        .header(header::ORIGIN, "http://localhost:4200")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:4200"
    );
}
