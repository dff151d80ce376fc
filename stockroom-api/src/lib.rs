use axum::{http::HeaderValue, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub mod error;
pub mod items;
pub mod state;
pub mod stock;

pub use state::AppState;

pub const OPENAPI_PATH: &str = "/openapi/v1.json";
pub const DOCS_PATH: &str = "/scalar/v1";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom Inventory API",
        description = "Inventory items and their stock-in/stock-out ledger"
    ),
    paths(
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::list_low_stock,
        stock::stock_in,
        stock::stock_out,
        stock::list_transactions,
    ),
    tags(
        (name = "inventory", description = "Item catalog"),
        (name = "stock", description = "Stock movements and ledger")
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.allowed_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(service_info))
        .route(OPENAPI_PATH, get(openapi_json))
        .merge(Scalar::with_url(DOCS_PATH, ApiDoc::openapi()))
        .merge(items::routes())
        .merge(stock::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn allowed_origins(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|origin| origin == "*") {
        return AllowOrigin::any();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}

/// GET /
async fn service_info() -> Json<Value> {
    Json(json!({
        "name": "Stockroom Inventory API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "Running",
        "documentation": DOCS_PATH,
        "openapi": OPENAPI_PATH,
        "endpoints": {
            "inventory": "/items",
            "lowStock": "/items/low-stock",
            "stock": "/stock",
        },
        "description": "Inventory items and their stock-in/stock-out ledger",
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
