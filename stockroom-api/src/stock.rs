use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use stockroom_shared::{StockAdjustmentRequest, StockTransaction};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, ErrorBody},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockInResponse {
    #[schema(value_type = String, example = "Stock added successfully")]
    message: &'static str,
    new_quantity: i32,
    is_low_stock: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockOutResponse {
    #[schema(value_type = String, example = "Stock removed successfully")]
    message: &'static str,
    new_quantity: i32,
    #[schema(value_type = String, example = "Stock OK")]
    low_stock_alert: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stock/in/{item_id}", post(stock_in))
        .route("/stock/out/{item_id}", post(stock_out))
        .route("/stock/transactions/{item_id}", get(list_transactions))
}

/// POST /stock/in/{item_id}
#[utoipa::path(
    post,
    path = "/stock/in/{item_id}",
    tag = "stock",
    params(("item_id" = Uuid, Path, description = "Item id")),
    request_body = StockAdjustmentRequest,
    responses(
        (status = 200, body = StockInResponse),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn stock_in(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<StockAdjustmentRequest>,
) -> Result<Json<StockInResponse>, AppError> {
    let receipt = state.ledger.stock_in(item_id, req).await?;

    Ok(Json(StockInResponse {
        message: "Stock added successfully",
        new_quantity: receipt.new_quantity,
        is_low_stock: receipt.is_low_stock,
    }))
}

/// POST /stock/out/{item_id}
#[utoipa::path(
    post,
    path = "/stock/out/{item_id}",
    tag = "stock",
    params(("item_id" = Uuid, Path, description = "Item id")),
    request_body = StockAdjustmentRequest,
    responses(
        (status = 200, body = StockOutResponse),
        (status = 400, description = "Not enough stock on hand", body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn stock_out(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<StockAdjustmentRequest>,
) -> Result<Json<StockOutResponse>, AppError> {
    let receipt = state.ledger.stock_out(item_id, req).await?;

    Ok(Json(StockOutResponse {
        message: "Stock removed successfully",
        new_quantity: receipt.new_quantity,
        low_stock_alert: receipt.alert_text(),
    }))
}

/// GET /stock/transactions/{item_id}
#[utoipa::path(
    get,
    path = "/stock/transactions/{item_id}",
    tag = "stock",
    params(("item_id" = Uuid, Path, description = "Item id")),
    responses((status = 200, description = "Ledger of the item, newest first", body = [StockTransaction]))
)]
pub(crate) async fn list_transactions(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<Vec<StockTransaction>>, AppError> {
    Ok(Json(state.ledger.list_transactions(item_id).await?))
}
