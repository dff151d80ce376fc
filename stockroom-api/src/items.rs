use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use stockroom_shared::{InventoryItem, ItemDraft};
use uuid::Uuid;

use crate::{
    error::{AppError, ErrorBody},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/low-stock", get(list_low_stock))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// GET /items
#[utoipa::path(
    get,
    path = "/items",
    tag = "inventory",
    responses((status = 200, description = "All items ordered by name", body = [InventoryItem]))
)]
pub(crate) async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<InventoryItem>>, AppError> {
    Ok(Json(state.catalog.list().await?))
}

/// GET /items/{id}
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "inventory",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, body = InventoryItem),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryItem>, AppError> {
    Ok(Json(state.catalog.get(id).await?))
}

/// POST /items
#[utoipa::path(
    post,
    path = "/items",
    tag = "inventory",
    request_body = ItemDraft,
    responses(
        (status = 201, description = "Created; Location points at the new item", body = InventoryItem),
        (status = 400, body = ErrorBody)
    )
)]
pub(crate) async fn create_item(
    State(state): State<AppState>,
    Json(draft): Json<ItemDraft>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.catalog.create(draft).await?;
    let location = format!("/items/{}", item.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// PUT /items/{id}
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "inventory",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = ItemDraft,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<ItemDraft>,
) -> Result<StatusCode, AppError> {
    state.catalog.update(id, draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /items/{id}
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "inventory",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 204, description = "Deleted along with its transactions"),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /items/low-stock
#[utoipa::path(
    get,
    path = "/items/low-stock",
    tag = "inventory",
    responses((status = 200, description = "Items below their threshold, lowest quantity first", body = [InventoryItem]))
)]
pub(crate) async fn list_low_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    Ok(Json(state.catalog.list_low_stock().await?))
}
