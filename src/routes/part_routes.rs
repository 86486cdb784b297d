//! Rutas de inventario de repuestos

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::part_controller::PartController;
use crate::dto::normalize_page_limit;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::part::{CreatePartRequest, PartFilters, UpdatePartRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_part_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_part))
        .route("/", get(list_parts))
        .route("/:id", get(get_part))
        .route("/:id", put(update_part))
        .route("/:id", delete(delete_part))
}

async fn create_part(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePartRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = PartController::new(state.pool.clone());
    let part = controller.create(&user, request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": "Part created successfully",
            "part": part,
        })),
    ))
}

async fn get_part(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let part = controller.get(&user, id).await?;
    Ok(Json(json!({ "part": part })))
}

async fn list_parts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<PartFilters>,
) -> Result<Json<Value>, AppError> {
    let (page, limit, offset) = normalize_page_limit(filters.page, filters.limit);
    let low_stock_only = filters.low_stock.unwrap_or(false);
    let controller = PartController::new(state.pool.clone());
    let (parts, pagination) = controller
        .list(&user, low_stock_only, page, limit, offset)
        .await?;
    Ok(Json(json!({ "parts": parts, "pagination": pagination })))
}

async fn update_part(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePartRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let part = controller.update(&user, id, request).await?;
    Ok(Json(json!({
        "message": "Part updated successfully",
        "part": part,
    })))
}

async fn delete_part(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = PartController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(json!({ "message": "Part deleted successfully" })))
}
