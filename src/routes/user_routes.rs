//! Rutas de usuarios

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::controllers::user_controller::UserController;
use crate::dto::normalize_page_limit;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UpdateUserRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct UserListQuery {
    page: Option<i64>,
    limit: Option<i64>,
}

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Value>, AppError> {
    let (page, limit, offset) = normalize_page_limit(query.page, query.limit);
    let controller = UserController::new(state.pool.clone());
    let (users, pagination) = controller.list(&user, page, limit, offset).await?;
    Ok(Json(json!({ "users": users, "pagination": pagination })))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let found = controller.get(&user, id).await?;
    Ok(Json(json!({ "user": found })))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let updated = controller.update(&user, id, request).await?;
    Ok(Json(json!({
        "message": "User updated successfully",
        "user": updated,
    })))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
