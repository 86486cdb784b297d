//! Rutas de órdenes de trabajo

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::jobcard_controller::JobCardController;
use crate::dto::normalize_page_limit;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::jobcard::{
    AddSparePartRequest, AddTaskRequest, CreateJobCardRequest, JobCardFilters,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_jobcard_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_jobcard))
        .route("/", get(list_jobcards))
        .route("/:id", get(get_jobcard))
        .route("/:id/tasks", post(add_task))
        .route("/:id/parts", post(add_sparepart))
        .route("/:id/complete", put(complete_jobcard))
}

async fn create_jobcard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateJobCardRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = JobCardController::new(state.pool.clone());
    let jobcard = controller.create(&user, request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": "Job card created successfully",
            "jobcard": jobcard,
        })),
    ))
}

async fn get_jobcard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = JobCardController::new(state.pool.clone());
    let (jobcard, tasks, spareparts) = controller.get(&user, id).await?;
    Ok(Json(json!({
        "jobcard": jobcard,
        "tasks": tasks,
        "spareparts": spareparts,
    })))
}

async fn list_jobcards(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<JobCardFilters>,
) -> Result<Json<Value>, AppError> {
    let (page, limit, offset) = normalize_page_limit(filters.page, filters.limit);
    let controller = JobCardController::new(state.pool.clone());
    let (jobcards, pagination) = controller.list(&user, page, limit, offset).await?;
    Ok(Json(json!({ "jobcards": jobcards, "pagination": pagination })))
}

async fn add_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<AddTaskRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = JobCardController::new(state.pool.clone());
    let task = controller.add_task(&user, id, request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": "Task added successfully",
            "task": task,
        })),
    ))
}

async fn add_sparepart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<AddSparePartRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = JobCardController::new(state.pool.clone());
    let sparepart = controller.add_sparepart(&user, id, request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": "Spare part added successfully",
            "sparepart": sparepart,
        })),
    ))
}

async fn complete_jobcard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = JobCardController::new(state.pool.clone());
    let (jobcard, invoice) = controller.complete(&user, id).await?;
    Ok(Json(json!({
        "message": "Job card completed and invoice generated",
        "jobcard": jobcard,
        "invoice": invoice,
    })))
}
