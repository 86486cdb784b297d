//! Rutas de vehículos

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::normalize_page_limit;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.create(&user, request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": "Vehicle registered successfully",
            "vehicle": vehicle,
        })),
    ))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.get(&user, id).await?;
    Ok(Json(json!({ "vehicle": vehicle })))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<Value>, AppError> {
    let (page, limit, offset) = normalize_page_limit(filters.page, filters.limit);
    let controller = VehicleController::new(state.pool.clone());
    let (vehicles, pagination) = controller.list(&user, page, limit, offset).await?;
    Ok(Json(json!({ "vehicles": vehicles, "pagination": pagination })))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.update(&user, id, request).await?;
    Ok(Json(json!({
        "message": "Vehicle updated successfully",
        "vehicle": vehicle,
    })))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(json!({ "message": "Vehicle deleted successfully" })))
}
