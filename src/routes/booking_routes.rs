//! Rutas de reservas

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::booking_controller::BookingController;
use crate::dto::normalize_page_limit;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::{BookingFilters, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/status", put(update_booking_status))
        .route("/:id", delete(delete_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = BookingController::new(state.pool.clone());
    let booking = controller.create(&user, request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": "Booking created successfully",
            "booking": booking,
        })),
    ))
}

async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let booking = controller.get(&user, id).await?;
    Ok(Json(json!({ "booking": booking })))
}

async fn list_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<Value>, AppError> {
    let (page, limit, offset) = normalize_page_limit(filters.page, filters.limit);
    let controller = BookingController::new(state.pool.clone());
    let (bookings, pagination) = controller
        .list(&user, filters.status, page, limit, offset)
        .await?;
    Ok(Json(json!({ "bookings": bookings, "pagination": pagination })))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let booking = controller.update_status(&user, id, request).await?;
    Ok(Json(json!({
        "message": "Booking status updated successfully",
        "booking": booking,
    })))
}

async fn delete_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(json!({ "message": "Booking deleted successfully" })))
}
