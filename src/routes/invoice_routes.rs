//! Rutas de facturas
//!
//! Creación, listado global y actualización de estado de pago son de
//! staff; las consultas puntuales aplican ownership en el controller.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::invoice_controller::InvoiceController;
use crate::dto::normalize_page_limit;
use crate::middleware::auth::{staff_only_middleware, AuthenticatedUser};
use crate::models::invoice::{CreateInvoiceRequest, InvoiceFilters, UpdatePaymentStatusRequest};
use crate::models::payment::ProcessPaymentRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    let staff_routes = Router::new()
        .route("/", post(create_invoice))
        .route("/", get(list_invoices))
        .route("/:id/payment", put(update_payment_status))
        .route_layer(middleware::from_fn(staff_only_middleware));

    Router::new()
        .merge(staff_routes)
        .route("/mock", post(mock_payment))
        .route("/:id", get(get_invoice))
        .route("/booking/:booking_id", get(get_invoice_by_booking))
        .route("/customer/:customer_id", get(list_customer_invoices))
}

async fn create_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let invoice = controller.create(&user, request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": "Invoice created successfully",
            "invoice": invoice,
        })),
    ))
}

async fn get_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let (invoice, tasks, spareparts) = controller.get_detail(&user, id).await?;
    Ok(Json(json!({
        "invoice": invoice,
        "tasks": tasks,
        "spareparts": spareparts,
    })))
}

async fn get_invoice_by_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let invoice = controller.get_by_booking(&user, booking_id).await?;
    Ok(Json(json!({ "invoice": invoice })))
}

async fn list_customer_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<i64>,
    Query(filters): Query<InvoiceFilters>,
) -> Result<Json<Value>, AppError> {
    let (page, limit, offset) = normalize_page_limit(filters.page, filters.limit);
    let controller = InvoiceController::new(state.pool.clone());
    let (invoices, pagination) = controller
        .list_for_customer(&user, customer_id, page, limit, offset)
        .await?;
    Ok(Json(json!({ "invoices": invoices, "pagination": pagination })))
}

async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<InvoiceFilters>,
) -> Result<Json<Value>, AppError> {
    let (page, limit, offset) = normalize_page_limit(filters.page, filters.limit);
    let controller = InvoiceController::new(state.pool.clone());
    let (invoices, pagination) = controller
        .list_all(&user, filters.status, page, limit, offset)
        .await?;
    Ok(Json(json!({ "invoices": invoices, "pagination": pagination })))
}

async fn update_payment_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let invoice = controller.update_payment_status(&user, id, request).await?;
    Ok(Json(json!({
        "message": "Payment status updated successfully",
        "invoice": invoice,
    })))
}

async fn mock_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let invoice = controller.mock_payment(&user, request).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Payment processed successfully",
        "invoice": invoice,
    })))
}
