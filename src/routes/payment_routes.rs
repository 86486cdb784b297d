//! Rutas de pagos
//!
//! Gateway simulado: process, historial derivado y refund (solo admin).

use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::payment_controller::PaymentController;
use crate::middleware::auth::{admin_only_middleware, AuthenticatedUser};
use crate::models::payment::{ProcessPaymentRequest, RefundRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/refund/:payment_id", post(refund_payment))
        .route_layer(middleware::from_fn(admin_only_middleware));

    Router::new()
        .merge(admin_routes)
        .route("/process", post(process_payment))
        .route("/history/:invoice_id", get(payment_history))
}

async fn process_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let (amount, method, invoice) = controller.process(&user, request).await?;
    Ok(Json(json!({
        "message": "Payment processed successfully",
        "payment": { "amount": amount, "method": method },
        "invoice": invoice,
    })))
}

async fn payment_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(invoice_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let history = controller.history(&user, invoice_id).await?;
    Ok(Json(json!({ "paymentHistory": history })))
}

async fn refund_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
    Json(request): Json<RefundRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let (refund, invoice) = controller.refund(&payment_id, request.reason).await?;
    Ok(Json(json!({
        "message": "Payment refunded successfully",
        "refund": refund,
        "invoice": invoice,
    })))
}
