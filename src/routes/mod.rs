//! Composición del router de la API
//!
//! Las rutas públicas (login, registro, seed, health) quedan fuera del
//! middleware de autenticación; todo lo demás exige bearer token.

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub mod auth_routes;
pub mod booking_routes;
pub mod invoice_routes;
pub mod jobcard_routes;
pub mod part_routes;
pub mod payment_routes;
pub mod seed_routes;
pub mod user_routes;
pub mod vehicle_routes;

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn create_api_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/users", user_routes::create_user_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/bookings", booking_routes::create_booking_router())
        .nest("/api/jobcards", jobcard_routes::create_jobcard_router())
        .nest("/api/parts", part_routes::create_part_router())
        .nest("/api/invoices", invoice_routes::create_invoice_router())
        .nest("/api/payments", payment_routes::create_payment_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/seed", seed_routes::create_seed_router())
        .merge(protected)
        .with_state(state)
}
