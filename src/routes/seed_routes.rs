//! Ruta de seed de desarrollo

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::controllers::seed_controller::SeedController;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_seed_router() -> Router<AppState> {
    Router::new().route("/", post(seed_database))
}

async fn seed_database(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = SeedController::new(state.pool.clone());
    controller.seed(&state.config).await?;
    Ok(Json(json!({ "message": "Database seeded successfully" })))
}
