//! Rutas de autenticación
//!
//! Registro y login son públicas; /me requiere bearer token.

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::auth_controller::AuthController;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Registro y login son públicos; /me exige bearer token
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.register(request).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "message": response.message,
            "token": response.token,
            "user": response.user,
        })),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.login(request).await?;
    Ok(Json(json!({
        "message": response.message,
        "token": response.token,
        "user": response.user,
    })))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Value>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let profile = controller.me(user.id).await?;
    Ok(Json(json!({ "user": profile })))
}
