//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens y los
//! guards de autorización por rol.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    models::user::Role,
    state::AppState,
    utils::errors::{AppError, ACCESS_DENIED},
    utils::jwt::{verify_token, JwtConfig},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

/// Middleware de autenticación JWT
///
/// Verifica el bearer token con el secreto compartido y adjunta la
/// identidad `{id, email, role}` a la request. No consulta la base de
/// datos: los claims son la fuente de identidad.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    let role = Role::from_str(&claims.role)
        .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

    let authenticated_user = AuthenticatedUser {
        id: user_id,
        email: claims.email,
        role,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Verificación de rol sobre una identidad opcional
///
/// Distingue "no autenticado" (401) de "rol insuficiente" (403).
fn check_roles(user: Option<&AuthenticatedUser>, allowed: &[Role]) -> Result<(), AppError> {
    let user =
        user.ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(ACCESS_DENIED.to_string()))
    }
}

/// Verificación de rol dentro de un handler
pub fn require_role(user: &AuthenticatedUser, allowed: &[Role]) -> Result<(), AppError> {
    check_roles(Some(user), allowed)
}

/// Verificar que el usuario es staff (admin o mecánico)
pub fn require_staff(user: &AuthenticatedUser) -> Result<(), AppError> {
    require_role(user, &[Role::Admin, Role::Mechanic])
}

/// Verificar que el usuario es admin
pub fn require_admin(user: &AuthenticatedUser) -> Result<(), AppError> {
    require_role(user, &[Role::Admin])
}

/// Middleware para rutas exclusivas de admin
pub async fn admin_only_middleware(
    user: Option<Extension<AuthenticatedUser>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_roles(user.as_ref().map(|ext| &ext.0), &[Role::Admin])?;
    Ok(next.run(request).await)
}

/// Middleware para rutas de staff (admin o mecánico)
pub async fn staff_only_middleware(
    user: Option<Extension<AuthenticatedUser>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_roles(user.as_ref().map(|ext| &ext.0), &[Role::Admin, Role::Mechanic])?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            email: "user@taller.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_check_roles_missing_user() {
        let error = check_roles(None, &[Role::Admin]).unwrap_err();
        match error {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Authentication required"),
            _ => panic!("expected unauthorized"),
        }
    }

    #[test]
    fn test_check_roles_insufficient() {
        let customer = user(Role::Customer);
        let error = check_roles(Some(&customer), &[Role::Admin, Role::Mechanic]).unwrap_err();
        match error {
            AppError::Forbidden(msg) => {
                assert_eq!(msg, "Access denied. Insufficient permissions.")
            }
            _ => panic!("expected forbidden"),
        }
    }

    #[test]
    fn test_check_roles_allowed() {
        let mechanic = user(Role::Mechanic);
        assert!(require_staff(&mechanic).is_ok());
        assert!(require_admin(&mechanic).is_err());
    }
}
