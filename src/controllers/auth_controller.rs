//! Controller de autenticación
//!
//! Registro de clientes, login con bcrypt y emisión de JWT.

use bcrypt::{hash, verify, DEFAULT_COST};
use serde::Serialize;
use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::models::user::{LoginRequest, RegisterRequest, Role, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

/// Response de login/registro exitoso
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config: JwtConfig::from(config),
        }
    }

    /// Registro de un nuevo cliente (self-signup siempre crea rol customer)
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let user = self
            .repository
            .create(
                &request.name,
                &request.email,
                &password_hash,
                Role::Customer,
                request.phone.as_deref(),
                request.address.as_deref(),
            )
            .await?;

        let token = generate_token(user.id, &user.email, user.role, &self.jwt_config)?;

        Ok(AuthResponse {
            message: "Registration successful".to_string(),
            token,
            user: UserResponse::from(user),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let password_valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;

        if !password_valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(user.id, &user.email, user.role, &self.jwt_config)?;

        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: UserResponse::from(user),
        })
    }

    /// Perfil del usuario autenticado (usado por el SPA para re-hidratar sesión)
    pub async fn me(&self, user_id: i64) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
