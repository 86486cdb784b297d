//! Controller de usuarios
//!
//! CRUD de usuarios con checks de rol y ownership.

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::PaginationMeta;
use crate::middleware::auth::{require_admin, AuthenticatedUser};
use crate::models::user::{Role, UpdateUserRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, ACCESS_DENIED};

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<UserResponse>, PaginationMeta), AppError> {
        require_admin(user)?;

        let users = self.repository.list(limit, offset).await?;
        let total = self.repository.count().await?;

        let responses = users.into_iter().map(UserResponse::from).collect();
        Ok((responses, PaginationMeta::new(page, limit, total)))
    }

    pub async fn get(
        &self,
        user: &AuthenticatedUser,
        id: i64,
    ) -> Result<UserResponse, AppError> {
        if user.id != id && user.role != Role::Admin {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        let found = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(found))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        if user.id != id && user.role != Role::Admin {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        // Solo un admin puede cambiar roles
        if request.role.is_some() && user.role != Role::Admin {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(ref email) = request.email {
            if *email != current.email && self.repository.email_exists(email).await? {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }

        let password_hash = match request.password {
            Some(ref password) => Some(
                hash(password, DEFAULT_COST)
                    .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?,
            ),
            None => None,
        };

        let updated = self
            .repository
            .update(
                id,
                request.name,
                request.email,
                password_hash,
                request.phone,
                request.address,
                request.role,
            )
            .await?;

        Ok(UserResponse::from(updated))
    }

    /// Borrado de usuario (admin). El auto-borrado se rechaza para
    /// cualquier rol, antes del check de permisos.
    pub async fn delete(&self, user: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        if user.id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        require_admin(user)?;

        self.repository.delete(id).await
    }
}
