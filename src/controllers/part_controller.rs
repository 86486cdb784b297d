//! Controller de inventario de repuestos
//!
//! Lectura para staff, mutaciones solo admin.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::PaginationMeta;
use crate::middleware::auth::{require_admin, require_staff, AuthenticatedUser};
use crate::models::part::{CreatePartRequest, Part, UpdatePartRequest};
use crate::repositories::part_repository::PartRepository;
use crate::utils::errors::AppError;

pub struct PartController {
    repository: PartRepository,
}

impl PartController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreatePartRequest,
    ) -> Result<Part, AppError> {
        request.validate().map_err(AppError::Validation)?;
        require_admin(user)?;

        if self
            .repository
            .part_number_exists(&request.part_number)
            .await?
        {
            return Err(AppError::Conflict(
                "Part with this part number already exists".to_string(),
            ));
        }

        self.repository
            .create(
                &request.name,
                &request.part_number,
                request.price,
                request.quantity,
                request.reorder_level.unwrap_or(0),
                request.description.as_deref(),
            )
            .await
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: i64) -> Result<Part, AppError> {
        require_staff(user)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        low_stock_only: bool,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Part>, PaginationMeta), AppError> {
        require_staff(user)?;

        let parts = self.repository.list(low_stock_only, limit, offset).await?;
        let total = self.repository.count(low_stock_only).await?;

        Ok((parts, PaginationMeta::new(page, limit, total)))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdatePartRequest,
    ) -> Result<Part, AppError> {
        request.validate().map_err(AppError::Validation)?;
        require_admin(user)?;

        self.repository
            .update(
                id,
                request.name,
                request.price,
                request.quantity,
                request.reorder_level,
                request.description,
            )
            .await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        require_admin(user)?;
        self.repository.delete(id).await
    }
}
