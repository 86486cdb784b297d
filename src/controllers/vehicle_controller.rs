//! Controller de vehículos
//!
//! CRUD con ownership: un cliente solo ve y modifica sus propios
//! vehículos; admin sin restricción; mecánico solo lectura.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::PaginationMeta;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::user::Role;
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle};
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, ACCESS_DENIED};

pub struct VehicleController {
    repository: VehicleRepository,
    users: UserRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        request.validate().map_err(AppError::Validation)?;
        require_role(user, &[Role::Admin, Role::Customer])?;

        // Un admin puede crear en nombre de un cliente; un cliente siempre
        // crea para sí mismo
        let customer_id = match (user.role, request.customer_id) {
            (Role::Admin, Some(customer_id)) => {
                self.users
                    .find_by_id(customer_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
                customer_id
            }
            (Role::Admin, None) => user.id,
            _ => user.id,
        };

        if self.repository.vin_exists(&request.vin).await? {
            return Err(AppError::Conflict(
                "Vehicle with this VIN already exists".to_string(),
            ));
        }

        if self
            .repository
            .registration_exists(&request.registration_number)
            .await?
        {
            return Err(AppError::Conflict(
                "Vehicle with this registration number already exists".to_string(),
            ));
        }

        self.repository
            .create(
                customer_id,
                &request.vin,
                &request.make,
                &request.model,
                request.year,
                request.engine_type.as_deref(),
                &request.registration_number,
                request.mileage.unwrap_or(0),
            )
            .await
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: i64) -> Result<Vehicle, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if user.role == Role::Customer && vehicle.customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        Ok(vehicle)
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Vehicle>, PaginationMeta), AppError> {
        let (vehicles, total) = match user.role {
            Role::Customer => (
                self.repository
                    .list_by_customer(user.id, limit, offset)
                    .await?,
                self.repository.count_by_customer(user.id).await?,
            ),
            _ => (
                self.repository.list_all(limit, offset).await?,
                self.repository.count_all().await?,
            ),
        };

        Ok((vehicles, PaginationMeta::new(page, limit, total)))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if user.role != Role::Admin && current.customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        if let Some(ref registration) = request.registration_number {
            if *registration != current.registration_number
                && self.repository.registration_exists(registration).await?
            {
                return Err(AppError::Conflict(
                    "Vehicle with this registration number already exists".to_string(),
                ));
            }
        }

        self.repository
            .update(
                id,
                request.make,
                request.model,
                request.year,
                request.engine_type,
                request.registration_number,
                request.mileage,
            )
            .await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if user.role != Role::Admin && vehicle.customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        self.repository.delete(id).await
    }
}
