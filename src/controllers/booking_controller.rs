//! Controller de reservas
//!
//! Un cliente reserva servicio para uno de sus vehículos; el staff
//! aprueba, completa o cancela.

use sqlx::PgPool;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::PaginationMeta;
use crate::middleware::auth::{require_staff, AuthenticatedUser};
use crate::models::booking::{
    Booking, BookingStatus, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::models::user::Role;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, ACCESS_DENIED};
use crate::utils::validation::{validate_date, validate_time};

fn field_error(field: &'static str, error: ValidationError) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

pub struct BookingController {
    repository: BookingRepository,
    vehicles: VehicleRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let booking_date =
            validate_date(&request.booking_date).map_err(|e| field_error("booking_date", e))?;
        let booking_time =
            validate_time(&request.booking_time).map_err(|e| field_error("booking_time", e))?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        // El cliente solo reserva para sus propios vehículos
        if user.role == Role::Customer && vehicle.customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }
        if user.role == Role::Mechanic {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        self.repository
            .create(
                vehicle.customer_id,
                vehicle.id,
                &request.service_type,
                booking_date,
                booking_time,
                request.description.as_deref(),
                request.estimated_cost,
            )
            .await
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: i64) -> Result<Booking, AppError> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if user.role == Role::Customer && booking.customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        Ok(booking)
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        status: Option<String>,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Booking>, PaginationMeta), AppError> {
        let (bookings, total) = match user.role {
            Role::Customer => (
                self.repository
                    .list_by_customer(user.id, limit, offset)
                    .await?,
                self.repository.count_by_customer(user.id).await?,
            ),
            _ => {
                let status = match status {
                    Some(ref value) => Some(BookingStatus::from_str(value).ok_or_else(|| {
                        AppError::BadRequest("Invalid booking status".to_string())
                    })?),
                    None => None,
                };
                (
                    self.repository.list_all(status, limit, offset).await?,
                    self.repository.count_all(status).await?,
                )
            }
        };

        Ok((bookings, PaginationMeta::new(page, limit, total)))
    }

    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdateBookingStatusRequest,
    ) -> Result<Booking, AppError> {
        require_staff(user)?;

        let status = BookingStatus::from_str(&request.status)
            .ok_or_else(|| AppError::BadRequest("Invalid booking status".to_string()))?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        self.repository.update_status(id, status).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if user.role != Role::Admin && booking.customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        if booking.status != BookingStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending bookings can be deleted".to_string(),
            ));
        }

        self.repository.delete(id).await
    }
}
