//! Controller de órdenes de trabajo
//!
//! Apertura desde una reserva aprobada, registro de tareas y repuestos,
//! y cierre con emisión de factura.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::PaginationMeta;
use crate::middleware::auth::{require_staff, AuthenticatedUser};
use crate::models::booking::BookingStatus;
use crate::models::invoice::Invoice;
use crate::models::jobcard::{
    AddSparePartRequest, AddTaskRequest, CreateJobCardRequest, JobCard, JobCardSparePart,
    JobCardSparePartDetail, JobCardStatus, JobCardTask,
};
use crate::models::user::Role;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::jobcard_repository::JobCardRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, ACCESS_DENIED};

pub struct JobCardController {
    repository: JobCardRepository,
    bookings: BookingRepository,
    users: UserRepository,
}

impl JobCardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: JobCardRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Solo el mecánico asignado o un admin pueden trabajar la orden
    fn check_worker_access(
        user: &AuthenticatedUser,
        jobcard: &JobCard,
    ) -> Result<(), AppError> {
        match user.role {
            Role::Admin => Ok(()),
            Role::Mechanic if jobcard.mechanic_id == user.id => Ok(()),
            _ => Err(AppError::Forbidden(ACCESS_DENIED.to_string())),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateJobCardRequest,
    ) -> Result<JobCard, AppError> {
        request.validate().map_err(AppError::Validation)?;
        require_staff(user)?;

        let booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.status != BookingStatus::Approved {
            return Err(AppError::BadRequest(
                "Booking must be approved before opening a job card".to_string(),
            ));
        }

        if self.repository.exists_for_booking(booking.id).await? {
            return Err(AppError::Conflict(
                "Job card already exists for this booking".to_string(),
            ));
        }

        let mechanic = self
            .users
            .find_by_id(request.mechanic_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mechanic not found".to_string()))?;

        if mechanic.role != Role::Mechanic {
            return Err(AppError::BadRequest(
                "Assigned user is not a mechanic".to_string(),
            ));
        }

        // La apertura también pasa la reserva a in_progress, en la misma
        // transacción
        self.repository
            .create(booking.id, booking.customer_id, booking.vehicle_id, mechanic.id)
            .await
    }

    pub async fn get(
        &self,
        user: &AuthenticatedUser,
        id: i64,
    ) -> Result<(JobCard, Vec<JobCardTask>, Vec<JobCardSparePartDetail>), AppError> {
        let jobcard = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job card not found".to_string()))?;

        let allowed = match user.role {
            Role::Admin => true,
            Role::Mechanic => jobcard.mechanic_id == user.id,
            Role::Customer => jobcard.customer_id == user.id,
        };
        if !allowed {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }

        let tasks = self.repository.tasks(id).await?;
        let spareparts = self.repository.spareparts(id).await?;

        Ok((jobcard, tasks, spareparts))
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<JobCard>, PaginationMeta), AppError> {
        require_staff(user)?;

        let (jobcards, total) = match user.role {
            Role::Mechanic => (
                self.repository
                    .list_by_mechanic(user.id, limit, offset)
                    .await?,
                self.repository.count_by_mechanic(user.id).await?,
            ),
            _ => (
                self.repository.list_all(limit, offset).await?,
                self.repository.count_all().await?,
            ),
        };

        Ok((jobcards, PaginationMeta::new(page, limit, total)))
    }

    pub async fn add_task(
        &self,
        user: &AuthenticatedUser,
        jobcard_id: i64,
        request: AddTaskRequest,
    ) -> Result<JobCardTask, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let jobcard = self
            .repository
            .find_by_id(jobcard_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job card not found".to_string()))?;

        Self::check_worker_access(user, &jobcard)?;

        if jobcard.status == JobCardStatus::Completed {
            return Err(AppError::BadRequest(
                "Job card is already completed".to_string(),
            ));
        }

        self.repository
            .add_task(jobcard_id, &request.task_name, request.task_cost)
            .await
    }

    pub async fn add_sparepart(
        &self,
        user: &AuthenticatedUser,
        jobcard_id: i64,
        request: AddSparePartRequest,
    ) -> Result<JobCardSparePart, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let jobcard = self
            .repository
            .find_by_id(jobcard_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job card not found".to_string()))?;

        Self::check_worker_access(user, &jobcard)?;

        if jobcard.status == JobCardStatus::Completed {
            return Err(AppError::BadRequest(
                "Job card is already completed".to_string(),
            ));
        }

        self.repository
            .consume_part(jobcard_id, request.part_id, request.quantity)
            .await
    }

    /// Cerrar la orden: recalcula totales, marca completed, emite la
    /// factura y cierra la reserva en una única transacción.
    pub async fn complete(
        &self,
        user: &AuthenticatedUser,
        jobcard_id: i64,
    ) -> Result<(JobCard, Invoice), AppError> {
        let jobcard = self
            .repository
            .find_by_id(jobcard_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job card not found".to_string()))?;

        Self::check_worker_access(user, &jobcard)?;

        if jobcard.status == JobCardStatus::Completed {
            return Err(AppError::BadRequest(
                "Job card is already completed".to_string(),
            ));
        }

        self.repository.complete(jobcard_id).await
    }
}
