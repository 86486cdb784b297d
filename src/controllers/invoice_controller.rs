//! Controller de facturas
//!
//! Creación desde los totales de una orden de trabajo, consultas con
//! ownership y la máquina de estados de pago.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::PaginationMeta;
use crate::middleware::auth::{require_staff, AuthenticatedUser};
use crate::models::invoice::{
    CreateInvoiceRequest, Invoice, InvoiceDetail, InvoiceStatus, UpdatePaymentStatusRequest,
};
use crate::models::jobcard::{JobCardSparePartDetail, JobCardTask};
use crate::models::payment::ProcessPaymentRequest;
use crate::models::user::Role;
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::jobcard_repository::JobCardRepository;
use crate::utils::errors::{validation_error, AppError, ACCESS_DENIED};

pub struct InvoiceController {
    repository: InvoiceRepository,
    jobcards: JobCardRepository,
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            jobcards: JobCardRepository::new(pool),
        }
    }

    fn check_ownership(user: &AuthenticatedUser, customer_id: i64) -> Result<(), AppError> {
        if user.role == Role::Customer && customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }
        Ok(())
    }

    /// Crear una factura con los totales ya computados por el flujo de
    /// cierre de la orden de trabajo. El invariante
    /// `grand_total == parts_total + labor_total` se rechaza en creación.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateInvoiceRequest,
    ) -> Result<Invoice, AppError> {
        request.validate().map_err(AppError::Validation)?;
        require_staff(user)?;

        if request.grand_total != request.parts_total + request.labor_total {
            return Err(AppError::BadRequest(
                "Grand total must equal parts total plus labor total".to_string(),
            ));
        }

        let jobcard = self
            .jobcards
            .find_by_id(request.jobcard_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job card not found".to_string()))?;

        if jobcard.customer_id != request.customer_id {
            return Err(AppError::BadRequest(
                "Customer does not match the job card".to_string(),
            ));
        }

        if self.repository.exists_for_jobcard(request.jobcard_id).await? {
            return Err(AppError::Conflict(
                "Invoice already exists for this job card".to_string(),
            ));
        }

        self.repository
            .create(
                request.jobcard_id,
                request.customer_id,
                request.parts_total,
                request.labor_total,
                request.grand_total,
            )
            .await
    }

    /// Factura con campos de display más las tareas y repuestos de su
    /// orden de trabajo
    pub async fn get_detail(
        &self,
        user: &AuthenticatedUser,
        id: i64,
    ) -> Result<(InvoiceDetail, Vec<JobCardTask>, Vec<JobCardSparePartDetail>), AppError> {
        let detail = self
            .repository
            .find_detail_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        Self::check_ownership(user, detail.customer_id)?;

        let tasks = self.jobcards.tasks(detail.jobcard_id).await?;
        let parts = self.jobcards.spareparts(detail.jobcard_id).await?;

        Ok((detail, tasks, parts))
    }

    pub async fn get_by_booking(
        &self,
        user: &AuthenticatedUser,
        booking_id: i64,
    ) -> Result<Invoice, AppError> {
        let invoice = self
            .repository
            .find_by_booking(booking_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Invoice not found for this booking".to_string())
            })?;

        Self::check_ownership(user, invoice.customer_id)?;

        Ok(invoice)
    }

    pub async fn list_for_customer(
        &self,
        user: &AuthenticatedUser,
        customer_id: i64,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Invoice>, PaginationMeta), AppError> {
        Self::check_ownership(user, customer_id)?;

        let invoices = self
            .repository
            .list_by_customer(customer_id, limit, offset)
            .await?;
        let total = self.repository.count_by_customer(customer_id).await?;

        Ok((invoices, PaginationMeta::new(page, limit, total)))
    }

    pub async fn list_all(
        &self,
        user: &AuthenticatedUser,
        status: Option<String>,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Invoice>, PaginationMeta), AppError> {
        require_staff(user)?;

        let status = match status {
            Some(ref value) => Some(
                InvoiceStatus::from_str(value)
                    .ok_or_else(|| AppError::BadRequest("Invalid status filter".to_string()))?,
            ),
            None => None,
        };

        let invoices = self.repository.list_all(status, limit, offset).await?;
        let total = self.repository.count_all(status).await?;

        Ok((invoices, PaginationMeta::new(page, limit, total)))
    }

    /// Actualización directa del estado de pago.
    ///
    /// Re-marcar el estado actual es un no-op idempotente; el resto de
    /// transiciones pasa por la máquina de estados. Marcar `paid` exige
    /// payment_method y estampa paid_at.
    pub async fn update_payment_status(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdatePaymentStatusRequest,
    ) -> Result<Invoice, AppError> {
        require_staff(user)?;

        let target = InvoiceStatus::from_str(&request.status)
            .ok_or_else(|| AppError::BadRequest("Invalid payment status".to_string()))?;

        let invoice = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        if invoice.status == target {
            return Ok(invoice);
        }

        if !invoice.status.can_transition(target) {
            return Err(AppError::BadRequest(
                "Invalid payment status transition".to_string(),
            ));
        }

        let stamp_paid = target == InvoiceStatus::Paid;
        if stamp_paid && request.payment_method.is_none() {
            return Err(validation_error(
                "payment_method",
                "Payment method is required",
            ));
        }

        self.repository
            .update_status(id, target, request.payment_method.as_deref(), stamp_paid)
            .await
    }

    /// Pago simulado: gateway síncrono sin llamada externa.
    pub async fn mock_payment(
        &self,
        user: &AuthenticatedUser,
        request: ProcessPaymentRequest,
    ) -> Result<Invoice, AppError> {
        let invoice_id = request
            .invoice_id
            .ok_or_else(|| validation_error("invoiceId", "Invoice ID is required"))?;
        let method = request
            .method
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| validation_error("method", "Payment method is required"))?;

        let invoice = self
            .repository
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        Self::check_ownership(user, invoice.customer_id)?;

        if invoice.status == InvoiceStatus::Paid {
            return Err(AppError::BadRequest("Invoice is already paid".to_string()));
        }

        if !invoice.status.can_transition(InvoiceStatus::Paid) {
            return Err(AppError::BadRequest(
                "Invalid payment status transition".to_string(),
            ));
        }

        self.repository
            .update_status(invoice_id, InvoiceStatus::Paid, Some(&method), true)
            .await
    }
}
