//! Controller de pagos
//!
//! Los pagos son una vista derivada de la factura: procesar un pago
//! marca la factura como pagada, el historial se sintetiza desde sus
//! campos y el refund usa el identificador `pay_<invoice_id>`.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::invoice::{Invoice, InvoiceStatus};
use crate::models::payment::{
    parse_payment_id, payment_history, PaymentHistoryEntry, ProcessPaymentRequest, RefundRecord,
};
use crate::models::user::Role;
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::utils::errors::{validation_errors, AppError, ACCESS_DENIED};

pub struct PaymentController {
    repository: InvoiceRepository,
}

impl PaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool),
        }
    }

    fn check_ownership(user: &AuthenticatedUser, invoice: &Invoice) -> Result<(), AppError> {
        if user.role == Role::Customer && invoice.customer_id != user.id {
            return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
        }
        Ok(())
    }

    /// Validar los campos del request acumulando un error por campo.
    /// Se ejecuta antes de cualquier acceso a base de datos.
    fn validate_process_request(
        request: &ProcessPaymentRequest,
    ) -> Result<(i64, Decimal, String), AppError> {
        let mut errors: Vec<(&'static str, &'static str)> = Vec::new();

        if request.invoice_id.is_none() {
            errors.push(("invoiceId", "Invoice ID is required"));
        }
        let amount = request.amount.filter(|a| *a > Decimal::ZERO);
        if amount.is_none() {
            errors.push(("amount", "Valid amount is required"));
        }
        let method = request
            .method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        if method.is_none() {
            errors.push(("method", "Payment method is required"));
        }

        match (request.invoice_id, amount, method) {
            (Some(invoice_id), Some(amount), Some(method)) => {
                Ok((invoice_id, amount, method.to_string()))
            }
            _ => Err(validation_errors(&errors)),
        }
    }

    /// Procesar un pago contra el gateway simulado
    pub async fn process(
        &self,
        user: &AuthenticatedUser,
        request: ProcessPaymentRequest,
    ) -> Result<(Decimal, String, Invoice), AppError> {
        let (invoice_id, amount, method) = Self::validate_process_request(&request)?;

        let invoice = self
            .repository
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        Self::check_ownership(user, &invoice)?;

        if invoice.status == InvoiceStatus::Paid {
            return Err(AppError::BadRequest("Invoice is already paid".to_string()));
        }

        if !invoice.status.can_transition(InvoiceStatus::Paid) {
            return Err(AppError::BadRequest(
                "Invalid payment status transition".to_string(),
            ));
        }

        let invoice = self
            .repository
            .update_status(invoice_id, InvoiceStatus::Paid, Some(&method), true)
            .await?;

        Ok((amount, method, invoice))
    }

    /// Historial sintetizado: cero o una entrada según el estado de pago
    pub async fn history(
        &self,
        user: &AuthenticatedUser,
        invoice_id: i64,
    ) -> Result<Vec<PaymentHistoryEntry>, AppError> {
        let invoice = self
            .repository
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        Self::check_ownership(user, &invoice)?;

        Ok(payment_history(&invoice))
    }

    /// Refund (solo admin): localiza la factura detrás del identificador
    /// sintético `pay_<invoiceId>` y la marca como refunded.
    pub async fn refund(
        &self,
        payment_id: &str,
        reason: Option<String>,
    ) -> Result<(RefundRecord, Invoice), AppError> {
        let invoice_id = parse_payment_id(payment_id)
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        let invoice = self
            .repository
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        match invoice.status {
            // Sin pago registrado no existe el payment derivado
            InvoiceStatus::Unpaid | InvoiceStatus::Overdue => {
                return Err(AppError::NotFound("Payment not found".to_string()));
            }
            InvoiceStatus::Refunded => {
                return Err(AppError::BadRequest(
                    "Payment has already been refunded".to_string(),
                ));
            }
            InvoiceStatus::Paid => {}
        }

        let invoice = self
            .repository
            .update_status(invoice_id, InvoiceStatus::Refunded, None, false)
            .await?;

        let refund = RefundRecord {
            amount: invoice.grand_total,
            reason: reason.unwrap_or_else(|| "Customer refund".to_string()),
        };

        Ok((refund, invoice))
    }
}
