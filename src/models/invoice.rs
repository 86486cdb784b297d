//! Modelo de Invoice
//!
//! Factura generada al completar una orden de trabajo. El estado de pago
//! sigue una máquina de estados unidireccional con la única excepción del
//! refund disparado por un admin.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

/// Estado de pago - mapea al ENUM invoice_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Refunded,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Refunded => "refunded",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(InvoiceStatus::Unpaid),
            "paid" => Some(InvoiceStatus::Paid),
            "refunded" => Some(InvoiceStatus::Refunded),
            "overdue" => Some(InvoiceStatus::Overdue),
            _ => None,
        }
    }

    /// Transiciones permitidas de la máquina de estados.
    ///
    /// unpaid -> paid | overdue, overdue -> paid, paid -> refunded.
    /// Re-marcar el estado actual es un no-op idempotente. No hay salida
    /// de refunded.
    pub fn can_transition(self, to: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        if self == to {
            return true;
        }
        matches!(
            (self, to),
            (Unpaid, Paid) | (Unpaid, Overdue) | (Overdue, Paid) | (Paid, Refunded)
        )
    }
}

/// Invoice principal - mapea exactamente a la tabla invoices
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i64,
    pub jobcard_id: i64,
    pub customer_id: i64,
    pub parts_total: Decimal,
    pub labor_total: Decimal,
    pub grand_total: Decimal,
    pub status: InvoiceStatus,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Invoice con campos de vehículo y cliente para display
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoiceDetail {
    pub id: i64,
    pub jobcard_id: i64,
    pub customer_id: i64,
    pub parts_total: Decimal,
    pub labor_total: Decimal,
    pub grand_total: Decimal,
    pub status: InvoiceStatus,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub registration_number: String,
}

/// Request para crear una factura desde los totales de una orden de trabajo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    pub jobcard_id: i64,
    pub customer_id: i64,
    pub parts_total: Decimal,
    pub labor_total: Decimal,
    pub grand_total: Decimal,
}

/// Request para actualizar el estado de pago
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: String,
    pub payment_method: Option<String>,
}

/// Filtros para listado de facturas
#[derive(Debug, Deserialize)]
pub struct InvoiceFilters {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(InvoiceStatus::Unpaid.can_transition(InvoiceStatus::Paid));
        assert!(InvoiceStatus::Unpaid.can_transition(InvoiceStatus::Overdue));
        assert!(InvoiceStatus::Overdue.can_transition(InvoiceStatus::Paid));
        assert!(InvoiceStatus::Paid.can_transition(InvoiceStatus::Refunded));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!InvoiceStatus::Paid.can_transition(InvoiceStatus::Unpaid));
        assert!(!InvoiceStatus::Overdue.can_transition(InvoiceStatus::Unpaid));
        assert!(!InvoiceStatus::Unpaid.can_transition(InvoiceStatus::Refunded));
    }

    #[test]
    fn test_refunded_is_terminal() {
        assert!(!InvoiceStatus::Refunded.can_transition(InvoiceStatus::Unpaid));
        assert!(!InvoiceStatus::Refunded.can_transition(InvoiceStatus::Paid));
        assert!(!InvoiceStatus::Refunded.can_transition(InvoiceStatus::Overdue));
    }

    #[test]
    fn test_same_status_is_idempotent() {
        for status in [
            InvoiceStatus::Unpaid,
            InvoiceStatus::Paid,
            InvoiceStatus::Refunded,
            InvoiceStatus::Overdue,
        ] {
            assert!(status.can_transition(status));
        }
    }
}
