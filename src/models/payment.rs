//! Modelo de Payment
//!
//! No existe tabla de pagos: un "payment" es una vista derivada de los
//! campos payment_method / paid_at / grand_total de la factura, con el
//! identificador sintético `pay_<invoice_id>`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::invoice::{Invoice, InvoiceStatus};

/// Prefijo de los identificadores sintéticos de pago
pub const PAYMENT_ID_PREFIX: &str = "pay_";

/// Identificador sintético de pago para una factura
pub fn payment_id(invoice_id: i64) -> String {
    format!("{}{}", PAYMENT_ID_PREFIX, invoice_id)
}

/// Resolver el id de factura desde un identificador sintético de pago
pub fn parse_payment_id(payment_id: &str) -> Option<i64> {
    payment_id
        .strip_prefix(PAYMENT_ID_PREFIX)
        .and_then(|id| id.parse::<i64>().ok())
}

/// Entrada de historial de pago sintetizada desde la factura
#[derive(Debug, Clone, Serialize)]
pub struct PaymentHistoryEntry {
    pub id: String,
    pub invoice_id: i64,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Sintetizar el historial de pagos de una factura.
///
/// Cero entradas si nunca se pagó, exactamente una si la factura está
/// (o estuvo, en caso de refund) pagada.
pub fn payment_history(invoice: &Invoice) -> Vec<PaymentHistoryEntry> {
    match invoice.status {
        InvoiceStatus::Paid | InvoiceStatus::Refunded => vec![PaymentHistoryEntry {
            id: payment_id(invoice.id),
            invoice_id: invoice.id,
            amount: invoice.grand_total,
            payment_method: invoice.payment_method.clone(),
            paid_at: invoice.paid_at,
        }],
        InvoiceStatus::Unpaid | InvoiceStatus::Overdue => Vec::new(),
    }
}

/// Request para procesar un pago (gateway simulado)
///
/// Los campos son opcionales para poder acumular errores de validación
/// por campo antes de tocar la base de datos.
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    #[serde(rename = "invoiceId", alias = "invoice_id")]
    pub invoice_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub method: Option<String>,
}

/// Request de refund (solo admin)
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub reason: Option<String>,
}

/// Registro de refund devuelto por la API
#[derive(Debug, Serialize)]
pub struct RefundRecord {
    pub amount: Decimal,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn invoice(status: InvoiceStatus, paid: bool) -> Invoice {
        Invoice {
            id: 7,
            jobcard_id: 3,
            customer_id: 2,
            parts_total: Decimal::new(5000, 2),
            labor_total: Decimal::new(7500, 2),
            grand_total: Decimal::new(12500, 2),
            status,
            payment_method: paid.then(|| "credit_card".to_string()),
            paid_at: paid.then(Utc::now),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_payment_id_round_trip() {
        assert_eq!(payment_id(42), "pay_42");
        assert_eq!(parse_payment_id("pay_42"), Some(42));
        assert_eq!(parse_payment_id("42"), None);
        assert_eq!(parse_payment_id("pay_abc"), None);
    }

    #[test]
    fn test_history_empty_for_unpaid() {
        assert!(payment_history(&invoice(InvoiceStatus::Unpaid, false)).is_empty());
        assert!(payment_history(&invoice(InvoiceStatus::Overdue, false)).is_empty());
    }

    #[test]
    fn test_history_single_entry_for_paid() {
        let entries = payment_history(&invoice(InvoiceStatus::Paid, true));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "pay_7");
        assert_eq!(entries[0].amount, Decimal::new(12500, 2));
        assert_eq!(entries[0].payment_method.as_deref(), Some("credit_card"));
        assert!(entries[0].paid_at.is_some());
    }
}
