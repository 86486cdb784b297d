use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::invoice::{Invoice, InvoiceDetail, InvoiceStatus};
use crate::utils::errors::AppError;

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        jobcard_id: i64,
        customer_id: i64,
        parts_total: Decimal,
        labor_total: Decimal,
        grand_total: Decimal,
    ) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (jobcard_id, customer_id, parts_total, labor_total,
                                  grand_total, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'unpaid', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(jobcard_id)
        .bind(customer_id)
        .bind(parts_total)
        .bind(labor_total)
        .bind(grand_total)
        .fetch_one(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    /// Factura con campos de cliente y vehículo para display
    pub async fn find_detail_by_id(&self, id: i64) -> Result<Option<InvoiceDetail>, AppError> {
        let detail = sqlx::query_as::<_, InvoiceDetail>(
            r#"
            SELECT i.id, i.jobcard_id, i.customer_id, i.parts_total, i.labor_total,
                   i.grand_total, i.status, i.payment_method, i.paid_at,
                   i.created_at, i.updated_at,
                   u.name AS customer_name, u.email AS customer_email,
                   v.make AS vehicle_make, v.model AS vehicle_model, v.registration_number
            FROM invoices i
            JOIN users u ON u.id = i.customer_id
            JOIN jobcards j ON j.id = i.jobcard_id
            JOIN vehicles v ON v.id = j.vehicle_id
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    pub async fn find_by_booking(&self, booking_id: i64) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT i.* FROM invoices i
            JOIN jobcards j ON j.id = i.jobcard_id
            WHERE j.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn exists_for_jobcard(&self, jobcard_id: i64) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM invoices WHERE jobcard_id = $1)")
                .bind(jobcard_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    pub async fn list_by_customer(
        &self,
        customer_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE customer_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn count_by_customer(&self, customer_id: i64) -> Result<i64, AppError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM invoices WHERE customer_id = $1")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    pub async fn list_all(
        &self,
        status: Option<InvoiceStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE ($1::invoice_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn count_all(&self, status: Option<InvoiceStatus>) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM invoices WHERE ($1::invoice_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Actualizar el estado de pago.
    ///
    /// `stamp_paid` fija paid_at = NOW() y registra el payment_method; las
    /// demás transiciones dejan intactos los campos de pago históricos.
    pub async fn update_status(
        &self,
        id: i64,
        status: InvoiceStatus,
        payment_method: Option<&str>,
        stamp_paid: bool,
    ) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET status = $2,
                payment_method = CASE WHEN $4 THEN $3 ELSE payment_method END,
                paid_at = CASE WHEN $4 THEN NOW() ELSE paid_at END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(payment_method)
        .bind(stamp_paid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        Ok(invoice)
    }
}
