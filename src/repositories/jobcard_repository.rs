use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::invoice::Invoice;
use crate::models::jobcard::{JobCard, JobCardSparePart, JobCardSparePartDetail, JobCardTask};
use crate::models::part::Part;
use crate::utils::errors::AppError;

pub struct JobCardRepository {
    pool: PgPool,
}

impl JobCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Abrir la orden y pasar la reserva a in_progress en una única
    /// transacción.
    pub async fn create(
        &self,
        booking_id: i64,
        customer_id: i64,
        vehicle_id: i64,
        mechanic_id: i64,
    ) -> Result<JobCard, AppError> {
        let mut tx = self.pool.begin().await?;

        let jobcard = sqlx::query_as::<_, JobCard>(
            r#"
            INSERT INTO jobcards (booking_id, customer_id, vehicle_id, mechanic_id, status,
                                  labor_cost, total_cost, started_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'in_progress', 0, 0, NOW(), NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(mechanic_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE bookings SET status = 'in_progress', updated_at = NOW() WHERE id = $1")
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(jobcard)
    }

    pub async fn exists_for_booking(&self, booking_id: i64) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM jobcards WHERE booking_id = $1)")
                .bind(booking_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<JobCard>, AppError> {
        let jobcard = sqlx::query_as::<_, JobCard>("SELECT * FROM jobcards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(jobcard)
    }

    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<JobCard>, AppError> {
        let jobcards = sqlx::query_as::<_, JobCard>(
            "SELECT * FROM jobcards ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobcards)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobcards")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    pub async fn list_by_mechanic(
        &self,
        mechanic_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobCard>, AppError> {
        let jobcards = sqlx::query_as::<_, JobCard>(
            r#"
            SELECT * FROM jobcards
            WHERE mechanic_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(mechanic_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobcards)
    }

    pub async fn count_by_mechanic(&self, mechanic_id: i64) -> Result<i64, AppError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM jobcards WHERE mechanic_id = $1")
                .bind(mechanic_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    pub async fn tasks(&self, jobcard_id: i64) -> Result<Vec<JobCardTask>, AppError> {
        let tasks = sqlx::query_as::<_, JobCardTask>(
            "SELECT * FROM jobcard_tasks WHERE jobcard_id = $1 ORDER BY id",
        )
        .bind(jobcard_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn spareparts(
        &self,
        jobcard_id: i64,
    ) -> Result<Vec<JobCardSparePartDetail>, AppError> {
        let parts = sqlx::query_as::<_, JobCardSparePartDetail>(
            r#"
            SELECT sp.id, sp.jobcard_id, sp.part_id, p.name AS part_name,
                   sp.quantity, sp.unit_price, sp.total_price
            FROM jobcard_spareparts sp
            JOIN parts p ON p.id = sp.part_id
            WHERE sp.jobcard_id = $1
            ORDER BY sp.id
            "#,
        )
        .bind(jobcard_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    pub async fn add_task(
        &self,
        jobcard_id: i64,
        task_name: &str,
        task_cost: Decimal,
    ) -> Result<JobCardTask, AppError> {
        let mut tx = self.pool.begin().await?;

        let task = sqlx::query_as::<_, JobCardTask>(
            r#"
            INSERT INTO jobcard_tasks (jobcard_id, task_name, task_cost, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(jobcard_id)
        .bind(task_name)
        .bind(task_cost)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE jobcards
            SET labor_cost = labor_cost + $2, total_cost = total_cost + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(jobcard_id)
        .bind(task_cost)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(task)
    }

    /// Consumir un repuesto del stock para una orden de trabajo.
    ///
    /// Decrementa el stock, registra el consumo y actualiza el total de la
    /// orden dentro de una única transacción; el part se bloquea con
    /// FOR UPDATE para que dos órdenes no consuman las mismas unidades.
    pub async fn consume_part(
        &self,
        jobcard_id: i64,
        part_id: i64,
        quantity: i32,
    ) -> Result<JobCardSparePart, AppError> {
        let mut tx = self.pool.begin().await?;

        let part = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE id = $1 FOR UPDATE")
            .bind(part_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))?;

        if part.quantity < quantity {
            return Err(AppError::BadRequest(
                "Insufficient stock for this part".to_string(),
            ));
        }

        sqlx::query("UPDATE parts SET quantity = quantity - $2, updated_at = NOW() WHERE id = $1")
            .bind(part_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

        let total_price = part.price * Decimal::from(quantity);

        let sparepart = sqlx::query_as::<_, JobCardSparePart>(
            r#"
            INSERT INTO jobcard_spareparts (jobcard_id, part_id, quantity, unit_price, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(jobcard_id)
        .bind(part_id)
        .bind(quantity)
        .bind(part.price)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE jobcards SET total_cost = total_cost + $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(jobcard_id)
        .bind(total_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(sparepart)
    }

    /// Completar una orden de trabajo y emitir su factura.
    ///
    /// Recalcula los totales desde las tareas y repuestos registrados,
    /// marca la orden como completada, inserta la factura `unpaid` y
    /// cierra la reserva asociada en la misma transacción.
    pub async fn complete(&self, jobcard_id: i64) -> Result<(JobCard, Invoice), AppError> {
        let mut tx = self.pool.begin().await?;

        let labor_total: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(task_cost), 0) FROM jobcard_tasks WHERE jobcard_id = $1",
        )
        .bind(jobcard_id)
        .fetch_one(&mut *tx)
        .await?;

        let parts_total: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_price), 0) FROM jobcard_spareparts WHERE jobcard_id = $1",
        )
        .bind(jobcard_id)
        .fetch_one(&mut *tx)
        .await?;

        let grand_total = labor_total.0 + parts_total.0;

        let jobcard = sqlx::query_as::<_, JobCard>(
            r#"
            UPDATE jobcards
            SET status = 'completed', labor_cost = $2, total_cost = $3,
                completed_at = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(jobcard_id)
        .bind(labor_total.0)
        .bind(grand_total)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE jobcard_tasks SET status = 'completed' WHERE jobcard_id = $1")
            .bind(jobcard_id)
            .execute(&mut *tx)
            .await?;

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (jobcard_id, customer_id, parts_total, labor_total,
                                  grand_total, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'unpaid', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(jobcard_id)
        .bind(jobcard.customer_id)
        .bind(parts_total.0)
        .bind(labor_total.0)
        .bind(grand_total)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE bookings SET status = 'completed', updated_at = NOW() WHERE id = $1")
            .bind(jobcard.booking_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((jobcard, invoice))
    }
}
