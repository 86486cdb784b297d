use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingStatus};
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        customer_id: i64,
        vehicle_id: i64,
        service_type: &str,
        booking_date: NaiveDate,
        booking_time: NaiveTime,
        description: Option<&str>,
        estimated_cost: Option<Decimal>,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (customer_id, vehicle_id, service_type, booking_date,
                                  booking_time, status, description, estimated_cost,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(service_type)
        .bind(booking_date)
        .bind(booking_time)
        .bind(description)
        .bind(estimated_cost)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn list_all(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::booking_status IS NULL OR status = $1)
            ORDER BY booking_date DESC, booking_time DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn count_all(&self, status: Option<BookingStatus>) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings WHERE ($1::booking_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    pub async fn list_by_customer(
        &self,
        customer_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE customer_id = $1
            ORDER BY booking_date DESC, booking_time DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn count_by_customer(&self, customer_id: i64) -> Result<i64, AppError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE customer_id = $1")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        Ok(booking)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        Ok(())
    }
}
