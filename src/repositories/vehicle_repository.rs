use sqlx::PgPool;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        customer_id: i64,
        vin: &str,
        make: &str,
        model: &str,
        year: i32,
        engine_type: Option<&str>,
        registration_number: &str,
        mileage: i32,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (customer_id, vin, make, model, year, engine_type,
                                  registration_number, mileage, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(vin)
        .bind(make)
        .bind(model)
        .bind(year)
        .bind(engine_type)
        .bind(registration_number)
        .bind(mileage)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn vin_exists(&self, vin: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE vin = $1)")
                .bind(vin)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    pub async fn registration_exists(&self, registration_number: &str) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1)",
        )
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    pub async fn list_by_customer(
        &self,
        customer_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
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

        Ok(vehicles)
    }

    pub async fn count_by_customer(&self, customer_id: i64) -> Result<i64, AppError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE customer_id = $1")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        make: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        engine_type: Option<String>,
        registration_number: Option<String>,
        mileage: Option<i32>,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET make = $2, model = $3, year = $4, engine_type = $5,
                registration_number = $6, mileage = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(make.unwrap_or(current.make))
        .bind(model.unwrap_or(current.model))
        .bind(year.unwrap_or(current.year))
        .bind(engine_type.or(current.engine_type))
        .bind(registration_number.unwrap_or(current.registration_number))
        .bind(mileage.unwrap_or(current.mileage))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }
}
