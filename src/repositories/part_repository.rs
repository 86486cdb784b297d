use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::part::Part;
use crate::utils::errors::AppError;

pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        part_number: &str,
        price: Decimal,
        quantity: i32,
        reorder_level: i32,
        description: Option<&str>,
    ) -> Result<Part, AppError> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            INSERT INTO parts (name, part_number, price, quantity, reorder_level,
                               description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(part_number)
        .bind(price)
        .bind(quantity)
        .bind(reorder_level)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Part>, AppError> {
        let part = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(part)
    }

    pub async fn part_number_exists(&self, part_number: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM parts WHERE part_number = $1)")
                .bind(part_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    pub async fn list(
        &self,
        low_stock_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT * FROM parts
            WHERE (NOT $1 OR quantity <= reorder_level)
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(low_stock_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    pub async fn count(&self, low_stock_only: bool) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM parts WHERE (NOT $1 OR quantity <= reorder_level)",
        )
        .bind(low_stock_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        price: Option<Decimal>,
        quantity: Option<i32>,
        reorder_level: Option<i32>,
        description: Option<String>,
    ) -> Result<Part, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))?;

        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts
            SET name = $2, price = $3, quantity = $4, reorder_level = $5,
                description = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(price.unwrap_or(current.price))
        .bind(quantity.unwrap_or(current.quantity))
        .bind(reorder_level.unwrap_or(current.reorder_level))
        .bind(description.or(current.description))
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Part not found".to_string()));
        }

        Ok(())
    }
}
