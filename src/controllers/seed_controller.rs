//! Seed de datos de demo
//!
//! Trunca y repuebla todas las tablas en una única transacción. Solo
//! habilitado en desarrollo.

use chrono::{Duration, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))
}

pub struct SeedController {
    pool: PgPool,
}

impl SeedController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn seed(&self, config: &EnvironmentConfig) -> Result<(), AppError> {
        if !config.is_development() {
            return Err(AppError::Forbidden(
                "Seeding is only available in development".to_string(),
            ));
        }

        let admin_hash = hash_password("admin123")?;
        let mechanic_hash = hash_password("mech123")?;
        let customer_hash = hash_password("cust123")?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "TRUNCATE users, vehicles, bookings, jobcards, jobcard_tasks, \
             jobcard_spareparts, parts, invoices RESTART IDENTITY CASCADE",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role) VALUES
                ('Admin', 'admin@svmms.test', $1, 'admin'),
                ('Marco Taller', 'mechanic@svmms.test', $2, 'mechanic'),
                ('Carla Cliente', 'carla@svmms.test', $3, 'customer'),
                ('Diego Cliente', 'diego@svmms.test', $3, 'customer')
            "#,
        )
        .bind(&admin_hash)
        .bind(&mechanic_hash)
        .bind(&customer_hash)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO vehicles
                (customer_id, vin, make, model, year, engine_type, registration_number, mileage)
            VALUES
                (3, '1HGBH41JXMN109186', 'Toyota', 'Corolla', 2019, 'petrol', 'ABC-1234', 42000),
                (3, '2FTRX18L1XCA01212', 'Ford', 'Ranger', 2021, 'diesel', 'XYZ-9876', 18500),
                (4, 'JH4KA7561PC008269', 'Honda', 'Civic', 2017, 'petrol', 'QRS-5555', 76300)
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO parts (name, part_number, price, quantity, reorder_level, description)
            VALUES
                ('Oil filter', 'OF-1001', 12.50, 40, 10, 'Standard spin-on oil filter'),
                ('Brake pad set', 'BP-2040', 58.00, 12, 5, 'Front axle ceramic pads'),
                ('Air filter', 'AF-3310', 18.75, 3, 5, 'Panel air filter'),
                ('Spark plug', 'SP-0909', 7.20, 80, 20, 'Iridium spark plug')
            "#,
        )
        .execute(&mut *tx)
        .await?;

        let today = Utc::now().date_naive();
        let morning = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
        let afternoon = NaiveTime::from_hms_opt(14, 30, 0).unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO bookings
                (customer_id, vehicle_id, service_type, booking_date, booking_time,
                 description, estimated_cost, status)
            VALUES
                (3, 1, 'Full service', $1, $3, 'Annual full service', 180.00, 'completed'),
                (3, 2, 'Brake inspection', $2, $4, NULL, 90.00, 'pending'),
                (4, 3, 'Oil change', $2, $3, 'Customer reports low oil', 45.00, 'approved')
            "#,
        )
        .bind(today - Duration::days(7))
        .bind(today + Duration::days(3))
        .bind(morning)
        .bind(afternoon)
        .execute(&mut *tx)
        .await?;

        // Orden completada con su factura unpaid para probar el flujo de pago
        sqlx::query(
            r#"
            INSERT INTO jobcards
                (booking_id, customer_id, vehicle_id, mechanic_id, status,
                 labor_cost, total_cost, started_at, completed_at)
            VALUES (1, 3, 1, 2, 'completed', 120.00, 151.25, NOW() - INTERVAL '7 days', NOW())
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO jobcard_tasks (jobcard_id, task_name, task_cost, status) VALUES
                (1, 'Engine oil and filter change', 60.00, 'completed'),
                (1, 'Multi-point inspection', 60.00, 'completed')
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO jobcard_spareparts (jobcard_id, part_id, quantity, unit_price, total_price)
            VALUES
                (1, 1, 1, 12.50, 12.50),
                (1, 3, 1, 18.75, 18.75)
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO invoices
                (jobcard_id, customer_id, parts_total, labor_total, grand_total, status)
            VALUES (1, 3, $1, $2, $3, 'unpaid')
            "#,
        )
        .bind(Decimal::new(3125, 2))
        .bind(Decimal::new(12000, 2))
        .bind(Decimal::new(15125, 2))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("🌱 Base de datos repoblada con datos de demo");

        Ok(())
    }
}
