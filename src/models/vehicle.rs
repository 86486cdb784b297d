//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub customer_id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub engine_type: Option<String>,
    pub registration_number: String,
    pub mileage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    /// Solo lo usa un admin para crear en nombre de un cliente
    pub customer_id: Option<i64>,

    #[validate(length(min = 5, max = 32))]
    pub vin: String,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2035))]
    pub year: i32,

    #[validate(length(max = 50))]
    pub engine_type: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub registration_number: String,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2035))]
    pub year: Option<i32>,

    #[validate(length(max = 50))]
    pub engine_type: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub registration_number: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
}

/// Filtros para listado de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
