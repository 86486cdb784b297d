//! Modelo de Part
//!
//! Inventario de repuestos con stock y nivel de re-orden.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Part principal - mapea exactamente a la tabla parts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Part {
    pub id: i64,
    pub name: String,
    pub part_number: String,
    pub price: Decimal,
    pub quantity: i32,
    pub reorder_level: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    /// Un part está bajo de stock cuando queda en o por debajo del nivel de re-orden
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Request para crear un repuesto
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 50))]
    pub part_number: String,

    pub price: Decimal,

    #[validate(range(min = 0))]
    pub quantity: i32,

    #[validate(range(min = 0))]
    pub reorder_level: Option<i32>,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Request para actualizar un repuesto
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePartRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub price: Option<Decimal>,

    #[validate(range(min = 0))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0))]
    pub reorder_level: Option<i32>,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Filtros para listado de repuestos
#[derive(Debug, Deserialize)]
pub struct PartFilters {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub low_stock: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn part(quantity: i32, reorder_level: i32) -> Part {
        Part {
            id: 1,
            name: "Oil filter".to_string(),
            part_number: "OF-100".to_string(),
            price: Decimal::new(1299, 2),
            quantity,
            reorder_level,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_threshold() {
        assert!(part(3, 5).is_low_stock());
        assert!(part(5, 5).is_low_stock());
        assert!(!part(6, 5).is_low_stock());
    }
}
