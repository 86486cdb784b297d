//! Modelo de JobCard
//!
//! Orden de trabajo abierta sobre una reserva aprobada, con sus tareas
//! de mano de obra y repuestos consumidos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

/// Estado de la orden de trabajo - mapea al ENUM jobcard_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "jobcard_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobCardStatus {
    InProgress,
    OnHold,
    Completed,
}

impl JobCardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCardStatus::InProgress => "in_progress",
            JobCardStatus::OnHold => "on_hold",
            JobCardStatus::Completed => "completed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "in_progress" => Some(JobCardStatus::InProgress),
            "on_hold" => Some(JobCardStatus::OnHold),
            "completed" => Some(JobCardStatus::Completed),
            _ => None,
        }
    }
}

/// Estado de una tarea individual - mapea al ENUM task_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

/// JobCard principal - mapea exactamente a la tabla jobcards
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobCard {
    pub id: i64,
    pub booking_id: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub mechanic_id: i64,
    pub status: JobCardStatus,
    pub labor_cost: Decimal,
    pub total_cost: Decimal,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tarea de mano de obra de una orden de trabajo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobCardTask {
    pub id: i64,
    pub jobcard_id: i64,
    pub task_name: String,
    pub task_cost: Decimal,
    pub status: TaskStatus,
}

/// Repuesto consumido por una orden de trabajo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobCardSparePart {
    pub id: i64,
    pub jobcard_id: i64,
    pub part_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Repuesto consumido con el nombre del part para display
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobCardSparePartDetail {
    pub id: i64,
    pub jobcard_id: i64,
    pub part_id: i64,
    pub part_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Request para abrir una orden de trabajo desde una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobCardRequest {
    pub booking_id: i64,
    pub mechanic_id: i64,
}

/// Request para añadir una tarea de mano de obra
#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskRequest {
    #[validate(length(min = 2, max = 200))]
    pub task_name: String,

    pub task_cost: Decimal,
}

/// Request para consumir un repuesto del stock
#[derive(Debug, Deserialize, Validate)]
pub struct AddSparePartRequest {
    pub part_id: i64,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Filtros para listado de órdenes de trabajo
#[derive(Debug, Deserialize)]
pub struct JobCardFilters {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
