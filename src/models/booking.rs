//! Modelo de Booking
//!
//! Reservas de servicio de un cliente para uno de sus vehículos.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

/// Estado de la reserva - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "approved" => Some(BookingStatus::Approved),
            "in_progress" => Some(BookingStatus::InProgress),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub service_type: String,
    pub booking_date: NaiveDate,
    pub booking_time: NaiveTime,
    pub status: BookingStatus,
    pub description: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub vehicle_id: i64,

    #[validate(length(min = 2, max = 100))]
    pub service_type: String,

    /// Formato YYYY-MM-DD
    pub booking_date: String,

    /// Formato HH:MM o HH:MM:SS
    pub booking_time: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub estimated_cost: Option<Decimal>,
}

/// Request para actualizar el estado de una reserva
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

/// Filtros para listado de reservas
#[derive(Debug, Deserialize)]
pub struct BookingFilters {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}
