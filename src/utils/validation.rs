//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{NaiveDate, NaiveTime};
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.message = Some("Date must have format YYYY-MM-DD".into());
        error
    })
}

/// Validar y convertir string a tiempo
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            let mut error = ValidationError::new("time");
            error.message = Some("Time must have format HH:MM or HH:MM:SS".into());
            error
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2025-08-24").is_ok());
        assert!(validate_date("24/08/2025").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_time_both_formats() {
        assert!(validate_time("09:30").is_ok());
        assert!(validate_time("09:30:00").is_ok());
        assert!(validate_time("9h30").is_err());
    }

}
