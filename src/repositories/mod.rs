//! Repositorios de acceso a datos
//!
//! SQL parametrizado sobre el pool de PostgreSQL; cada repositorio cubre
//! una tabla y sus consultas asociadas.

pub mod booking_repository;
pub mod invoice_repository;
pub mod jobcard_repository;
pub mod part_repository;
pub mod user_repository;
pub mod vehicle_repository;
