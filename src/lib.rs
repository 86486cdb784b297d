//! Backend de gestión de mantenimiento de vehículos
//!
//! API REST con autenticación JWT y dashboards por rol: reservas,
//! órdenes de trabajo, inventario de repuestos, facturas y pagos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
