//! Controllers: lógica de negocio entre rutas y repositorios

pub mod auth_controller;
pub mod booking_controller;
pub mod invoice_controller;
pub mod jobcard_controller;
pub mod part_controller;
pub mod payment_controller;
pub mod seed_controller;
pub mod user_controller;
pub mod vehicle_controller;
