//! Modelos del sistema
//!
//! Structs que mapean a las tablas de PostgreSQL junto con sus
//! requests/responses de API.

pub mod booking;
pub mod invoice;
pub mod jobcard;
pub mod part;
pub mod payment;
pub mod user;
pub mod vehicle;
