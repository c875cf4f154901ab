//! Controllers module
//!
//! Validación de requests, orquestación de services/repositories y mapeo
//! a DTOs de respuesta.

pub mod cedis_controller;
pub mod maintenance_controller;
pub mod vehicle_controller;
