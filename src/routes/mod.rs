//! Routers de la API

pub mod cedis_routes;
pub mod maintenance_routes;
pub mod vehicle_routes;
