//! Backend de programación de mantenimiento preventivo para flota de CEDIS
//!
//! El corazón del crate es `scheduler`: un motor puro que calcula la próxima
//! fecha de mantenimiento preventivo a partir del historial del vehículo y
//! un snapshot del calendario. El resto (API, repositories, services) es la
//! cáscara que lee proyecciones de PostgreSQL y persiste el resultado.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod utils;
