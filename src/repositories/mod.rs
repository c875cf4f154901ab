//! Repositories module
//!
//! Acceso a datos vía sqlx/PostgreSQL. Los repositories son la única capa
//! que toca la base; el motor de scheduling recibe proyecciones y nunca
//! consulta directamente.

pub mod cedis_repository;
pub mod maintenance_repository;
pub mod vehicle_repository;
