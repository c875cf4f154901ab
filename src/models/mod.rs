//! Models module
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL:
//! vehículos, CEDIS y registros de mantenimiento.

pub mod cedis;
pub mod maintenance;
pub mod vehicle;

pub use cedis::*;
pub use maintenance::*;
pub use vehicle::*;
