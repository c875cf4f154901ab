//! Motor de programación de mantenimiento preventivo
//!
//! Este módulo contiene el motor puro de scheduling: recibe el historial de
//! un vehículo y un snapshot del calendario de la flota, y devuelve una única
//! fecha futura válida. No toca la base de datos ni hace I/O; todo el estado
//! se pasa como parámetro para que el motor sea determinista y testeable.

pub mod calendar;
pub mod capacity;
pub mod config;
pub mod engine;
pub mod error;
pub mod intervals;
pub mod snapshot;
pub mod spacing;

pub use config::{PoolKey, SchedulerConfig, TaskCategory, TaskIntervalTable};
pub use engine::{schedule_next, VehicleInfo};
pub use error::ScheduleError;
pub use intervals::{compute_base_interval, reference_date, HistoryEntry};
pub use snapshot::{OpenSlot, ScheduleSnapshot};
