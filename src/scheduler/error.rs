//! Errores del motor de scheduling
//!
//! Errores a nivel librería, independientes de HTTP. La conversión a
//! respuestas de la API vive en `utils/errors.rs`.

use thiserror::Error;

/// Fallas posibles al calcular la próxima fecha de mantenimiento
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Datos de vehículo o historial faltantes o malformados.
    /// No se reintenta; se rechaza la solicitud.
    #[error("Estado de vehículo inválido: {0}")]
    InvalidVehicleState(String),

    /// No se encontró fecha válida dentro del horizonte de búsqueda.
    /// El caller puede reintentar con parámetros relajados o escalar
    /// a programación manual; nunca se devuelve una fecha inválida.
    #[error("Búsqueda agotada: sin fecha válida dentro de {horizon_days} días")]
    Exhausted { horizon_days: i64 },
}
