//! Motor de reglas de intervalo
//!
//! Calcula cuántos días deben pasar hasta la próxima visita preventiva a
//! partir del historial del vehículo: cantidad de visitas previas ("veces"),
//! tipo de la última visita y, opcionalmente, las tareas realizadas al
//! cerrar el ticket.

use chrono::NaiveDate;

use crate::models::MaintenanceKind;

use super::config::{SchedulerConfig, TaskCategory};
use super::error::ScheduleError;

// Umbrales de historial: con más visitas el seguimiento se aprieta
const MID_HISTORY_VISITS: usize = 3;
const HIGH_HISTORY_VISITS: usize = 5;

/// Entrada de historial que consume el motor. Proyección mínima de un
/// MaintenanceRecord: tipo y fechas, nada más.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: MaintenanceKind,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl HistoryEntry {
    /// Fecha que ancla el cálculo: fin si existe, inicio si sigue abierto
    pub fn anchor_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }
}

/// Validar el historial antes de calcular. Un registro con fin anterior al
/// inicio es dato corrupto y se rechaza sin reintento.
pub fn validate_history(history: &[HistoryEntry]) -> Result<(), ScheduleError> {
    for entry in history {
        if let Some(end) = entry.end_date {
            if end < entry.start_date {
                return Err(ScheduleError::InvalidVehicleState(format!(
                    "registro con fecha fin {} anterior a fecha inicio {}",
                    end, entry.start_date
                )));
            }
        }
    }
    Ok(())
}

/// Registro más reciente del historial, por fecha de ancla.
/// Desempate por fecha de inicio para mantener el cálculo determinista.
pub fn most_recent(history: &[HistoryEntry]) -> Option<&HistoryEntry> {
    history
        .iter()
        .max_by_key(|e| (e.anchor_date(), e.start_date))
}

/// Fecha de referencia desde la que se suma el intervalo:
/// fin de la última visita, o su inicio si sigue abierta, o hoy si el
/// vehículo no tiene historial.
pub fn reference_date(history: &[HistoryEntry], today: NaiveDate) -> NaiveDate {
    most_recent(history)
        .map(|e| e.anchor_date())
        .unwrap_or(today)
}

/// Calcular el intervalo base en días hasta la próxima visita.
///
/// Reglas:
/// - menos de 3 visitas previas -> intervalo largo (45 por default)
/// - 3 o 4 visitas -> intervalo medio (40)
/// - 5 o más -> intervalo corto (35)
/// - si se reportan tareas, el mínimo de sus intervalos nominales
///   reemplaza la regla por conteo (el componente de vida más corta manda)
/// - si la última visita fue correctiva, el resultado se acota al techo
///   correctivo (30): una falla no planeada amerita seguimiento cercano
pub fn compute_base_interval(
    history: &[HistoryEntry],
    tasks: &[TaskCategory],
    config: &SchedulerConfig,
) -> Result<u32, ScheduleError> {
    validate_history(history)?;

    let visits = history.len();
    let by_count = if visits < MID_HISTORY_VISITS {
        config.interval_low_history_days
    } else if visits < HIGH_HISTORY_VISITS {
        config.interval_mid_history_days
    } else {
        config.interval_high_history_days
    };

    let mut interval = match config.task_intervals.min_interval(tasks) {
        Some(task_interval) => task_interval,
        None => by_count,
    };

    if let Some(last) = most_recent(history) {
        if last.kind == MaintenanceKind::Corrective {
            interval = interval.min(config.corrective_cap_days);
        }
    }

    Ok(interval)
}
