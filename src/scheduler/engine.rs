//! Orquestador de scheduling
//!
//! Compone las reglas de calendario, separación y capacidad sobre el
//! intervalo base: calcula la fecha candidata inicial y la avanza de un día
//! a la vez hasta que las tres políticas pasan simultáneamente, o hasta
//! agotar el horizonte de búsqueda.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::calendar::{clamp_to_future, is_disallowed_day};
use super::capacity::has_capacity;
use super::config::{SchedulerConfig, TaskCategory};
use super::error::ScheduleError;
use super::intervals::{compute_base_interval, reference_date, HistoryEntry};
use super::snapshot::ScheduleSnapshot;
use super::spacing::violates_spacing;

/// Proyección mínima del vehículo que necesita el motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleInfo {
    pub id: Uuid,
    pub cedis_id: Option<Uuid>,
}

/// Calcular la próxima fecha de mantenimiento preventivo.
///
/// Función pura: con entradas idénticas (historial, snapshot, config y
/// `today`) devuelve siempre la misma fecha. Pipeline:
/// intervalo base -> clamp a futuro -> avance diario hasta que calendario,
/// separación y capacidad pasen a la vez para el mismo candidato.
///
/// La separación se evalúa dentro del pool de capacidad del vehículo cuando
/// tiene CEDIS, y contra toda la flota cuando no lo tiene. Sin CEDIS la
/// política de capacidad se omite.
pub fn schedule_next(
    vehicle: &VehicleInfo,
    history: &[HistoryEntry],
    tasks: &[TaskCategory],
    snapshot: &ScheduleSnapshot,
    config: &SchedulerConfig,
    today: NaiveDate,
) -> Result<NaiveDate, ScheduleError> {
    let interval = compute_base_interval(history, tasks, config)?;
    let reference = reference_date(history, today);

    let base = reference + Duration::days(interval as i64);
    let first_candidate = clamp_to_future(base, today);
    let pool = vehicle.cedis_id.map(|cedis_id| config.pool_for(cedis_id));

    let mut candidate = first_candidate;
    loop {
        if (candidate - first_candidate).num_days() > config.horizon_days {
            return Err(ScheduleError::Exhausted { horizon_days: config.horizon_days });
        }

        let calendar_ok = !is_disallowed_day(candidate, config.disallowed_weekday);
        let spacing_ok = match &pool {
            Some(pool) => !violates_spacing(
                candidate,
                snapshot.dates_in_pool(pool, config),
                config.min_separation_days,
            ),
            None => !violates_spacing(candidate, snapshot.all_dates(), config.min_separation_days),
        };
        let capacity_ok = match &pool {
            Some(pool) => has_capacity(snapshot, pool, candidate, config),
            None => true,
        };

        if calendar_ok && spacing_ok && capacity_ok {
            return Ok(candidate);
        }
        candidate += Duration::days(1);
    }
}
