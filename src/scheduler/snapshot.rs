//! Snapshot del calendario de mantenimiento
//!
//! Un snapshot es una lectura puntual de las fechas de inicio de todos los
//! registros de mantenimiento abiertos. El motor lo recibe como valor
//! inmutable; el caller es responsable de leerlo fresco antes de cada
//! operación de scheduling (ver política de reintentos en el service).

use chrono::NaiveDate;
use uuid::Uuid;

use super::config::{PoolKey, SchedulerConfig};

/// Una fecha ocupada por un registro de mantenimiento abierto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSlot {
    pub cedis_id: Option<Uuid>,
    pub date: NaiveDate,
}

/// Conjunto de fechas actualmente reservadas en el calendario de la flota
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    slots: Vec<OpenSlot>,
}

impl ScheduleSnapshot {
    pub fn new(slots: Vec<OpenSlot>) -> Self {
        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Todas las fechas del snapshot, sin filtrar por pool
    pub fn all_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.iter().map(|s| s.date)
    }

    /// Fechas de los slots cuyo CEDIS cae en el pool indicado.
    /// Los slots sin CEDIS no pertenecen a ningún pool.
    pub fn dates_in_pool<'a>(
        &'a self,
        pool: &'a PoolKey,
        config: &'a SchedulerConfig,
    ) -> impl Iterator<Item = NaiveDate> + 'a {
        self.slots.iter().filter_map(move |s| {
            let cedis_id = s.cedis_id?;
            if &config.pool_for(cedis_id) == pool {
                Some(s.date)
            } else {
                None
            }
        })
    }
}
