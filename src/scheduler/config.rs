//! Configuración de reglas de scheduling
//!
//! Este módulo define la configuración del motor: ventana de separación,
//! día inhábil semanal, intervalos base, tabla de intervalos por tarea y
//! capacidades por CEDIS/grupo de taller. Los valores de producción son un
//! asunto de configuración, no del motor; aquí solo viven los defaults
//! representativos.

use chrono::Weekday;
use std::collections::HashMap;
use uuid::Uuid;

/// Categorías de tarea realizadas durante una visita de mantenimiento.
/// Cada categoría implica un intervalo nominal de re-servicio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskCategory {
    OilAndFilter,
    Brakes,
    Tires,
    Belts,
}

impl TaskCategory {
    /// Parsear una etiqueta de tarea recibida por la API
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "oil" | "oil_and_filter" | "aceite" | "aceite_y_filtro" => Some(Self::OilAndFilter),
            "brakes" | "frenos" => Some(Self::Brakes),
            "tires" | "llantas" => Some(Self::Tires),
            "belts" | "bandas" => Some(Self::Belts),
            _ => None,
        }
    }
}

/// Tabla de intervalos nominales (en días) por categoría de tarea
#[derive(Debug, Clone)]
pub struct TaskIntervalTable {
    entries: HashMap<TaskCategory, u32>,
}

impl TaskIntervalTable {
    pub fn new(entries: HashMap<TaskCategory, u32>) -> Self {
        Self { entries }
    }

    pub fn interval_for(&self, task: TaskCategory) -> Option<u32> {
        self.entries.get(&task).copied()
    }

    /// El componente de vida más corta gobierna la próxima visita
    pub fn min_interval(&self, tasks: &[TaskCategory]) -> Option<u32> {
        tasks
            .iter()
            .filter_map(|t| self.interval_for(*t))
            .min()
    }
}

impl Default for TaskIntervalTable {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(TaskCategory::OilAndFilter, 40);
        entries.insert(TaskCategory::Brakes, 35);
        entries.insert(TaskCategory::Tires, 30);
        entries.insert(TaskCategory::Belts, 60);
        Self { entries }
    }
}

/// Identificador del pool de capacidad al que pertenece un candidato.
///
/// Los CEDIS que comparten taller forman un pool combinado; el resto de los
/// CEDIS son su propio pool con capacidad individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoolKey {
    /// Grupo de taller compartido, identificado por nombre de grupo
    Group(String),
    /// CEDIS individual sin grupo
    Single(Uuid),
}

impl PoolKey {
    /// Etiqueta estable del pool. Dos CEDIS del mismo grupo de taller
    /// producen la misma etiqueta; las escrituras que serializan por pool
    /// (advisory lock) derivan su llave de aquí.
    pub fn lock_label(&self) -> String {
        match self {
            PoolKey::Group(group) => format!("grupo:{}", group),
            PoolKey::Single(cedis_id) => format!("cedis:{}", cedis_id),
        }
    }
}

/// Configuración completa del motor de scheduling
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Día de la semana en que la flota no opera (observado: domingo)
    pub disallowed_weekday: Weekday,
    /// Separación mínima en días entre visitas programadas del mismo pool
    pub min_separation_days: i64,
    /// Intervalo base con menos de 3 visitas previas
    pub interval_low_history_days: u32,
    /// Intervalo base con 3 o 4 visitas previas
    pub interval_mid_history_days: u32,
    /// Intervalo base con 5 o más visitas previas
    pub interval_high_history_days: u32,
    /// Techo del intervalo cuando la última visita fue correctiva
    pub corrective_cap_days: u32,
    /// Tabla de intervalos nominales por tarea
    pub task_intervals: TaskIntervalTable,
    /// Horizonte máximo de búsqueda antes de declarar agotamiento
    pub horizon_days: i64,
    /// Capacidad diaria por defecto de un CEDIS sin configuración propia
    pub default_capacity: u32,
    /// CEDIS -> nombre de grupo de taller compartido
    pub pool_memberships: HashMap<Uuid, String>,
    /// Capacidad diaria combinada por grupo de taller
    pub pool_capacities: HashMap<String, u32>,
    /// Capacidad diaria individual por CEDIS (cuando difiere del default)
    pub cedis_capacities: HashMap<Uuid, u32>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            disallowed_weekday: Weekday::Sun,
            min_separation_days: 7,
            interval_low_history_days: 45,
            interval_mid_history_days: 40,
            interval_high_history_days: 35,
            corrective_cap_days: 30,
            task_intervals: TaskIntervalTable::default(),
            horizon_days: 365,
            default_capacity: 1,
            pool_memberships: HashMap::new(),
            pool_capacities: HashMap::new(),
            cedis_capacities: HashMap::new(),
        }
    }
}

impl SchedulerConfig {
    /// Resolver el pool de capacidad de un CEDIS
    pub fn pool_for(&self, cedis_id: Uuid) -> PoolKey {
        match self.pool_memberships.get(&cedis_id) {
            Some(group) => PoolKey::Group(group.clone()),
            None => PoolKey::Single(cedis_id),
        }
    }

    /// Capacidad diaria de intake del pool
    pub fn capacity_for(&self, pool: &PoolKey) -> u32 {
        match pool {
            PoolKey::Group(group) => self
                .pool_capacities
                .get(group)
                .copied()
                .unwrap_or(self.default_capacity),
            PoolKey::Single(cedis_id) => self
                .cedis_capacities
                .get(cedis_id)
                .copied()
                .unwrap_or(self.default_capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_labels() {
        assert_eq!(TaskCategory::parse("aceite"), Some(TaskCategory::OilAndFilter));
        assert_eq!(TaskCategory::parse("FRENOS"), Some(TaskCategory::Brakes));
        assert_eq!(TaskCategory::parse("tires"), Some(TaskCategory::Tires));
        assert_eq!(TaskCategory::parse("bandas"), Some(TaskCategory::Belts));
        assert_eq!(TaskCategory::parse("pintura"), None);
    }

    #[test]
    fn test_min_interval_takes_shortest_task() {
        let table = TaskIntervalTable::default();
        let tasks = vec![TaskCategory::OilAndFilter, TaskCategory::Tires];
        assert_eq!(table.min_interval(&tasks), Some(30));
    }

    #[test]
    fn test_min_interval_empty_tasks() {
        let table = TaskIntervalTable::default();
        assert_eq!(table.min_interval(&[]), None);
    }

    #[test]
    fn test_shared_group_members_share_lock_label() {
        // dos CEDIS del mismo grupo deben serializar sobre la misma llave
        let mut config = SchedulerConfig::default();
        let norte = Uuid::new_v4();
        let sur = Uuid::new_v4();
        let solo = Uuid::new_v4();
        config.pool_memberships.insert(norte, "taller-centro".to_string());
        config.pool_memberships.insert(sur, "taller-centro".to_string());

        let label_norte = config.pool_for(norte).lock_label();
        let label_sur = config.pool_for(sur).lock_label();
        let label_solo = config.pool_for(solo).lock_label();

        assert_eq!(label_norte, label_sur);
        assert_ne!(label_norte, label_solo);
        assert_eq!(label_solo, format!("cedis:{}", solo));
    }

    #[test]
    fn test_pool_resolution() {
        let mut config = SchedulerConfig::default();
        let shared = Uuid::new_v4();
        let solo = Uuid::new_v4();
        config.pool_memberships.insert(shared, "taller-norte".to_string());
        config.pool_capacities.insert("taller-norte".to_string(), 5);

        assert_eq!(config.pool_for(shared), PoolKey::Group("taller-norte".to_string()));
        assert_eq!(config.pool_for(solo), PoolKey::Single(solo));
        assert_eq!(config.capacity_for(&config.pool_for(shared)), 5);
        assert_eq!(config.capacity_for(&config.pool_for(solo)), 1);
    }
}
