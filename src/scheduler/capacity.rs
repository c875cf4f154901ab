//! Política de capacidad diaria por CEDIS
//!
//! Cada CEDIS tiene una capacidad de intake diaria (default 1). Los CEDIS
//! que comparten taller se evalúan como un pool combinado: la capacidad se
//! compara contra la unión de sus registros abiertos para el día, no por
//! CEDIS individual.

use chrono::NaiveDate;

use super::config::{PoolKey, SchedulerConfig};
use super::snapshot::ScheduleSnapshot;

/// Cantidad de registros abiertos del pool cuya fecha de inicio es `date`
pub fn daily_count(
    snapshot: &ScheduleSnapshot,
    pool: &PoolKey,
    date: NaiveDate,
    config: &SchedulerConfig,
) -> usize {
    snapshot
        .dates_in_pool(pool, config)
        .filter(|d| *d == date)
        .count()
}

/// true si el pool todavía puede recibir un vehículo más ese día
pub fn has_capacity(
    snapshot: &ScheduleSnapshot,
    pool: &PoolKey,
    date: NaiveDate,
    config: &SchedulerConfig,
) -> bool {
    daily_count(snapshot, pool, date, config) < config.capacity_for(pool) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::snapshot::OpenSlot;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_capacity_depot_fills_with_one() {
        let config = SchedulerConfig::default();
        let cedis = Uuid::new_v4();
        let pool = config.pool_for(cedis);
        let day = date(2024, 3, 11);

        let empty = ScheduleSnapshot::default();
        assert!(has_capacity(&empty, &pool, day, &config));

        let full = ScheduleSnapshot::new(vec![OpenSlot { cedis_id: Some(cedis), date: day }]);
        assert_eq!(daily_count(&full, &pool, day, &config), 1);
        assert!(!has_capacity(&full, &pool, day, &config));
    }

    #[test]
    fn test_shared_pool_counts_union_of_members() {
        let mut config = SchedulerConfig::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        config.pool_memberships.insert(a, "taller".to_string());
        config.pool_memberships.insert(b, "taller".to_string());
        config.pool_capacities.insert("taller".to_string(), 5);

        let day = date(2024, 3, 11);
        let slots: Vec<OpenSlot> = (0..5)
            .map(|i| OpenSlot {
                cedis_id: Some(if i % 2 == 0 { a } else { b }),
                date: day,
            })
            .collect();
        let snapshot = ScheduleSnapshot::new(slots);

        let pool = config.pool_for(a);
        assert_eq!(daily_count(&snapshot, &pool, day, &config), 5);
        assert!(!has_capacity(&snapshot, &pool, day, &config));
        assert!(has_capacity(&snapshot, &pool, date(2024, 3, 12), &config));
    }

    #[test]
    fn test_other_pool_does_not_consume_capacity() {
        let config = SchedulerConfig::default();
        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();
        let day = date(2024, 3, 11);

        let snapshot = ScheduleSnapshot::new(vec![OpenSlot { cedis_id: Some(other), date: day }]);
        let pool = config.pool_for(mine);
        assert!(has_capacity(&snapshot, &pool, day, &config));
    }
}
