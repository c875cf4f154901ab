//! Carga de la configuración de scheduling desde el entorno
//!
//! Los valores escalares del motor (separación mínima, día inhábil,
//! horizonte, intervalos) se pueden sobreescribir por variable de entorno;
//! los pools de capacidad no viven aquí sino en la tabla cedis y se mezclan
//! en el service antes de cada operación de scheduling.

use chrono::Weekday;
use std::env;

use crate::scheduler::SchedulerConfig;

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_i64(name: &str, default: i64) -> i64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_weekday(name: &str, default: Weekday) -> Weekday {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Construir la configuración del motor con defaults y overrides de entorno
pub fn load_scheduler_config() -> SchedulerConfig {
    let defaults = SchedulerConfig::default();
    tracing::debug!("Cargando configuración de scheduling desde el entorno");
    SchedulerConfig {
        disallowed_weekday: env_weekday("SCHED_DISALLOWED_WEEKDAY", defaults.disallowed_weekday),
        min_separation_days: env_i64("SCHED_MIN_SEPARATION_DAYS", defaults.min_separation_days),
        interval_low_history_days: env_u32(
            "SCHED_INTERVAL_LOW_HISTORY_DAYS",
            defaults.interval_low_history_days,
        ),
        interval_mid_history_days: env_u32(
            "SCHED_INTERVAL_MID_HISTORY_DAYS",
            defaults.interval_mid_history_days,
        ),
        interval_high_history_days: env_u32(
            "SCHED_INTERVAL_HIGH_HISTORY_DAYS",
            defaults.interval_high_history_days,
        ),
        corrective_cap_days: env_u32("SCHED_CORRECTIVE_CAP_DAYS", defaults.corrective_cap_days),
        horizon_days: env_i64("SCHED_HORIZON_DAYS", defaults.horizon_days),
        default_capacity: env_u32("SCHED_DEFAULT_CAPACITY", defaults.default_capacity),
        ..defaults
    }
}
