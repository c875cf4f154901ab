//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::scheduler::SchedulerConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub scheduler_config: SchedulerConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, scheduler_config: SchedulerConfig) -> Self {
        Self { pool, config, scheduler_config }
    }
}
