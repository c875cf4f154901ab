use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Cedis;
use crate::scheduler::SchedulerConfig;
use crate::utils::errors::AppError;

pub struct CedisRepository {
    pool: PgPool,
}

impl CedisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Cedis>, AppError> {
        let cedis = sqlx::query_as::<_, Cedis>("SELECT * FROM cedis WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cedis)
    }

    pub async fn find_all(&self) -> Result<Vec<Cedis>, AppError> {
        let cedis = sqlx::query_as::<_, Cedis>("SELECT * FROM cedis ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(cedis)
    }

    /// Mezclar los pools de capacidad de la tabla cedis en la configuración
    /// del motor. La membresía a grupo de taller y las capacidades son datos
    /// operativos, no constantes del código.
    pub async fn apply_pools(&self, base: &SchedulerConfig) -> Result<SchedulerConfig, AppError> {
        let all = self.find_all().await?;
        let mut config = base.clone();

        for cedis in all {
            if let Some(capacity) = cedis.daily_capacity {
                config.cedis_capacities.insert(cedis.id, capacity.max(0) as u32);
            }
            if let Some(group) = cedis.workshop_group {
                config.pool_memberships.insert(cedis.id, group.clone());
                // capacidad del pool: la mayor declarada entre sus miembros
                if let Some(capacity) = cedis.daily_capacity {
                    let entry = config.pool_capacities.entry(group).or_insert(0);
                    *entry = (*entry).max(capacity.max(0) as u32);
                }
            }
        }

        // un grupo sin capacidad declarada usa el default
        for group in config.pool_memberships.values() {
            config
                .pool_capacities
                .entry(group.clone())
                .or_insert(config.default_capacity);
        }

        Ok(config)
    }

    /// IDs de los CEDIS que comparten pool con el CEDIS dado (incluido él)
    pub async fn pool_members(&self, cedis_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT c.id FROM cedis c
            WHERE c.id = $1
               OR (c.workshop_group IS NOT NULL AND c.workshop_group = (
                    SELECT workshop_group FROM cedis WHERE id = $1
               ))
            "#,
        )
        .bind(cedis_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
