use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{MaintenanceKind, MaintenanceRecord};
use crate::scheduler::{OpenSlot, ScheduleSnapshot};
use crate::utils::errors::AppError;

/// Resultado del intento de reservar un slot en el calendario
pub enum ReserveOutcome {
    Reserved(MaintenanceRecord),
    /// Otro scheduling concurrente tomó el cupo entre la lectura del
    /// snapshot y el insert; el service reintenta con snapshot fresco
    Conflict,
}

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record =
            sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record)
    }

    /// Historial completo del vehículo, más reciente primero
    pub async fn history_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE vehicle_id = $1
            ORDER BY COALESCE(end_date, start_date) DESC, start_date DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Snapshot puntual de fechas de inicio de todos los registros abiertos.
    /// Se lee fresco antes de cada operación de scheduling.
    pub async fn open_snapshot(&self) -> Result<ScheduleSnapshot, AppError> {
        let rows: Vec<(Option<Uuid>, NaiveDate)> = sqlx::query_as(
            "SELECT cedis_id, start_date FROM maintenance_records WHERE end_date IS NULL",
        )
        .fetch_all(&self.pool)
        .await?;

        let slots = rows
            .into_iter()
            .map(|(cedis_id, date)| OpenSlot { cedis_id, date })
            .collect();

        Ok(ScheduleSnapshot::new(slots))
    }

    /// Abrir un ticket de mantenimiento (end_date en NULL)
    #[allow(clippy::too_many_arguments)]
    pub async fn open_ticket(
        &self,
        vehicle_id: Uuid,
        cedis_id: Option<Uuid>,
        kind: MaintenanceKind,
        start_date: NaiveDate,
        notes: Option<String>,
        odometer_at_intake: Option<Decimal>,
        created_by: Option<Uuid>,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records
                (id, vehicle_id, cedis_id, kind, notes, start_date, end_date,
                 odometer_at_intake, reserved, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NULL, $7, FALSE, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(cedis_id)
        .bind(kind)
        .bind(notes)
        .bind(start_date)
        .bind(odometer_at_intake)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Cerrar un ticket abierto fijando su fecha de fin
    pub async fn close(
        &self,
        id: Uuid,
        end_date: NaiveDate,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET end_date = $2
            WHERE id = $1 AND end_date IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(end_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::BadRequest("El registro no existe o ya está cerrado".to_string()))?;

        Ok(record)
    }

    /// Insertar la reservación preventiva re-validando capacidad y
    /// separación dentro de una transacción con advisory lock por pool.
    ///
    /// La llave del lock viene del pool de capacidad (`pool_label`), no del
    /// CEDIS individual: dos CEDIS del mismo grupo de taller serializan
    /// sobre la misma llave. La re-validación cubre la ventana entre la
    /// lectura del snapshot y este insert (check-then-act). Si el cupo ya
    /// no existe devuelve Conflict en lugar de insertar una fecha inválida.
    ///
    /// Orden fijo de locks: flota primero, pool después. Los inserts con
    /// CEDIS toman el lock de flota en modo compartido (no se bloquean
    /// entre pools distintos); un insert sin CEDIS re-valida separación
    /// contra toda la flota y toma el lock de flota exclusivo, quedando
    /// ordenado contra todos los inserts con CEDIS.
    #[allow(clippy::too_many_arguments)]
    pub async fn reserve_slot(
        &self,
        vehicle_id: Uuid,
        cedis_id: Option<Uuid>,
        date: NaiveDate,
        pool_members: &[Uuid],
        capacity: u32,
        min_separation_days: i64,
        pool_label: Option<&str>,
        created_by: Option<Uuid>,
    ) -> Result<ReserveOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        match pool_label {
            Some(label) => {
                sqlx::query(
                    "SELECT pg_advisory_xact_lock_shared(hashtext('maintenance-fleet')::bigint)",
                )
                .execute(&mut *tx)
                .await?;
                sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1)::bigint)")
                    .bind(format!("maintenance-pool:{}", label))
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query(
                    "SELECT pg_advisory_xact_lock(hashtext('maintenance-fleet')::bigint)",
                )
                .execute(&mut *tx)
                .await?;
            }
        }

        if cedis_id.is_some() {
            // re-chequeo de capacidad sobre la unión del pool
            let count: (i64,) = sqlx::query_as(
                r#"
                SELECT COUNT(*) FROM maintenance_records
                WHERE end_date IS NULL AND start_date = $1 AND cedis_id = ANY($2)
                "#,
            )
            .bind(date)
            .bind(pool_members)
            .fetch_one(&mut *tx)
            .await?;

            if count.0 >= capacity as i64 {
                tx.rollback().await?;
                return Ok(ReserveOutcome::Conflict);
            }
        }

        // re-chequeo de separación: dentro del pool si hay CEDIS,
        // contra toda la flota si no
        let spacing_conflicts: (i64,) = if cedis_id.is_some() {
            sqlx::query_as(
                r#"
                SELECT COUNT(*) FROM maintenance_records
                WHERE end_date IS NULL AND cedis_id = ANY($1)
                  AND ABS(start_date - $2) < $3
                "#,
            )
            .bind(pool_members)
            .bind(date)
            .bind(min_separation_days as i32)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query_as(
                r#"
                SELECT COUNT(*) FROM maintenance_records
                WHERE end_date IS NULL AND ABS(start_date - $1) < $2
                "#,
            )
            .bind(date)
            .bind(min_separation_days as i32)
            .fetch_one(&mut *tx)
            .await?
        };

        if spacing_conflicts.0 > 0 {
            tx.rollback().await?;
            return Ok(ReserveOutcome::Conflict);
        }

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records
                (id, vehicle_id, cedis_id, kind, notes, start_date, end_date,
                 odometer_at_intake, reserved, created_by, created_at)
            VALUES ($1, $2, $3, 'preventive', NULL, $4, NULL, NULL, TRUE, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(cedis_id)
        .bind(date)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ReserveOutcome::Reserved(record))
    }
}
