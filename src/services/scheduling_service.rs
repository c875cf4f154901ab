//! Servicio de scheduling
//!
//! Implementa el contrato del caller alrededor del motor puro: cerrar el
//! ticket, leer historial y snapshot frescos, calcular la próxima fecha e
//! insertarla condicionalmente. Ante un conflicto concurrente detectado al
//! escribir, reintenta con snapshot fresco un número acotado de veces antes
//! de devolver el conflicto al caller.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{MaintenanceKind, MaintenanceRecord, Vehicle};
use crate::repositories::cedis_repository::CedisRepository;
use crate::repositories::maintenance_repository::{MaintenanceRepository, ReserveOutcome};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::scheduler::{schedule_next, ScheduleSnapshot, SchedulerConfig, TaskCategory};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date_order;

/// Intentos de reserva antes de rendirse ante conflictos concurrentes
const MAX_RESERVE_ATTEMPTS: u32 = 3;

/// Acceso a registros de mantenimiento que consume el servicio
#[allow(async_fn_in_trait)]
pub trait MaintenanceStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError>;
    async fn history_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceRecord>, AppError>;
    async fn open_snapshot(&self) -> Result<ScheduleSnapshot, AppError>;
    #[allow(clippy::too_many_arguments)]
    async fn open_ticket(
        &self,
        vehicle_id: Uuid,
        cedis_id: Option<Uuid>,
        kind: MaintenanceKind,
        start_date: NaiveDate,
        notes: Option<String>,
        odometer_at_intake: Option<Decimal>,
        created_by: Option<Uuid>,
    ) -> Result<MaintenanceRecord, AppError>;
    async fn close(&self, id: Uuid, end_date: NaiveDate) -> Result<MaintenanceRecord, AppError>;
    #[allow(clippy::too_many_arguments)]
    async fn reserve_slot(
        &self,
        vehicle_id: Uuid,
        cedis_id: Option<Uuid>,
        date: NaiveDate,
        pool_members: &[Uuid],
        capacity: u32,
        min_separation_days: i64,
        pool_label: Option<&str>,
        created_by: Option<Uuid>,
    ) -> Result<ReserveOutcome, AppError>;
}

/// Acceso a vehículos que consume el servicio
#[allow(async_fn_in_trait)]
pub trait VehicleStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError>;
    async fn refresh_status(&self, vehicle_id: Uuid) -> Result<(), AppError>;
}

/// Acceso a CEDIS que consume el servicio
#[allow(async_fn_in_trait)]
pub trait CedisStore {
    async fn apply_pools(&self, base: &SchedulerConfig) -> Result<SchedulerConfig, AppError>;
    async fn pool_members(&self, cedis_id: Uuid) -> Result<Vec<Uuid>, AppError>;
}

impl MaintenanceStore for MaintenanceRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        MaintenanceRepository::find_by_id(self, id).await
    }

    async fn history_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        MaintenanceRepository::history_for_vehicle(self, vehicle_id).await
    }

    async fn open_snapshot(&self) -> Result<ScheduleSnapshot, AppError> {
        MaintenanceRepository::open_snapshot(self).await
    }

    async fn open_ticket(
        &self,
        vehicle_id: Uuid,
        cedis_id: Option<Uuid>,
        kind: MaintenanceKind,
        start_date: NaiveDate,
        notes: Option<String>,
        odometer_at_intake: Option<Decimal>,
        created_by: Option<Uuid>,
    ) -> Result<MaintenanceRecord, AppError> {
        MaintenanceRepository::open_ticket(
            self,
            vehicle_id,
            cedis_id,
            kind,
            start_date,
            notes,
            odometer_at_intake,
            created_by,
        )
        .await
    }

    async fn close(&self, id: Uuid, end_date: NaiveDate) -> Result<MaintenanceRecord, AppError> {
        MaintenanceRepository::close(self, id, end_date).await
    }

    async fn reserve_slot(
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
        MaintenanceRepository::reserve_slot(
            self,
            vehicle_id,
            cedis_id,
            date,
            pool_members,
            capacity,
            min_separation_days,
            pool_label,
            created_by,
        )
        .await
    }
}

impl VehicleStore for VehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        VehicleRepository::find_by_id(self, id).await
    }

    async fn refresh_status(&self, vehicle_id: Uuid) -> Result<(), AppError> {
        VehicleRepository::refresh_status(self, vehicle_id).await?;
        Ok(())
    }
}

impl CedisStore for CedisRepository {
    async fn apply_pools(&self, base: &SchedulerConfig) -> Result<SchedulerConfig, AppError> {
        CedisRepository::apply_pools(self, base).await
    }

    async fn pool_members(&self, cedis_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        CedisRepository::pool_members(self, cedis_id).await
    }
}

/// Resultado de cerrar un ticket y reagendar
#[derive(Debug)]
pub struct RescheduleResult {
    pub closed: MaintenanceRecord,
    pub next: MaintenanceRecord,
}

pub struct SchedulingService<
    M = MaintenanceRepository,
    V = VehicleRepository,
    C = CedisRepository,
> {
    maintenance: M,
    vehicles: V,
    cedis: C,
    base_config: SchedulerConfig,
}

impl SchedulingService {
    pub fn new(pool: PgPool, base_config: SchedulerConfig) -> Self {
        Self {
            maintenance: MaintenanceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            cedis: CedisRepository::new(pool),
            base_config,
        }
    }
}

impl<M: MaintenanceStore, V: VehicleStore, C: CedisStore> SchedulingService<M, V, C> {
    #[cfg(test)]
    fn with_stores(maintenance: M, vehicles: V, cedis: C, base_config: SchedulerConfig) -> Self {
        Self { maintenance, vehicles, cedis, base_config }
    }

    /// Abrir un ticket de mantenimiento; el vehículo pasa a estar en taller
    pub async fn open_ticket(
        &self,
        vehicle_id: Uuid,
        kind: MaintenanceKind,
        start_date: NaiveDate,
        notes: Option<String>,
        odometer_at_intake: Option<Decimal>,
        created_by: Option<Uuid>,
    ) -> Result<MaintenanceRecord, AppError> {
        let vehicle = self.require_vehicle(vehicle_id).await?;

        let record = self
            .maintenance
            .open_ticket(
                vehicle.id,
                vehicle.cedis_id,
                kind,
                start_date,
                notes,
                odometer_at_intake,
                created_by,
            )
            .await?;

        self.vehicles.refresh_status(vehicle.id).await?;
        info!(vehicle = %vehicle.plate, record = %record.id, "Ticket de mantenimiento abierto");
        Ok(record)
    }

    /// Cerrar un ticket y programar la siguiente visita preventiva.
    ///
    /// El registro recién cerrado ya forma parte del historial cuando se
    /// calcula el intervalo; las etiquetas de tarea reportadas al cierre
    /// alimentan la tabla de intervalos por tarea.
    pub async fn close_and_reschedule(
        &self,
        record_id: Uuid,
        end_date: NaiveDate,
        tasks: &[TaskCategory],
        created_by: Option<Uuid>,
    ) -> Result<RescheduleResult, AppError> {
        let record = self
            .maintenance
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Registro {} no encontrado", record_id)))?;

        if !record.is_open() {
            return Err(AppError::BadRequest("El registro ya está cerrado".to_string()));
        }
        validate_date_order(record.start_date, end_date).map_err(|_| {
            AppError::BadRequest(format!(
                "Fecha de fin {} anterior a la fecha de inicio {}",
                end_date, record.start_date
            ))
        })?;

        let closed = self.maintenance.close(record.id, end_date).await?;
        let vehicle = self.require_vehicle(closed.vehicle_id).await?;

        // el cierre ya quedó persistido; el estado del vehículo se refresca
        // en ambos caminos, falle o no la reserva
        let reserved = self.schedule_and_reserve(&vehicle, tasks, created_by).await;
        self.vehicles.refresh_status(vehicle.id).await?;

        let next = match reserved {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    vehicle = %vehicle.plate,
                    closed = %closed.id,
                    "Cierre registrado pero la reserva falló: {}",
                    err
                );
                return Err(err);
            }
        };

        info!(
            vehicle = %vehicle.plate,
            closed = %closed.id,
            next_date = %next.start_date,
            "Ticket cerrado y próxima visita programada"
        );
        Ok(RescheduleResult { closed, next })
    }

    /// Calcular la próxima fecha sin escribir nada (dry run)
    pub async fn preview(
        &self,
        vehicle_id: Uuid,
        tasks: &[TaskCategory],
    ) -> Result<NaiveDate, AppError> {
        let vehicle = self.require_vehicle(vehicle_id).await?;
        let config = self.cedis.apply_pools(&self.base_config).await?;
        let history = self.load_history(vehicle.id).await?;
        let snapshot = self.maintenance.open_snapshot().await?;
        let today = Utc::now().date_naive();

        let date = schedule_next(
            &vehicle.scheduling_info(),
            &history,
            tasks,
            &snapshot,
            &config,
            today,
        )?;
        Ok(date)
    }

    /// Ciclo leer-calcular-reservar con reintentos acotados.
    ///
    /// Entre la lectura del snapshot y el insert otro scheduling puede tomar
    /// el cupo; el insert condicional lo detecta y aquí se recalcula con un
    /// snapshot actualizado.
    async fn schedule_and_reserve(
        &self,
        vehicle: &Vehicle,
        tasks: &[TaskCategory],
        created_by: Option<Uuid>,
    ) -> Result<MaintenanceRecord, AppError> {
        let config = self.cedis.apply_pools(&self.base_config).await?;
        let today = Utc::now().date_naive();

        let (pool_members, capacity, pool_label) = match vehicle.cedis_id {
            Some(cedis_id) => {
                let pool = config.pool_for(cedis_id);
                let members = self.cedis.pool_members(cedis_id).await?;
                let capacity = config.capacity_for(&pool);
                (members, capacity, Some(pool.lock_label()))
            }
            None => (Vec::new(), 0, None),
        };

        for attempt in 1..=MAX_RESERVE_ATTEMPTS {
            // snapshot fresco en cada intento
            let history = self.load_history(vehicle.id).await?;
            let snapshot = self.maintenance.open_snapshot().await?;

            let date = schedule_next(
                &vehicle.scheduling_info(),
                &history,
                tasks,
                &snapshot,
                &config,
                today,
            )?;

            let outcome = self
                .maintenance
                .reserve_slot(
                    vehicle.id,
                    vehicle.cedis_id,
                    date,
                    &pool_members,
                    capacity,
                    config.min_separation_days,
                    pool_label.as_deref(),
                    created_by,
                )
                .await?;

            match outcome {
                ReserveOutcome::Reserved(record) => return Ok(record),
                ReserveOutcome::Conflict => {
                    warn!(
                        vehicle = %vehicle.plate,
                        attempt,
                        date = %date,
                        "Conflicto concurrente al reservar; reintentando con snapshot fresco"
                    );
                }
            }
        }

        Err(AppError::SchedulingConflict(format!(
            "No se pudo reservar fecha para el vehículo {} tras {} intentos",
            vehicle.plate, MAX_RESERVE_ATTEMPTS
        )))
    }

    async fn require_vehicle(&self, vehicle_id: Uuid) -> Result<Vehicle, AppError> {
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehículo {} no encontrado", vehicle_id)))
    }

    async fn load_history(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<crate::scheduler::HistoryEntry>, AppError> {
        let records = self.maintenance.history_for_vehicle(vehicle_id).await?;
        Ok(records.iter().map(|r| r.history_entry()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleStatus;
    use std::sync::{Arc, Mutex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vehicle(cedis_id: Option<Uuid>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: "ABC-123".to_string(),
            cedis_id,
            odometer: Decimal::ZERO,
            status: VehicleStatus::InShop,
            created_at: Utc::now(),
        }
    }

    fn open_record(vehicle: &Vehicle, start: NaiveDate) -> MaintenanceRecord {
        MaintenanceRecord {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            cedis_id: vehicle.cedis_id,
            kind: MaintenanceKind::Preventive,
            notes: None,
            start_date: start,
            end_date: None,
            odometer_at_intake: None,
            reserved: false,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    /// Almacén en memoria con un solo registro; la reserva puede aceptar
    /// siempre o devolver Conflict siempre
    struct FakeMaintenance {
        record: Arc<Mutex<MaintenanceRecord>>,
        accept_reserve: bool,
    }

    impl MaintenanceStore for FakeMaintenance {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
            let record = self.record.lock().unwrap().clone();
            Ok(if record.id == id { Some(record) } else { None })
        }

        async fn history_for_vehicle(
            &self,
            _vehicle_id: Uuid,
        ) -> Result<Vec<MaintenanceRecord>, AppError> {
            Ok(vec![self.record.lock().unwrap().clone()])
        }

        async fn open_snapshot(&self) -> Result<ScheduleSnapshot, AppError> {
            Ok(ScheduleSnapshot::default())
        }

        async fn open_ticket(
            &self,
            _vehicle_id: Uuid,
            _cedis_id: Option<Uuid>,
            _kind: MaintenanceKind,
            _start_date: NaiveDate,
            _notes: Option<String>,
            _odometer_at_intake: Option<Decimal>,
            _created_by: Option<Uuid>,
        ) -> Result<MaintenanceRecord, AppError> {
            Ok(self.record.lock().unwrap().clone())
        }

        async fn close(
            &self,
            _id: Uuid,
            end_date: NaiveDate,
        ) -> Result<MaintenanceRecord, AppError> {
            let mut record = self.record.lock().unwrap();
            record.end_date = Some(end_date);
            Ok(record.clone())
        }

        async fn reserve_slot(
            &self,
            vehicle_id: Uuid,
            cedis_id: Option<Uuid>,
            date: NaiveDate,
            _pool_members: &[Uuid],
            _capacity: u32,
            _min_separation_days: i64,
            _pool_label: Option<&str>,
            created_by: Option<Uuid>,
        ) -> Result<ReserveOutcome, AppError> {
            if !self.accept_reserve {
                return Ok(ReserveOutcome::Conflict);
            }
            Ok(ReserveOutcome::Reserved(MaintenanceRecord {
                id: Uuid::new_v4(),
                vehicle_id,
                cedis_id,
                kind: MaintenanceKind::Preventive,
                notes: None,
                start_date: date,
                end_date: None,
                odometer_at_intake: None,
                reserved: true,
                created_by,
                created_at: Utc::now(),
            }))
        }
    }

    /// Registra cada llamada a refresh_status para verificar el contrato
    struct FakeVehicles {
        vehicle: Vehicle,
        refreshed: Arc<Mutex<Vec<Uuid>>>,
    }

    impl VehicleStore for FakeVehicles {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
            Ok(if self.vehicle.id == id { Some(self.vehicle.clone()) } else { None })
        }

        async fn refresh_status(&self, vehicle_id: Uuid) -> Result<(), AppError> {
            self.refreshed.lock().unwrap().push(vehicle_id);
            Ok(())
        }
    }

    struct FakeCedis;

    impl CedisStore for FakeCedis {
        async fn apply_pools(&self, base: &SchedulerConfig) -> Result<SchedulerConfig, AppError> {
            Ok(base.clone())
        }

        async fn pool_members(&self, cedis_id: Uuid) -> Result<Vec<Uuid>, AppError> {
            Ok(vec![cedis_id])
        }
    }

    fn service_with(
        accept_reserve: bool,
    ) -> (
        SchedulingService<FakeMaintenance, FakeVehicles, FakeCedis>,
        Vehicle,
        Arc<Mutex<MaintenanceRecord>>,
        Arc<Mutex<Vec<Uuid>>>,
    ) {
        let vehicle = vehicle(Some(Uuid::new_v4()));
        let record = Arc::new(Mutex::new(open_record(&vehicle, date(2024, 3, 1))));
        let refreshed = Arc::new(Mutex::new(Vec::new()));

        let service = SchedulingService::with_stores(
            FakeMaintenance { record: Arc::clone(&record), accept_reserve },
            FakeVehicles { vehicle: vehicle.clone(), refreshed: Arc::clone(&refreshed) },
            FakeCedis,
            SchedulerConfig::default(),
        );
        (service, vehicle, record, refreshed)
    }

    #[tokio::test]
    async fn test_close_and_reschedule_happy_path() {
        let (service, vehicle, record, refreshed) = service_with(true);
        let record_id = record.lock().unwrap().id;

        let result = service
            .close_and_reschedule(record_id, date(2024, 3, 4), &[], None)
            .await
            .unwrap();

        assert_eq!(result.closed.end_date, Some(date(2024, 3, 4)));
        assert!(result.next.reserved);
        assert!(result.next.start_date > date(2024, 3, 4));
        assert_eq!(refreshed.lock().unwrap().as_slice(), &[vehicle.id]);
    }

    #[tokio::test]
    async fn test_reserve_failure_still_refreshes_vehicle_status() {
        // el cierre persiste aunque la reserva agote sus reintentos; el
        // vehículo no debe quedar atorado como en taller
        let (service, vehicle, record, refreshed) = service_with(false);
        let record_id = record.lock().unwrap().id;

        let err = service
            .close_and_reschedule(record_id, date(2024, 3, 4), &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::SchedulingConflict(_)));
        // el cierre quedó registrado
        assert_eq!(record.lock().unwrap().end_date, Some(date(2024, 3, 4)));
        // y el estado se recalculó de todos modos
        assert_eq!(refreshed.lock().unwrap().as_slice(), &[vehicle.id]);
    }

    #[tokio::test]
    async fn test_close_with_end_before_start_is_rejected() {
        let (service, _vehicle, record, refreshed) = service_with(true);
        let record_id = record.lock().unwrap().id;

        let err = service
            .close_and_reschedule(record_id, date(2024, 2, 20), &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        // nada se escribió
        assert!(record.lock().unwrap().is_open());
        assert!(refreshed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closing_twice_is_rejected() {
        let (service, _vehicle, record, _refreshed) = service_with(true);
        let record_id = record.lock().unwrap().id;
        record.lock().unwrap().end_date = Some(date(2024, 3, 2));

        let err = service
            .close_and_reschedule(record_id, date(2024, 3, 4), &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
