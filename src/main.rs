use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_maintenance::config::environment::EnvironmentConfig;
use fleet_maintenance::config::scheduling::load_scheduler_config;
use fleet_maintenance::database::create_pool;
use fleet_maintenance::middleware::cors::cors_middleware;
use fleet_maintenance::routes;
use fleet_maintenance::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Mantenimiento Preventivo CEDIS - API");
    info!("=======================================");

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let env_config = EnvironmentConfig::default();
    let scheduler_config = load_scheduler_config();
    info!(
        "📋 Config de scheduling: separación mínima {} días, día inhábil {:?}, horizonte {} días",
        scheduler_config.min_separation_days,
        scheduler_config.disallowed_weekday,
        scheduler_config.horizon_days
    );

    let app_state = AppState::new(pool, env_config.clone(), scheduler_config);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/maintenance", routes::maintenance_routes::create_maintenance_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/cedis", routes::cedis_routes::create_cedis_router())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = env_config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔧 Endpoints - Maintenance:");
    info!("   POST /api/maintenance - Abrir ticket");
    info!("   POST /api/maintenance/:id/close - Cerrar ticket y reagendar");
    info!("   GET  /api/maintenance/vehicle/:vehicle_id - Historial del vehículo");
    info!("   POST /api/maintenance/preview - Previsualizar próxima fecha");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Registrar vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("🏭 Endpoints - CEDIS:");
    info!("   GET  /api/cedis - Listar CEDIS con capacidades");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-maintenance",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
