use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use vehicle_maintenance::config::environment::EnvironmentConfig;
use vehicle_maintenance::database::connection::{create_pool, run_migrations};
use vehicle_maintenance::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use vehicle_maintenance::routes::create_api_router;
use vehicle_maintenance::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenvy::dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 Service Vehicle Maintenance - API de taller");
    info!("==============================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // En producción el CORS se restringe a los orígenes configurados
    let cors = if config.is_production() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let state = AppState::new(pool, config);
    let app = create_api_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registro de cliente");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Perfil del token actual");
    info!("🚗 Vehicles:");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("📅 Bookings:");
    info!("   POST /api/bookings - Crear reserva");
    info!("   PUT  /api/bookings/:id/status - Cambiar estado (staff)");
    info!("🛠  Job cards:");
    info!("   POST /api/jobcards - Abrir orden de trabajo (staff)");
    info!("   PUT  /api/jobcards/:id/complete - Cerrar y facturar");
    info!("🧾 Invoices & payments:");
    info!("   PUT  /api/invoices/:id/payment - Actualizar estado de pago (staff)");
    info!("   POST /api/payments/process - Procesar pago simulado");
    info!("   POST /api/payments/refund/:paymentId - Refund (admin)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Error instalando handler de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("❌ Error instalando handler de SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("👋 Señal de apagado recibida, cerrando servidor");
}
