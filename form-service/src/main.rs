use form_service::config::{FormConfig, SERVICE_NAME};
use form_service::services::init_metrics;
use form_service::Application;
use service_core::error::AppError;
use service_core::observability::{init_tracing, TelemetryConfig};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Logging first, so configuration failures are reported through it
    let telemetry = TelemetryConfig::from_env(SERVICE_NAME);
    init_tracing(&telemetry);

    init_metrics();

    let config = FormConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        e
    })?;

    tracing::info!(
        service = %telemetry.service_name,
        version = env!("CARGO_PKG_VERSION"),
        port = config.common.port,
        "Starting form service"
    );

    let application = Application::build(config).await?;
    application.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

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
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
