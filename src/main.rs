use backoffice::logging::init_tracing;
use backoffice::metrics::{init_metrics, metrics_app};
use backoffice::router::init_router;
use backoffice::state::init_app_state;
use backoffice_config::ServerConfig;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let config = ServerConfig::from_env();

    if let Some(handle) = init_metrics() {
        let metrics_port = config.metrics_port;
        tokio::spawn(async move {
            match TcpListener::bind(("0.0.0.0", metrics_port)).await {
                Ok(listener) => {
                    info!("Metrics available at http://localhost:{}/metrics", metrics_port);
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        error!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => error!(error = %e, port = metrics_port, "Failed to bind metrics port"),
            }
        });
    }

    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Server running on http://localhost:{}", config.port);
    info!("Scalar UI available at http://localhost:{}/scalar", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
