use anyhow::Context;
use dotenv::dotenv;
use todo_rest::{app_env, db, logging};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let env_loaded = dotenv().is_ok();

    let otel_exporters = logging::exporters_from_env()?;
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);
    if !env_loaded {
        info!("Running without .env file.");
    }

    let db_url = app_env::var_or(app_env::DB_URL, app_env::DEFAULT_DB_URL);
    let listen_addr = app_env::var_or(app_env::LISTEN_ADDR, app_env::DEFAULT_LISTEN_ADDR);

    let pool = db::connect_sqlx(&db_url).await?;
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding to {listen_addr}"))?;
    info!("Server is running on http://{}", listener.local_addr()?);

    todo_rest::serve(listener, pool, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, finishing in-flight requests.");
}
