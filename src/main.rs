use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use cake_store::{
    config::Config,
    constants::API_NAME,
    handlers, logging,
    repository::PgCakeRepository,
    service::CakeService,
};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Notify;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("{} Unable to listen for ctrl-c: {}", API_NAME, e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("{} Unable to listen for SIGTERM: {}", API_NAME, e);
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
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;

    let _log_guard = logging::init(&config).context("Failed to open log file")?;

    tracing::info!("{} Starting cake API on port {}", API_NAME, config.server_port);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("{} Connected to database", API_NAME);

    let service = CakeService::new(PgCakeRepository::new(pool.clone()));
    let app = handlers::app(service, config.request_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let stop = Arc::new(Notify::new());
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown({
                let stop = stop.clone();
                async move { stop.notified().await }
            })
            .into_future(),
    );

    tokio::select! {
        res = &mut server => {
            res.context("Server task panicked")?.context("Server error")?;
            pool.close().await;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("{} Server shutdown", API_NAME);
    stop.notify_one();

    match tokio::time::timeout(config.shutdown_timeout, &mut server).await {
        Ok(res) => {
            res.context("Server task panicked")?.context("Server error")?;
            tracing::info!("{} Server shutdown properly", API_NAME);
        }
        Err(_) => {
            tracing::warn!(
                "{} In-flight requests still running after {:?}, aborting",
                API_NAME,
                config.shutdown_timeout
            );
            server.abort();
        }
    }

    pool.close().await;
    Ok(())
}
