use habit_tracker::{clock::Clock, load_data, router, AppState, Config};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let data = match load_data(&config.data_path).await {
        Ok(data) => data,
        Err(err) => {
            error!("refusing to start: {err}");
            return Err(err.into());
        }
    };
    info!(
        habits = data.habits.len(),
        logs = data.logs.len(),
        path = %config.data_path.display(),
        "store loaded"
    );
    if let Clock::Fixed(today) = config.clock {
        info!(%today, "clock pinned");
    }

    let state = AppState::new(
        config.data_path.clone(),
        data,
        config.clock,
        config.default_owner,
    );
    let app = router(state);

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
