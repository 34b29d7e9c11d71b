use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use taskpad::{build_router, AppState, TaskService, TaskStore};

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let addr = env_or("TASKS_ADDR", "127.0.0.1:3000");
    let data_dir = PathBuf::from(env_or("TASKS_DATA_DIR", "data"));

    let store = TaskStore::new(&data_dir);
    info!(store = %store.path().display(), "using task store");

    let state = AppState {
        service: Arc::new(TaskService::new(store)),
    };

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "task service listening");

    axum::serve(listener, build_router(state))
        .await
        .context("server terminated")?;
    Ok(())
}
