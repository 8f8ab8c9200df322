// Framework bootstrap for the arena server runtime.

use crate::domain::{GameTuning, World};
use crate::frameworks::config;
use crate::interface_adapters::net::{broadcast_task, ws_handler};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::IdSequence;
use crate::use_cases::simulation_task;

use axum::{Router, routing::get};
use std::{io::Result, sync::Arc};
use tokio::sync::RwLock;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state();

    // The world lives as long as the server; both loops run until the process exits.
    tokio::spawn(simulation_task(
        state.world.clone(),
        config::tick_interval(),
        state.tuning,
    ));
    tokio::spawn(broadcast_task(
        state.world.clone(),
        config::broadcast_interval(),
    ));

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = config::http_address();

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Arc<AppState> {
    let tuning = GameTuning::default();
    tracing::debug!(
        width = tuning.arena.width,
        height = tuning.arena.height,
        tick_interval_ms = config::tick_interval().as_millis(),
        broadcast_interval_ms = config::broadcast_interval().as_millis(),
        "arena configured"
    );

    Arc::new(AppState {
        world: Arc::new(RwLock::new(World::new(tuning.arena))),
        tuning,
        actor_ids: IdSequence::new(),
        outbound_capacity: config::OUTBOUND_QUEUE_CAPACITY,
    })
}
