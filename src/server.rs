//! Server initialization and startup logic for trafficstate.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trafficstate_api::{AppState, InterfaceConfig, InterfaceServer};
use trafficstate_config::Config;
use trafficstate_core::{Poller, RouteStateStore};
use trafficstate_routing_bing::BingRoutingClient;
use trafficstate_runloop::{JobScheduler, SchedulerPrerequisites};
use trafficstate_sink_openhab::OpenHabSink;

use crate::register::{link_builder, register_entities, register_jobs};

/// Get the trafficstate home directory (~/.trafficstate).
pub(crate) fn trafficstate_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trafficstate")
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.trafficstate/logs/ with daily rotation.
pub(crate) fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = trafficstate_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("trafficstate")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the process lifetime.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Wire the poller, scheduler and HTTP server and run until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting trafficstate v{}", env!("CARGO_PKG_VERSION"));

    let (waypoints, routes) = register_entities(&config)?;

    let routing = BingRoutingClient::new(Duration::from_secs(config.routing.timeout_seconds))?;
    let mut poller = Poller::new(
        waypoints,
        routes,
        Arc::new(RouteStateStore::new()),
        link_builder(&config),
        Arc::new(routing),
    );

    if config.sink.base_url.trim().is_empty() {
        warn!("No sink configured, states stay local");
    } else {
        let sink = OpenHabSink::new(
            &config.sink.base_url,
            Duration::from_secs(config.sink.timeout_seconds),
        )?;
        info!("Publishing states to {}", sink.base_url());
        poller = poller.with_sink(Arc::new(sink));
    }

    let scheduler = Arc::new(JobScheduler::new(
        Arc::new(poller),
        SchedulerPrerequisites::new(
            &config.routing.api_key,
            &config.sink.base_url,
            &config.scheduler.timezone,
        ),
    ));
    register_jobs(&scheduler, &config);

    let server = InterfaceServer::new(
        InterfaceConfig::new(&config.server.host, config.server.port),
        Arc::new(AppState::new(scheduler.clone())),
    );
    let served = server.run_until(shutdown_signal()).await;

    scheduler.shutdown().await;
    info!("trafficstate stopped");

    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
