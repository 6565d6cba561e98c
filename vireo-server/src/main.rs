use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vireo_core::{
    UserLibraryService,
    domain::RefreshPolicyConfig,
    infra::{memory::MemoryLibrary, snapshot::LibrarySnapshot},
};
use vireo_model::{MediaNode, NodeKind};
use vireo_server::{
    AppState, create_app,
    infra::config::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, ConfigWarnings},
};

#[derive(Debug, Parser)]
#[command(
    name = "vireo-server",
    version,
    about = "Serve per-user media library lookups over HTTP"
)]
struct Cli {
    /// Path to vireo.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Alternate .env file
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Overrides server.port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loader = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config,
        env_file: cli.env_file,
    });
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    // After config so RUST_LOG from the .env file is honoured
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    log_warnings(&warnings);

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let library = match &config.library.snapshot {
        Some(path) => LibrarySnapshot::from_path(path)
            .and_then(LibrarySnapshot::into_library)
            .with_context(|| {
                format!("failed to load library snapshot {}", path.display())
            })?,
        None => MemoryLibrary::new(MediaNode::new("Root", NodeKind::RootFolder))
            .context("failed to create empty library")?,
    };

    let refresh =
        RefreshPolicyConfig::from_std(config.refresh.full_refresh_interval)
            .context("invalid refresh interval")?;
    let ports = library
        .unit_of_work()
        .context("failed to wire library ports")?;
    let service = UserLibraryService::new(ports, refresh);

    let bind = (config.server.host.clone(), config.server.port);
    let state = AppState::new(service, config);
    let router = create_app(state);

    let listener = TcpListener::bind((bind.0.as_str(), bind.1))
        .await
        .with_context(|| format!("failed to bind {}:{}", bind.0, bind.1))?;
    info!(
        address = %listener.local_addr().context("listener has no address")?,
        "vireo-server listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("vireo-server stopped");
    Ok(())
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
