//! myapp entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use myapp::api::{self, AppState};
use myapp::config::Config;
use myapp::metrics;
use myapp::probe::StartupClock;
use myapp::utils::shutdown_signal;
use myapp::ServiceError;

/// Probe and feature-flag demo service.
#[derive(Parser, Debug)]
#[command(name = "myapp")]
#[command(about = "Liveness, readiness, health and feature-flag endpoints for rollout exercises")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP endpoints (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load and print the effective configuration.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let clock = StartupClock::start();
    let args = Args::parse();

    // Configuration is needed before logging so RUST_LOG from .env applies.
    let config = Config::load().map_err(ServiceError::from);

    let filter = if args.verbose {
        EnvFilter::new("myapp=debug,tower_http=debug,info")
    } else {
        let level = config
            .as_ref()
            .map(|c| c.rust_log.clone())
            .unwrap_or_else(|_| "info".to_string());
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { port }) => cmd_serve(config, clock, port.or(args.port)).await,
        None => cmd_serve(config, clock, args.port).await,
    }
}

/// Print the effective configuration.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("MYAPP - CONFIGURATION CHECK");
    println!("======================================================================");
    println!("  Boot Delay:  {}s", config.boot_delay);
    println!("  DB DSN:      {}", config.redacted_dsn());
    println!("  Feature New: {}", if config.feature_new { "Enabled" } else { "Disabled" });
    println!("  Bind:        {}", config.bind_addr(None));
    println!("  Log Level:   {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP endpoints until shutdown.
async fn cmd_serve(config: Config, clock: StartupClock, port: Option<u16>) -> anyhow::Result<()> {
    metrics::init_metrics();

    info!(
        boot_delay_s = config.boot_delay,
        db_dsn = %config.redacted_dsn(),
        feature_new = config.feature_new,
        "Configuration loaded"
    );

    let addr = config.bind_addr(port);
    let state = AppState::new(config).with_clock(clock);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        ServiceError::from(e)
    })?;
    info!("HTTP server listening on {}", addr);

    api::serve(listener, state, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}
