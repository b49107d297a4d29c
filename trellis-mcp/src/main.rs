//! trellis-mcp: HTTP tool endpoint for Jira, Confluence and Bitbucket.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use trellis_core::{ClientOptions, ConfigMap};
use trellis_mcp::{ServerContext, router};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
  Text,
  Json,
}

#[derive(Parser)]
#[command(version, about = "MCP tool endpoint for Jira, Confluence and Bitbucket")]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             (default): Show info level messages\n\
             -v: Show debug level messages\n\
             -vv: Show trace level messages"
  )]
  verbose: u8,

  /// Address to bind
  #[arg(long, env = "HOST", default_value = "0.0.0.0")]
  host: String,

  /// Port to listen on
  #[arg(long, env = "PORT", default_value_t = 8080)]
  port: u16,

  /// Log output format
  #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
  log_format: LogFormat,
}

fn init_tracing(verbose: u8, format: LogFormat) {
  let level = match verbose {
    0 => tracing::Level::INFO,
    1 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };
  let filter = EnvFilter::from_default_env().add_directive(level.into());

  match format {
    LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
    LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
  }
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut signal) => {
        signal.recv().await;
      }
      Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
  tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenvy::dotenv().ok();
  let cli = Cli::parse();
  init_tracing(cli.verbose, cli.log_format);

  let config = ConfigMap::from_env();
  let context = ServerContext::from_config(&config, ClientOptions::default()).context("Failed to initialise server")?;
  let app = router(Arc::new(context));

  let addr = format!("{}:{}", cli.host, cli.port);
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .with_context(|| format!("Failed to bind {addr}"))?;
  tracing::info!(addr = %addr, "Listening");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

  Ok(())
}
