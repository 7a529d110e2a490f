//! CLI entrypoint for niagate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use niagate_application::{RateLimiter, ToolExecutorPort, ToolProxy, ToolSchemaPort};
use niagate_domain::ToolCall;
use niagate_infrastructure::{ConfigLoader, FileConfig, JsonSchemaToolConverter, NiaClient, SystemClock};
use niagate_presentation::{AppState, Cli, Command, ConsoleFormatter, Maintenance};
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Config => {
            show_config(cli.config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        command => run(command, cli.verbose, cli.config.as_deref()).await,
    }
}

async fn run(command: Command, verbose: u8, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = ConfigLoader::load(config_path)?;
    let _log_guard = init_logging(verbose, config.logging.file.as_deref())?;

    info!("Starting niagate");

    // === Dependency Injection ===
    let api = Arc::new(NiaClient::new(
        &config.api.base_url,
        config.api.api_key.clone(),
        config.api.timeout(),
    )?);
    let proxy_config = config.to_proxy_config();
    let executor: Arc<dyn ToolExecutorPort> = Arc::new(ToolProxy::new(api, proxy_config.sources));
    let schema: Arc<dyn ToolSchemaPort> = Arc::new(JsonSchemaToolConverter);

    match command {
        Command::Serve { bind } => {
            let bind: SocketAddr = match bind {
                Some(addr) => addr,
                None => config
                    .server
                    .bind
                    .parse()
                    .with_context(|| format!("Invalid server.bind '{}'", config.server.bind))?,
            };
            let limiter = Arc::new(RateLimiter::new(
                proxy_config.rate_limit,
                Arc::new(SystemClock),
            ));
            let state = AppState::new(executor, schema, limiter).with_maintenance(Maintenance {
                enabled: config.server.maintenance,
                retry_after_secs: config.server.retry_after_seconds,
            });
            if config.server.maintenance {
                info!("Maintenance mode is on: /api requests will be rejected");
            }
            niagate_presentation::serve(state, bind).await?;
        }
        Command::Tools => {
            let tools = schema.all_tools_schema(executor.tool_spec());
            println!("{}", ConsoleFormatter::format_tools(&tools));
        }
        Command::Call { tool, args } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&args).context("--args must be valid JSON")?;
            let call = ToolCall::from_json(tool, arguments).map_err(anyhow::Error::msg)?;
            let result = executor.execute(&call).await;
            println!("{}", ConsoleFormatter::format_tool_result(&result));
            if !result.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Config => show_config(config_path)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Install the tracing subscriber: stderr always, plus a daily file when configured.
fn init_logging(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
            let Some(name) = path.file_name() else {
                bail!("logging.file must name a file: {}", path.display());
            };
            let appender =
                tracing_appender::rolling::daily(dir.unwrap_or_else(|| Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print where configuration comes from and the merged result, secrets masked.
fn show_config(config_path: Option<&Path>) -> Result<()> {
    let sources = ConfigLoader::sources(config_path);
    print!(
        "{}",
        ConsoleFormatter::format_sources(
            sources
                .iter()
                .map(|s| (s.label, s.path.as_path(), s.found))
        )
    );
    print!(
        "{}",
        ConsoleFormatter::format_env_overrides(&ConfigLoader::active_env_overrides())
    );

    let config: FileConfig = ConfigLoader::load(config_path)?;
    println!();
    println!("{}", toml::to_string_pretty(&config.redacted())?);
    Ok(())
}
