//! `streambridge` - CLI for the crash-dump triage service
//!
//! Runs the HTTP service, analyzes single requests offline, and inspects
//! configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use streambridge::cli::{AnalyzeCommand, Cli, Command, ConfigCommand, ServeCommand};
use streambridge::{init_logging, processor, Config};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        Command::Serve(serve_cmd) => {
            let config = Config::load_from(cli.config.clone())?;
            handle_serve(config, serve_cmd).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze(analyze_cmd) => handle_analyze(&analyze_cmd),
        Command::Config(config_cmd) => {
            handle_config(cli.config.clone(), config_cmd)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn handle_serve(mut config: Config, cmd: ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate()?;

    streambridge::serve(&config).await?;
    Ok(())
}

fn handle_analyze(cmd: &AnalyzeCommand) -> anyhow::Result<ExitCode> {
    let body = match cmd.input_path() {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let (value, code) = match processor::process_crash_dump(&body) {
        Ok(json) => (serde_json::from_slice::<serde_json::Value>(&json)?, ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!(error = %err, "{}", err.kind_label());
            (serde_json::to_value(err.to_envelope())?, ExitCode::FAILURE)
        }
    };

    if cmd.pretty {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{value}");
    }
    Ok(code)
}

fn handle_config(
    config_path: Option<std::path::PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!(
                    "  Route prefix:       {}",
                    config.route_prefix().unwrap_or("(none)")
                );
                println!("  CORS enabled:       {}", config.server.cors_enabled);
                println!("  Max body bytes:     {}", config.server.max_body_bytes);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
