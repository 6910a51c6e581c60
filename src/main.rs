//! VEN agent entry point — CLI wiring and config-driven agent construction.

use std::path::Path;
use std::process;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use ven_agent::agent::VenAgent;
use ven_agent::config::VenConfig;
use ven_agent::error::VenError;
use ven_agent::notify::Notifier;
use ven_agent::report::FixedMeter;
use ven_agent::transport::VtnTransport;
use ven_agent::ven::AlwaysOptIn;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
}

fn print_help() {
    eprintln!("ven-agent — OpenADR-style VEN demand-response agent");
    eprintln!();
    eprintln!("Usage: ven-agent [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>   Load agent configuration from TOML file");
    eprintln!("  --help            Show this help message");
    eprintln!();
    eprintln!("If no --config is given, the built-in defaults are used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs { config_path: None };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Stand-in transport that logs submitted reports. Replaced by the real
/// OpenADR transport library once the VTN connection is wired up.
struct LoggingVtn;

#[async_trait]
impl VtnTransport for LoggingVtn {
    async fn submit_report(
        &self,
        resource_id: &str,
        measurement: &str,
        value: f64,
        taken_at: DateTime<Utc>,
    ) -> Result<(), VenError> {
        info!(resource_id, measurement, value, %taken_at, "report");
        Ok(())
    }
}

/// Stand-in notifier that logs instead of calling Twilio/SendGrid.
struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_email(&self, subject: &str, body: &str) -> Result<(), VenError> {
        info!(subject, body, "email notification");
        Ok(())
    }

    async fn send_text(&self, body: &str) -> Result<(), VenError> {
        info!(body, "text notification");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = parse_args();

    let config = if let Some(ref path) = cli.config_path {
        match VenConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        VenConfig::default()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let agent = VenAgent::start(
        &config,
        Arc::new(LoggingVtn),
        Arc::new(LogNotifier),
        Box::new(AlwaysOptIn),
        // Production deployments read charger meter values here.
        Arc::new(FixedMeter(1.23)),
    );

    info!("press Ctrl+C to stop");
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("error: failed to listen for shutdown signal: {e}");
        process::exit(1);
    }

    agent.shutdown().await;
}
