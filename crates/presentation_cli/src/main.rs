//! WSWR weather station CLI
//!
//! Hosts one station entry: polls the endpoint, keeps the sensors up to date
//! and prints their states. Also offers one-shot fetch, key classification
//! and the options flow.

#![allow(clippy::print_stdout)]

mod registry;
mod render;
mod tasks;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{FlowResult, OptionsFlow, SettingsInput, StationDataPort, setup_entry};
use clap::{Parser, Subcommand};
use domain::{MeasurementKey, SensorDescription};
use infrastructure::{AppConfig, StationAdapter, TelemetryConfig, init_telemetry, write_options};
use tokio::signal;
use tracing::{error, info};

use crate::registry::ConsoleRegistry;
use crate::render::{SensorStateView, classification_line, sensor_line};
use crate::tasks::spawn_refresh_task;

/// WSWR weather station CLI
#[derive(Parser)]
#[command(name = "wswr-station")]
#[command(author, version, about = "WSWR weather station bridge", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Main configuration file
    #[arg(
        short,
        long,
        default_value_os_t = AppConfig::default_config_path(),
        env = "WSWR_CONFIG_FILE"
    )]
    config: PathBuf,

    /// Options file written by `configure`
    #[arg(
        long,
        default_value_os_t = AppConfig::default_options_path(),
        env = "WSWR_OPTIONS_FILE"
    )]
    options: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the station and print sensor states until Ctrl+C
    Run {
        /// Print states as JSON lines
        #[arg(long)]
        json: bool,

        /// Poll every N seconds instead of the configured interval
        #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
        poll_secs: Option<u64>,
    },

    /// Fetch the latest record once and print every key
    Fetch,

    /// Show how measurement keys are classified
    ///
    /// Example: wswr-station classify airtemp_01mnavg rainfal_01hracc
    Classify {
        /// Measurement keys
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Revise the endpoint URL or polling interval
    ///
    /// Writes the options file; values set there override the main config.
    Configure {
        /// New endpoint URL
        #[arg(long)]
        api_url: Option<String>,

        /// New polling interval in minutes
        #[arg(long)]
        interval: Option<u32>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Telemetry settings after applying `-v`
fn telemetry_config(configured: &TelemetryConfig, verbose: u8) -> TelemetryConfig {
    if verbose == 0 {
        configured.clone()
    } else {
        configured
            .clone()
            .with_log_filter(log_filter_from_verbosity(verbose))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config, &cli.options)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    init_telemetry(&telemetry_config(&config.telemetry, cli.verbose))?;

    match cli.command {
        Commands::Run { json, poll_secs } => {
            run(&config, json, poll_secs.map(Duration::from_secs)).await
        },
        Commands::Fetch => fetch(&config).await,
        Commands::Classify { keys } => {
            for key in keys {
                let description = SensorDescription::for_key("", &MeasurementKey::new(key));
                println!("{}", classification_line(&description));
            }
            Ok(())
        },
        Commands::Configure { api_url, interval } => {
            configure(&config, &cli.options, SettingsInput {
                api_url,
                interval_minutes: interval,
            })
        },
    }
}

async fn run(
    config: &AppConfig,
    json: bool,
    poll_interval: Option<Duration>,
) -> anyhow::Result<()> {
    let entry = config.to_config_entry()?;
    let adapter = StationAdapter::new(config.station_client_config(&entry))?;
    let registry = ConsoleRegistry::new();

    info!(api_url = %entry.effective_settings().api_url, "Setting up station entry");
    let setup = setup_entry(
        &entry,
        Arc::new(adapter),
        &registry,
        &config.station.excluded_keys,
    )
    .await
    .context("Station setup failed")?;

    let sensors = registry.sensors().await;
    print_states(&sensors, json)?;

    let mut updates = setup.coordinator.subscribe();
    let interval = poll_interval.unwrap_or_else(|| setup.coordinator.update_interval());
    let refresh_task = spawn_refresh_task(Arc::clone(&setup.coordinator), interval);

    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                if let Err(e) = result {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Received Ctrl+C, stopping");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                if !json {
                    if let Some(err) = setup.coordinator.state().last_error() {
                        println!("\nStation unavailable: {err}");
                    }
                }
                print_states(&sensors, json)?;
            }
        }
    }

    refresh_task.abort();
    Ok(())
}

fn print_states(sensors: &[Arc<application::StationSensor>], json: bool) -> anyhow::Result<()> {
    if json {
        for sensor in sensors {
            println!("{}", serde_json::to_string(&SensorStateView::of(sensor))?);
        }
    } else {
        println!();
        for sensor in sensors {
            println!("{}", sensor_line(sensor));
        }
    }
    Ok(())
}

async fn fetch(config: &AppConfig) -> anyhow::Result<()> {
    let entry = config.to_config_entry()?;
    let adapter = StationAdapter::new(config.station_client_config(&entry))?;

    let snapshot = adapter.fetch_snapshot().await?;
    println!("Fetched {} fields at {}", snapshot.len(), snapshot.fetched_at());
    for (key, value) in snapshot.iter() {
        let description = SensorDescription::for_key(&entry.entry_id, key);
        let unit = description.unit().map_or("", |u| u.symbol());
        println!("{} = {value} {unit}", description.name);
    }
    Ok(())
}

fn configure(
    config: &AppConfig,
    options_path: &std::path::Path,
    input: SettingsInput,
) -> anyhow::Result<()> {
    let entry = config.to_config_entry()?;
    let flow = OptionsFlow::new(&entry);

    match flow.submit(&input) {
        FlowResult::CreateEntry { data, .. } => {
            write_options(options_path, &data)?;
            println!(
                "Saved options: api_url={} interval={} min",
                data.api_url, data.interval_minutes
            );
            Ok(())
        },
        FlowResult::Form(form) => {
            for (field, code) in &form.errors {
                println!("{field}: {code}");
            }
            anyhow::bail!("Invalid options")
        },
    }
}
