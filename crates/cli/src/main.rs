//! meteoflow — daily weather pipeline: fetch, transform, store, alert.

use std::process::ExitCode;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};

use meteoflow_alerts::default_registry;
use meteoflow_core::config::{load_dotenv, Settings};
use meteoflow_extract::{parse_forecast, OpenMeteoClient};
use meteoflow_notify::{build_channels, Dispatcher};
use meteoflow_storage::Storage;
use meteoflow_transform::{compute_daily_stats, transform, TransformConfig};

mod summary;

use summary::log_execution_summary;

/// Weather data pipeline: extract, transform, persist, and alert.
#[derive(Parser, Debug)]
#[command(name = "meteoflow", version, about)]
struct Cli {
    /// Run the transform and condition checks but skip storage writes
    /// and notification dispatch.
    #[arg(long)]
    dry_run: bool,

    /// Number of forecast days to request.
    #[arg(long, env = "FORECAST_DAYS", default_value_t = 7)]
    forecast_days: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load .env before clap so env-backed args see it.
    load_dotenv();
    let cli = Cli::parse();
    let settings = Settings::from_env();

    let start = Instant::now();
    match run_pipeline(&cli, &settings).await {
        Ok(report) => {
            let status = if report.alerts_triggered > 0 { "ALERTS" } else { "SUCCESS" };
            log_execution_summary(status, report.records_processed, report.alerts_triggered, start.elapsed());
            if report.alerts_triggered > 0 {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("pipeline failed: {e:#}");
            log_execution_summary("ERROR", 0, 0, start.elapsed());
            ExitCode::FAILURE
        }
    }
}

struct RunReport {
    records_processed: usize,
    alerts_triggered: usize,
}

async fn run_pipeline(cli: &Cli, settings: &Settings) -> anyhow::Result<RunReport> {
    let location = &settings.location;
    info!(
        location = %location.name,
        latitude = location.latitude,
        longitude = location.longitude,
        dry_run = cli.dry_run,
        "starting pipeline"
    );

    let client = OpenMeteoClient::new()?;
    let response = client
        .fetch_forecast(location.latitude, location.longitude, cli.forecast_days)
        .await?;
    let raw = parse_forecast(&response);
    info!(rows = raw.len(), "fetched forecast");

    // Transform failures abort here, before any persistence or alerting.
    let config = TransformConfig::from(settings);
    let (records, report) = transform(raw, &config)?;
    if report.dropped_total() > 0 {
        warn!(%report, "some rows were dropped during validation");
    }

    if let Some(stats) = compute_daily_stats(&records) {
        info!(
            temp_max = stats.temp_max_overall,
            temp_min = stats.temp_min_overall,
            precipitation_total = stats.precipitation_total,
            wind_max = stats.wind_speed_max,
            "daily stats"
        );
    }

    if cli.dry_run {
        info!("[dry run] skipping data save");
    } else {
        let storage = Storage::new(&settings.storage.data_dir)?;
        storage.save_raw(&records, "weather_forecast")?;
        storage.save_processed(&records, "weather_processed")?;

        let archived = storage.archive_old(settings.storage.archive_after_days)?;
        if archived > 0 {
            info!(archived, "archived old files");
        }
    }

    let registry = default_registry(settings, Utc::now().date_naive());
    let findings = registry.evaluate_all(&records);

    if !findings.is_empty() {
        warn!(count = findings.len(), "alerts triggered");
    }

    if findings.is_empty() || !settings.channels.alert_enabled {
        if !settings.channels.alert_enabled {
            info!("alerts disabled in configuration");
        }
    } else if cli.dry_run {
        info!("[dry run] skipping notification dispatch");
    } else {
        let dispatcher = Dispatcher::new(build_channels(settings));
        let outcomes = dispatcher.dispatch(&findings, &location.name).await;

        let failed = outcomes.iter().filter(|o| !o.success).count();
        if failed > 0 {
            warn!(
                failed,
                total = outcomes.len(),
                "some notification channels failed"
            );
        }
    }

    Ok(RunReport {
        records_processed: records.len(),
        alerts_triggered: findings.len(),
    })
}
