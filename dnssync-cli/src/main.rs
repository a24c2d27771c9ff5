//! `dnssync` entry point.
//!
//! Synchronizes DNS zones between two Designate-compatible clouds:
//!
//! ```bash
//! dnssync --from-cloud cloud1 --to-cloud cloud2 example.com example.org
//! dnssync -f cloud1 -t cloud2 --all --remove
//! ```
//!
//! Cloud credentials come from a `clouds.json` profile file (see
//! `dnssync_provider::config`). Exit status: 2 for configuration errors;
//! 1 for connection failures, when every requested zone failed, or (with
//! `--strict`) when any zone failed; 0 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dnssync_core::{DnsCloud, SyncOptions, SyncStats, ZoneReconciler, ZoneReport};
use dnssync_provider::{CloudProfiles, ConfigError, connect};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "dnssync",
    version,
    about = "Synchronize DNS zones from one cloud to another"
)]
struct Cli {
    /// Source cloud profile name
    #[arg(short = 'f', long = "from-cloud", value_name = "CLOUD")]
    from_cloud: String,

    /// Target cloud profile name
    #[arg(short = 't', long = "to-cloud", value_name = "CLOUD")]
    to_cloud: String,

    /// Delete target record sets that have no source counterpart
    #[arg(short = 'r', long)]
    remove: bool,

    /// Override the SOA responsible-party email
    #[arg(short = 'm', long, value_name = "MAIL")]
    mail: Option<String>,

    /// Suppress the summary output
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Increase verbosity (-v progress, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Exit nonzero when any zone fails
    #[arg(long)]
    strict: bool,

    /// Path to the clouds profile file
    #[arg(long, value_name = "PATH")]
    clouds_file: Option<PathBuf>,

    /// Synchronize every zone of the source cloud
    #[arg(short = 'a', long, conflicts_with = "zones")]
    all: bool,

    /// Zones to synchronize
    #[arg(value_name = "ZONE", required_unless_present = "all")]
    zones: Vec<String>,
}

fn init_logging(quiet: bool, verbose: u8) {
    // Progress lines (zone/record operations) log at info and show up
    // from -v; the end-of-run summary is printed separately unless -q.
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            if e.downcast_ref::<ConfigError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let path = CloudProfiles::locate(cli.clouds_file.as_deref())?;
    let profiles = CloudProfiles::load(&path)?;
    let source_profile = profiles.resolve(&cli.from_cloud)?.clone();
    let target_profile = profiles.resolve(&cli.to_cloud)?.clone();

    let source = connect(&cli.from_cloud, &source_profile)
        .await
        .with_context(|| format!("cannot connect to source cloud '{}'", cli.from_cloud))?;
    let target = connect(&cli.to_cloud, &target_profile)
        .await
        .with_context(|| format!("cannot connect to target cloud '{}'", cli.to_cloud))?;

    let zones = resolve_zones(&cli, &source).await?;
    if zones.is_empty() {
        tracing::warn!("No zones to synchronize");
        return Ok(ExitCode::SUCCESS);
    }

    let reconciler = ZoneReconciler::new(source, target, SyncOptions {
        remove: cli.remove,
        mail: cli.mail.clone(),
    });
    let reports = reconciler.sync_zones(&zones).await;

    if !cli.quiet {
        print_summary(&reports);
    }

    if run_failed(&reports, cli.strict) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Exit policy: a run where every requested zone failed outright (which
/// covers a single named zone that doesn't exist) is a failure. Partial
/// failures in a multi-zone run only fail the run with `--strict`.
fn run_failed(reports: &[ZoneReport], strict: bool) -> bool {
    let failed = reports.iter().filter(|r| r.is_failure()).count();
    if failed == 0 {
        return false;
    }
    strict || failed == reports.len()
}

/// Explicit zone arguments, or every zone of the source cloud with `--all`.
async fn resolve_zones(cli: &Cli, source: &Arc<dyn DnsCloud>) -> anyhow::Result<Vec<String>> {
    if !cli.all {
        return Ok(cli.zones.clone());
    }
    let zones = source
        .list_zones()
        .await
        .with_context(|| format!("cannot list zones of '{}'", cli.from_cloud))?;
    Ok(zones.into_iter().map(|z| z.name).collect())
}

fn print_summary(reports: &[ZoneReport]) {
    let mut total = SyncStats::default();
    let mut failed_zones = 0u32;

    println!();
    for report in reports {
        match &report.outcome {
            Ok(stats) => {
                total.merge(stats);
                println!("{:<40} {stats}", report.zone);
            }
            Err(e) => {
                failed_zones += 1;
                println!("{:<40} FAILED: {e}", report.zone);
            }
        }
    }
    if reports.len() > 1 {
        println!("{:<40} {total}", "total");
    }
    if failed_zones > 0 {
        println!("{failed_zones} zone(s) failed");
    }
}
