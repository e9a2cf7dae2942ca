mod cli;
mod logging;

use std::process;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use dirpatch::config::{load_configuration, AppConfig};
use dirpatch::progress::CliReporter;
use dirpatch::report::RUN_STARTED_FORMAT;
use dirpatch::{RunEngine, RunOptions, RunSummary};
use dotenv::dotenv;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Cli::parse();

    let _guard = logging::init_logger();

    let mut config = match load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    if args.print_config {
        print!("{}", config.to_toml().context("serializing configuration")?);
        return Ok(());
    }

    if let Some(output) = &args.output {
        config.output_path = output.to_string_lossy().into_owned();
    }

    let (root_a, root_b) = args.roots().unwrap_or_else(|err| err.exit());
    let options = RunOptions {
        root_a,
        root_b,
        algorithm: args.checksum.algorithm,
        suppress_unchanged: args.ignore_unchanged,
    };

    if let Err(err) = run_reconcile(config, options) {
        error!("Error: {:#}", err);
        process::exit(1);
    }

    Ok(())
}

fn run_reconcile(config: AppConfig, options: RunOptions) -> anyhow::Result<()> {
    let engine = RunEngine::new(config, options);
    let reporter = CliReporter::new();

    let options = engine.options();
    info!("Started: {}", chrono::Local::now().format(RUN_STARTED_FORMAT));
    info!(
        "Reconciling {} and {} with {}",
        options.root_a.display().to_string().cyan(),
        options.root_b.display().to_string().cyan(),
        options.algorithm.to_string().yellow(),
    );

    let summary = engine.run(&reporter).context("reconciliation failed")?;
    print_summary(&summary);

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    info!(
        "Scan: {}, Reconcile: {}, Write: {}",
        format!("{:.2}s", summary.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.reconcile_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.write_duration.as_secs_f64()).green(),
    );
    for (label, files, counts) in [
        ("A", summary.files_a, summary.counts_a),
        ("B", summary.files_b, summary.counts_b),
    ] {
        info!(
            "{}: {} files, {} additions, {} unchanged, {} conflicts",
            label.bold(),
            files,
            format!("{}", counts.additions).green(),
            format!("{}", counts.unchanged).dimmed(),
            format!("{}", counts.conflicts).red(),
        );
    }
    info!(
        "Finished: {}, report at {}",
        summary.finished_at.format(RUN_STARTED_FORMAT),
        summary.output_path.display().to_string().cyan(),
    );
}
