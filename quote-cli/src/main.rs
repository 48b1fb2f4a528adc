use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use quote_cli::app::{self, ScenarioArgs};
use quote_cli::logging::{self, LogOptions};
use quote_cli::csv_loader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Pricing estimator for MLM compensation-plan software.
///
/// Starts from the catalog's recommended preset, applies the requested
/// changes, and prints an itemised quote.
#[derive(Debug, Parser)]
#[command(name = "mlm-quote", version)]
struct Cli {
    /// Pricing catalog (TOML). Defaults to the built-in sample catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, e.g. `debug` or `quote_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Silence console logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every plan, tier and add-on with its cost.
    Catalog,

    /// Price one scenario.
    Quote(ScenarioArgs),

    /// Price every scenario in a CSV file.
    Batch {
        /// CSV file with one scenario per row.
        file: PathBuf,
    },

    /// Print a mailto link that shares the scenario summary.
    Share {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Recipient address.
        #[arg(long)]
        to: Option<String>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&LogOptions {
        filter: cli.log_level.clone(),
        quiet: cli.quiet,
        file: cli.log_file.clone(),
    })?;

    let catalog = app::load_catalog(cli.catalog.as_deref())?;
    debug!(command = ?cli.command, "running");

    let output = match &cli.command {
        Command::Catalog => app::render_catalog(&catalog, cli.json)?,
        Command::Quote(scenario) => {
            let session = app::build_session(&catalog, scenario)?;
            app::render_report(&app::report(&session)?, cli.json)?
        }
        Command::Batch { file } => {
            let selections = csv_loader::load_from_file(file)?;
            let reports = app::quote_batch(&catalog, selections)?;
            app::render_reports(&reports, cli.json)?
        }
        Command::Share { scenario, to } => {
            let session = app::build_session(&catalog, scenario)?;
            app::share_link(&session, to.as_deref())?
        }
    };

    println!("{output}");
    Ok(())
}
