//! auth0-import - Bulk import users into an Auth0 database connection
//!
//! Each file is uploaded as a users-import job and polled until it
//! finishes. Results are printed and optionally written to a JSON file.

use auth0_import::error::ImportResult;
use auth0_import::output::{print_info, print_warning, render_run, write_results};
use auth0_import::{logging, Config, ConfigOverrides, ImportOptions, Importer};
use clap::Parser;
use std::path::PathBuf;

/// Bulk import users into an Auth0 database connection
#[derive(Parser, Debug)]
#[command(name = "auth0-import")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// User files to import (glob patterns allowed)
    #[arg(required = true)]
    files: Vec<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tenant domain, e.g. example.eu.auth0.com
    #[arg(long)]
    domain: Option<String>,

    /// Client id of a machine-to-machine application
    #[arg(long)]
    client_id: Option<String>,

    /// Client secret (prefer the AUTH0_CLIENT_SECRET environment variable)
    #[arg(long)]
    client_secret: Option<String>,

    /// Name of the database connection to import into
    #[arg(long)]
    connection: Option<String>,

    /// Update users that already exist
    #[arg(long)]
    upsert: bool,

    /// Send a completion email when each job finishes
    #[arg(long)]
    email: bool,

    /// Write the run results as JSON to this file
    #[arg(short = 'o', long)]
    results_file: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            domain: self.domain.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            connection: self.connection.clone(),
            upsert: self.upsert,
            email: self.email,
            results_file: self.results_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> ImportResult<()> {
    let config = Config::load(cli.config.as_deref(), cli.overrides())?;
    let importer = Importer::from_config(&config)?;

    let stats = importer
        .run(&ImportOptions::from(&config), &cli.files)
        .await?;

    render_run(&stats);

    if let Some(path) = &config.results_file {
        write_results(path, &stats)?;
        print_info(&format!("Results written to {}", path.display()));
    }

    if stats.has_errors() {
        print_warning("Some records were not imported.");
    }

    Ok(())
}
