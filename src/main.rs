//! Command-line interface for the release-cadence binary.
//!
//! Fetches the release history of the configured repositories and writes
//! `release_stats.csv` and `release-raw.csv` into the output directory.

use std::{
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use release_cadence::{CadenceConfig, Error, ReleaseClient, RepositoryEntry, load_config, run_pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for collecting release cadence statistics.
#[derive(Debug, Parser,)]
#[command(name = "release-cadence", version, about = "Export GitHub release cadence statistics as CSV")]
struct Cli
{
    /// Path to the YAML configuration file listing repositories.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf,>,

    /// Repository to analyse, replacing the configured list. Repeatable.
    #[arg(long = "repo", value_name = "OWNER/NAME")]
    repositories: Vec<RepositoryEntry,>,

    /// Directory that receives the CSV tables.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Fixed UTC offset defining local dates, e.g. `+09:00`.
    #[arg(long = "utc-offset", value_name = "OFFSET", allow_hyphen_values = true)]
    utc_offset: Option<String,>,

    /// GitHub API base URI override.
    #[arg(long = "api-base", value_name = "URL")]
    api_base: Option<String,>,

    /// GitHub token used as a bearer token.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main(flavor = "current_thread")]
async fn main()
{
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);

    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(std::io::stderr,).init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, fetch, timestamp and export errors.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let config = resolve_config(&cli,)?;
    let client = ReleaseClient::new(cli.token.as_deref(), config.api_base.as_deref(),)?;

    let paths = run_pipeline(&client, &config, &cli.output_dir,).await?;
    info!("CSV saved to {} and {}", paths.stats.display(), paths.raw.display());

    Ok((),)
}

/// Merges the configuration file (or the built-in default) with CLI
/// overrides and validates the result.
fn resolve_config(cli: &Cli,) -> Result<CadenceConfig, Error,>
{
    let mut config = match cli.config.as_deref() {
        Some(path,) => load_config(path,)?,
        None => CadenceConfig::default(),
    };

    apply_overrides(&mut config, cli,);
    config.validate()?;
    info!(
        "Using configuration from {} with {} repositories",
        config_path_display(cli.config.as_deref(),),
        config.repositories.len()
    );

    Ok(config,)
}

fn apply_overrides(config: &mut CadenceConfig, cli: &Cli,)
{
    if !cli.repositories.is_empty() {
        config.repositories = cli.repositories.clone();
    }
    if let Some(offset,) = cli.utc_offset.as_ref() {
        config.utc_offset = Some(offset.clone(),);
    }
    if let Some(base,) = cli.api_base.as_ref() {
        config.api_base = Some(base.clone(),);
    }
}

fn config_path_display(path: Option<&Path,>,) -> String
{
    path.map_or_else(|| "<built-in>".to_owned(), |value| value.display().to_string(),)
}
