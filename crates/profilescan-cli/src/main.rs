mod input;
mod report;

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use profilescan_scraper::{ProfileAnalyzer, MAX_HANDLES_PER_BATCH};
use tracing_subscriber::EnvFilter;

use crate::report::{SortDirection, SortKey};

#[derive(Debug, Parser)]
#[command(name = "profilescan")]
#[command(about = "Approximate public profile metrics from page metadata")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch public profile pages and report follower counts
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Handles to analyze; each argument may hold several separated by commas or whitespace
    handles: Vec<String>,

    /// Read additional handles from a file
    #[arg(long)]
    file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[arg(long, value_enum, default_value_t = SortKey::Followers)]
    sort_by: SortKey,

    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = profilescan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(&config, args).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

async fn run_analyze(
    config: &profilescan_core::AppConfig,
    args: AnalyzeArgs,
) -> anyhow::Result<()> {
    let raw = input::collect_handles(&args.handles, args.file.as_deref())?;
    if raw.is_empty() {
        anyhow::bail!("no handles given; pass them as arguments or with --file");
    }

    let analyzer = ProfileAnalyzer::from_config(config)?;
    let mut accounts = analyzer.analyze(&raw).await;
    if accounts.len() == MAX_HANDLES_PER_BATCH {
        tracing::info!(
            max = MAX_HANDLES_PER_BATCH,
            "batch limit reached; any further handles were skipped"
        );
    }

    let direction = if args.asc {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };
    report::sort_accounts(&mut accounts, args.sort_by, direction);

    let rendered = match args.format {
        OutputFormat::Table => report::render_table(&accounts),
        OutputFormat::Csv => report::to_csv(&accounts)?,
        OutputFormat::Json => report::to_json(&accounts)?,
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            tracing::info!(path = %path.display(), rows = accounts.len(), "report written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
