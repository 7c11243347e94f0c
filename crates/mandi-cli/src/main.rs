mod browse;
mod demo;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mandi")]
#[command(about = "Local vendor map, driven from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the mock vendor dataset and list the visible places
    Seed {
        /// Only show places in this category (e.g. vegetables)
        #[arg(long)]
        category: Option<String>,
        /// Print the places as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run one place search against the configured search service
    Search {
        /// Free-text query, at least three characters
        query: String,
    },
    /// Walk through a scripted vendor session and print the resulting outlet
    Demo,
    /// List the browsable categories
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = mandi_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Seed { category, json }) => {
            browse::run_seed(&config, category.as_deref(), json)?;
        }
        Some(Commands::Search { query }) => search::run_search(&config, &query).await?,
        Some(Commands::Demo) => demo::run_demo(&config).await?,
        Some(Commands::Categories) => browse::run_categories(&config)?,
        None => println!("mandi: try `mandi --help`"),
    }

    Ok(())
}
