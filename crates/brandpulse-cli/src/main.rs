mod brands;
mod dashboard;
mod scrape;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandpulse")]
#[command(about = "Brand mention tracking command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and enrich current mentions for one brand or the whole registry.
    Scrape {
        /// Brand key (lowercase name); every registry brand when omitted.
        #[arg(long)]
        brand: Option<String>,
        /// Print outbound events as JSON lines instead of the summary table.
        #[arg(long)]
        json: bool,
    },
    /// Fetch current mentions for one brand and print its dashboard.
    Dashboard {
        /// Brand key (lowercase name).
        #[arg(long)]
        brand: String,
        /// Print the full dashboard payload as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Brand registry helpers.
    Brands {
        #[command(subcommand)]
        command: BrandsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum BrandsCommands {
    /// List the registry entries.
    List,
    /// Check the registry for empty or duplicate brand keys.
    Validate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brandpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scrape { brand, json }) => {
            scrape::run_scrape(&config, brand.as_deref(), json).await
        }
        Some(Commands::Dashboard { brand, json }) => {
            dashboard::run_dashboard(&config, &brand, json).await
        }
        Some(Commands::Brands { command }) => match command {
            BrandsCommands::List => brands::run_list(&config),
            BrandsCommands::Validate => brands::run_validate(&config),
        },
        None => {
            println!("usage: brandpulse <scrape|dashboard|brands>, see --help");
            Ok(())
        }
    }
}
