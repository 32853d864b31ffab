mod duration;
mod render;

use clap::Parser;
use dc_core::{PostStorage, Result};
use dc_fetch::{handle_command, init_logging, ChronicleClient, FetchCommands, FetchConfig, PostActions, DEFAULT_BASE_URL};
use dc_storage::{MemoryStorage, StoreConfig};
use duration::HumanDuration;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read the Duke Chronicle from the terminal", long_about = None)]
pub struct Cli {
    /// Root of the listing API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long)]
    user_agent: Option<String>,
    /// Request timeout (e.g. 10s, 1m). No timeout when omitted.
    #[arg(long)]
    timeout: Option<HumanDuration>,
    /// Top-level sections, comma separated
    #[arg(long, value_delimiter = ',')]
    sections: Option<Vec<String>>,
    /// Posts shown per section
    #[arg(long, default_value_t = 20)]
    limit: usize,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Fetch(FetchCommands),
    /// Refetch a section periodically
    Watch {
        section: String,
        /// Time between fetches (e.g. 1h, 30m, 1h15m30s)
        #[arg(long, default_value = "30m")]
        interval: HumanDuration,
    },
}

fn fetch_config(cli: &Cli) -> Result<FetchConfig> {
    let mut config = FetchConfig::default().with_base_url(&cli.base_url)?;
    if let Some(user_agent) = &cli.user_agent {
        config = config.with_user_agent(user_agent.clone());
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout.0);
    }
    Ok(config)
}

fn store_config(cli: &Cli) -> StoreConfig {
    match &cli.sections {
        Some(sections) => StoreConfig::default().with_top_level_sections(
            sections
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        None => StoreConfig::default(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = fetch_config(&cli)?;
    info!("📡 Reading from {}", config.base_url);

    let storage: Arc<dyn PostStorage> = Arc::new(MemoryStorage::with_config(store_config(&cli)));
    let actions = PostActions::new(ChronicleClient::new(config)?, storage.clone());

    match cli.command {
        Commands::Fetch(command) => {
            let loaded = handle_command(command, &actions).await?;
            info!("📰 {} posts across {} sections", storage.post_count().await?, loaded.len());
            for section in loaded {
                storage.select_tab(&section).await?;
                render::print_current_tab(storage.as_ref(), cli.limit).await?;
            }
        }
        Commands::Watch { section, interval } => {
            info!("Refreshing {} every {}s", section, interval.0.as_secs());
            loop {
                if let Err(e) = actions.get_section(&section).await {
                    eprintln!("Error during fetch: {}", e);
                }
                storage.select_tab(&section).await?;
                render::print_current_tab(storage.as_ref(), cli.limit).await?;
                info!("Waiting {}s before next fetch", interval.0.as_secs());
                tokio::time::sleep(interval.0).await;
            }
        }
    }

    Ok(())
}
