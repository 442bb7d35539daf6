//! pdx-inventory command line entry point
//!
//! Without URL arguments the whole inventory is discovered through the feed;
//! with URLs only those detail pages are scraped.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use pdx_inventory_lib::application::{
    save_inventory_json, DetailCollector, InventoryPaginator, PaginatorConfig,
};
use pdx_inventory_lib::infrastructure::{
    init_logging_with_config, AppConfig, ConfigManager, DocumentFetcher, HttpClient,
    InventoryFeedParser, VehicleDetailParser,
};

#[derive(Parser)]
#[command(name = "pdx-inventory")]
#[command(about = "Scrape the PDX Motors inventory into JSON records")]
struct Cli {
    /// Detail page URLs to scrape; discover the whole inventory when omitted
    urls: Vec<String>,

    /// Output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Inventory listing page embedding the feed script
    #[arg(long)]
    base_url: Option<String>,

    /// Configuration file (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feed pages fetched concurrently after the first one
    #[arg(long)]
    page_concurrency: Option<usize>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Print each record to stdout after saving
    #[arg(long)]
    print: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.site.inventory_url = base_url.clone();
        }
        if let Some(concurrency) = self.page_concurrency {
            config.crawl.page_concurrency = concurrency;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut config = manager.load_config().await?;
    cli.apply_overrides(&mut config);

    init_logging_with_config(&config.logging).context("Failed to initialize logging")?;

    if let Err(e) = run(&cli, &config).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let fetcher: Arc<dyn DocumentFetcher> = Arc::new(
        HttpClient::from_http_config(&config.http).context("Failed to build HTTP client")?,
    );

    let urls = if cli.urls.is_empty() {
        let feed_parser = InventoryFeedParser::with_config(&config.parsing.feed)
            .context("Invalid feed locator configuration")?;
        let paginator = InventoryPaginator::new(
            Arc::clone(&fetcher),
            feed_parser,
            PaginatorConfig::from_app_config(config),
        );

        let base_url = &config.site.inventory_url;
        paginator.discover_links(base_url).await.map_err(|e| {
            let stage = e.stage();
            anyhow::Error::new(e)
                .context(format!("Inventory discovery failed at {stage} for {base_url}"))
        })?
    } else {
        cli.urls.clone()
    };
    info!("Scraping {} vehicle detail pages", urls.len());

    let parser = VehicleDetailParser::with_config(&config.parsing.detail_selectors)
        .context("Invalid detail selector configuration")?;
    let collector = DetailCollector::new(fetcher, parser);
    let records = collector.collect_all(&urls).await;

    save_inventory_json(&records, &config.output.path).await?;

    if cli.print {
        for (url, record) in urls.iter().zip(&records) {
            println!("{url}");
            for line in record.display_lines() {
                println!("  {line}");
            }
        }
    }

    Ok(())
}
