//! Topshelf main entry point

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use topshelf::config::{load_config, Config, SourceSettings};
use topshelf::crawler::{build_http_client, crawl_source, CancelToken, CrawlOptions, Pacing};
use topshelf::output::{print_summary, write_listings};
use topshelf::sources::{BookSource, MovieSource, SourceAdapter};
use tracing_subscriber::EnvFilter;

/// Topshelf: a chart-listing scraper
///
/// Crawls the bestseller book chart and the top-rated movie chart page by
/// page, with polite randomized pacing, and writes the normalized listings
/// as JSON.
#[derive(Parser, Debug)]
#[command(name = "topshelf")]
#[command(version = "1.0.0")]
#[command(about = "A chart-listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Which source(s) to crawl
    #[arg(short, long, value_enum, default_value_t = SourceChoice::All)]
    source: SourceChoice,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without any network
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceChoice {
    Books,
    Movies,
    All,
}

impl SourceChoice {
    fn includes_books(self) -> bool {
        matches!(self, Self::Books | Self::All)
    }

    fn includes_movies(self) -> bool {
        matches!(self, Self::Movies | Self::All)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            Config::builtin()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, cli.source);
        return Ok(());
    }

    handle_crawl(config, cli.source).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("topshelf=info,warn"),
            1 => EnvFilter::new("topshelf=debug,info"),
            2 => EnvFilter::new("topshelf=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows the effective configuration and exits
fn handle_dry_run(config: &Config, source: SourceChoice) {
    println!("=== Topshelf Dry Run ===\n");

    println!("HTTP:");
    println!("  Timeout: {}s", config.http.timeout_seconds);
    println!("  Connect timeout: {}s", config.http.connect_timeout_seconds);

    if source.includes_books() {
        print_source_settings("Books", &config.books);
    }
    if source.includes_movies() {
        print_source_settings("Movies", &config.movies);
    }

    println!("\n✓ Configuration is valid");
}

fn print_source_settings(name: &str, settings: &SourceSettings) {
    println!("\n{}:", name);
    println!("  Enabled: {}", settings.enabled);
    println!(
        "  Pages: {}..={}",
        settings.start_page, settings.end_page
    );
    println!(
        "  Pacing: {}ms - {}ms",
        settings.pacing_min_ms, settings.pacing_max_ms
    );
    println!("  Base URL: {}", settings.base_url);
    println!("  Output: {}", settings.output_path);
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    source: SourceChoice,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_http_client(&config.http)?;

    // Ctrl-C finishes the page in flight, then stops the crawl cleanly.
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received, stopping after the current page");
                cancel.cancel();
            }
        });
    }

    if source.includes_books() && config.books.enabled {
        let adapter = BookSource::new(&config.books.base_url)?;
        run_source(&client, &adapter, &config.books, &cancel).await?;
    }

    if source.includes_movies() && config.movies.enabled {
        let adapter = MovieSource::new(
            &config.movies.base_url,
            config.movies.user_agent_or_default(),
        )?;
        run_source(&client, &adapter, &config.movies, &cancel).await?;
    }

    Ok(())
}

/// Crawls one source and persists its listings
async fn run_source<A: SourceAdapter>(
    client: &reqwest::Client,
    adapter: &A,
    settings: &SourceSettings,
    cancel: &CancelToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = CrawlOptions {
        first_page: settings.start_page,
        last_page: settings.end_page,
        pacing: Pacing::from_millis(settings.pacing_min_ms, settings.pacing_max_ms),
    };

    let result = crawl_source(client, adapter, &options, cancel).await;

    write_listings(Path::new(&settings.output_path), &result.listings)?;
    tracing::info!(
        "Wrote {} '{}' listings to {}",
        result.listings.len(),
        adapter.name(),
        settings.output_path
    );

    print_summary(adapter.name(), &result, options.pages_attempted());
    Ok(())
}
