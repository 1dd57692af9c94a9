//! Comment-Crawler main entry point
//!
//! This is the command-line interface for the Comment-Crawler comment harvester.

use anyhow::Context;
use clap::Parser;
use comment_crawler::api::{resolve_api_key, ApiClient, KEY_FILE};
use comment_crawler::config::{load_config_with_hash, validate, Config, OutputFormat};
use comment_crawler::crawler::crawl;
use comment_crawler::output::{
    generate_markdown_report, persist, print_statistics, FieldSet, ReportContext,
};
use comment_crawler::url::{parse_url_list, resolve_all, VideoRef};
use comment_crawler::{CommentOrder, CrawlerError};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Comment-Crawler: a paginated comment thread harvester
///
/// Comment-Crawler walks a list of videos, collects their comment threads
/// and replies under a per-video cap, and saves them as JSON, CSV or SQLite.
#[derive(Parser, Debug)]
#[command(name = "comment-crawler")]
#[command(version)]
#[command(about = "A paginated comment thread harvester", long_about = None)]
struct Cli {
    /// Video URLs or 11-character identifiers
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// File with one URL or identifier per line
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// API key (overrides the config file and api_key.txt)
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Check the API key with a test request and exit
    #[arg(long, conflicts_with = "dry_run")]
    check_key: bool,

    /// Maximum comments plus replies per video
    #[arg(short = 'm', long, value_name = "N")]
    max_comments: Option<usize>,

    /// Do not collect replies
    #[arg(long)]
    no_replies: bool,

    /// Comment ordering (relevance or time)
    #[arg(long, value_name = "ORDER")]
    order: Option<CommentOrder>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Directory for the output files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not compute sentiment scores
    #[arg(long)]
    no_sentiment: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_effective_config(&cli)?;

    let inputs = collect_inputs(&cli)?;
    let (videos, rejected) = resolve_all(&inputs);
    for raw in &rejected {
        tracing::warn!("Not a recognizable video URL or identifier: {}", raw);
    }

    if cli.dry_run {
        handle_dry_run(&config, config_hash.as_deref(), &videos, &rejected);
        return Ok(());
    }

    let api_key = resolve_api_key(
        cli.api_key.as_deref(),
        config.api.key.as_deref(),
        Path::new(KEY_FILE),
    )
    .ok_or(CrawlerError::MissingApiKey)?;
    let client =
        ApiClient::new(&config.api, &api_key).context("Failed to set up the API client")?;

    if cli.check_key {
        return handle_check_key(&client).await;
    }

    if videos.is_empty() {
        return Err(CrawlerError::NoVideos.into());
    }

    handle_crawl(&client, &config, config_hash.as_deref(), &videos).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("comment_crawler=info,warn"),
            1 => EnvFilter::new("comment_crawler=debug,info"),
            2 => EnvFilter::new("comment_crawler=trace,debug"),
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

/// Loads the config file (if any), applies command line overrides and validates the result
fn load_effective_config(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(max) = cli.max_comments {
        config.crawler.max_comments_per_video = max;
    }
    if cli.no_replies {
        config.crawler.include_replies = false;
    }
    if let Some(order) = cli.order {
        config.crawler.comment_order = order;
    }
    if cli.no_sentiment {
        config.crawler.sentiment = false;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok((config, hash))
}

/// Gathers positional URLs followed by the entries of `--input`
fn collect_inputs(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut inputs = cli.urls.clone();

    if let Some(path) = &cli.input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        let listed = parse_url_list(&content);
        tracing::info!("Read {} entries from {}", listed.len(), path.display());
        inputs.extend(listed);
    }

    Ok(inputs)
}

/// Handles the --dry-run mode: shows the effective configuration and resolved videos
fn handle_dry_run(
    config: &Config,
    config_hash: Option<&str>,
    videos: &[VideoRef],
    rejected: &[String],
) {
    println!("=== Comment-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max comments per video: {}",
        config.crawler.max_comments_per_video
    );
    println!("  Include replies: {}", config.crawler.include_replies);
    println!("  Comment order: {}", config.crawler.comment_order);
    println!("  Sentiment: {}", config.crawler.sentiment);
    println!(
        "  Delays: {}ms between videos, {}ms between requests",
        config.crawler.delay_between_videos_ms, config.crawler.delay_between_requests_ms
    );

    println!("\nAPI:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Timeout: {}s", config.api.timeout_secs);

    let fields = FieldSet::from_config(config);
    println!("\nOutput:");
    println!("  Format: {:?}", config.output.format);
    println!("  Directory: {}", config.output.directory.display());
    println!("  Prefix: {}", config.output.filename_prefix);
    println!("  Columns: {}", fields.len());
    if let Some(path) = &config.output.summary_path {
        println!("  Summary: {}", path.display());
    }
    if let Some(hash) = config_hash {
        println!("  Config hash: {}", hash);
    }

    println!("\nVideos ({}):", videos.len());
    for (i, video) in videos.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, video.id, video.raw);
    }

    if !rejected.is_empty() {
        println!("\nRejected inputs ({}):", rejected.len());
        for raw in rejected {
            println!("  - {}", raw);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} videos", videos.len());
}

/// Handles the --check-key mode: performs a test request with the key
async fn handle_check_key(client: &ApiClient) -> anyhow::Result<()> {
    println!("Validating API key...");

    match client.validate_key().await {
        Ok(()) => {
            println!("✓ API key is valid");
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", e);
            if let Some(hint) = e.diagnosis() {
                println!("  {}", hint);
            }
            Err(e).context("API key check failed")
        }
    }
}

/// Handles the main crawl operation
async fn handle_crawl(
    client: &ApiClient,
    config: &Config,
    config_hash: Option<&str>,
    videos: &[VideoRef],
) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // Setup Ctrl+C handler
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tracing::warn!("Received Ctrl+C, stopping after the current video (press again to quit)");
        ctrl_c_token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::error!("Received second Ctrl+C, exiting without saving");
            std::process::exit(130);
        }
    });

    let outcome = crawl(client, config, videos, cancel).await;

    println!();
    print_statistics(&outcome.stats);

    let persisted =
        persist(&outcome.records, config, config_hash).context("Failed to save records")?;
    match &persisted {
        Some(written) => {
            println!(
                "\nSaved {} records ({} columns) to {}",
                written.rows,
                written.columns,
                written.records_path.display()
            );
            if let Some(path) = &written.config_path {
                println!("Configuration saved to {}", path.display());
            }
        }
        None => println!("\nNo records to save"),
    }

    if let Some(summary_path) = &config.output.summary_path {
        let context = ReportContext {
            config_hash,
            records_path: persisted.as_ref().map(|w| w.records_path.as_path()),
        };
        generate_markdown_report(&outcome.stats, context, summary_path)
            .with_context(|| format!("Failed to write report to {}", summary_path.display()))?;
        println!("Report written to {}", summary_path.display());
    }

    Ok(())
}
