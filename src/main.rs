//! Ripple-Crawl main entry point
//!
//! This is the command-line interface for the ripple crawler.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use futures::StreamExt;
use ripple_crawl::config::{load_config, CrawlOptions, EngineKind, FetchOptions};
use ripple_crawl::output::{
    format_page, print_statistics, CrawlSummary, JsonLinesOutput, MarkdownDirectory, OutputHandler,
    OutputResult,
};
use ripple_crawl::PageResult;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple: a polite, bounded single-site crawler
///
/// Ripple walks a site outward from a seed URL, respecting robots.txt and the
/// configured scope, and turns each page into clean markdown.
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(version)]
#[command(about = "A polite, bounded single-site crawler", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site starting from a seed URL
    Crawl(CrawlArgs),

    /// Scrape a single page
    Scrape(ScrapeArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Seed URL
    url: String,

    /// Path to TOML configuration file (flags override its values)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to yield
    #[arg(long)]
    max_pages: Option<usize>,

    /// Maximum depth below the seed path
    #[arg(long)]
    max_depth: Option<usize>,

    /// Only crawl URLs matching this regex (repeatable)
    #[arg(long = "include", value_name = "REGEX")]
    include: Vec<String>,

    /// Skip URLs matching this regex (repeatable)
    #[arg(long = "exclude", value_name = "REGEX")]
    exclude: Vec<String>,

    /// Allow leaving the seed's path prefix
    #[arg(long)]
    allow_backwards: bool,

    /// Number of pages fetched concurrently
    #[arg(long)]
    concurrency: Option<usize>,

    /// Validate options and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    fetch: FetchArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// URL to scrape
    url: String,

    /// Path to TOML configuration file (only its `fetch` table is used)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    fetch: FetchArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Render pages in headless Chromium
    #[arg(long)]
    browser: bool,

    /// Capture a screenshot (browser engine only)
    #[arg(long, requires = "browser")]
    screenshot: bool,

    /// Keep page chrome (navigation, headers, footers) in the markdown
    #[arg(long)]
    full_page: bool,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Extra wait after page load in milliseconds (browser engine only)
    #[arg(long, value_name = "MS")]
    wait_for: Option<u64>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write pages as markdown files into this directory
    #[arg(short, long, value_name = "DIR", conflicts_with = "json")]
    output: Option<PathBuf>,

    /// Print pages as JSON lines
    #[arg(long)]
    json: bool,

    /// Include raw HTML in JSON output
    #[arg(long, requires = "json")]
    include_html: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl(args) => handle_crawl(args, cli.quiet).await,
        Command::Scrape(args) => handle_scrape(args).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawl=info,warn"),
            1 => EnvFilter::new("ripple_crawl=debug,info"),
            2 => EnvFilter::new("ripple_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load_options(config: Option<&PathBuf>) -> anyhow::Result<CrawlOptions> {
    match config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(CrawlOptions::default()),
    }
}

fn apply_fetch_args(fetch: &mut FetchOptions, args: &FetchArgs) {
    if args.browser {
        fetch.engine = EngineKind::Browser;
    }
    if args.screenshot {
        fetch.screenshot = true;
    }
    if args.full_page {
        fetch.only_main_content = false;
    }
    if let Some(timeout) = args.timeout {
        fetch.timeout_ms = timeout;
    }
    if let Some(wait_for) = args.wait_for {
        fetch.wait_for_ms = Some(wait_for);
    }
}

fn crawl_options(args: &CrawlArgs) -> anyhow::Result<CrawlOptions> {
    let mut options = load_options(args.config.as_ref())?;

    if let Some(max_pages) = args.max_pages {
        options.max_pages = max_pages;
    }
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    if !args.include.is_empty() {
        options.include_patterns = args.include.clone();
    }
    if !args.exclude.is_empty() {
        options.exclude_patterns = args.exclude.clone();
    }
    if args.allow_backwards {
        options.allow_backwards = true;
    }
    if let Some(concurrency) = args.concurrency {
        options.max_concurrency = concurrency;
    }
    apply_fetch_args(&mut options.fetch, &args.fetch);

    Ok(options)
}

/// Picks the output handler selected on the command line
fn output_handler(args: &OutputArgs) -> anyhow::Result<Box<dyn OutputHandler>> {
    if let Some(dir) = &args.output {
        let output = MarkdownDirectory::create(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        return Ok(Box::new(output));
    }
    if args.json {
        return Ok(Box::new(JsonLinesOutput::new(io::stdout(), args.include_html)));
    }
    Ok(Box::new(StdoutMarkdown))
}

/// Prints pages as markdown documents to stdout
struct StdoutMarkdown;

impl OutputHandler for StdoutMarkdown {
    fn write_page(&mut self, page: &PageResult) -> OutputResult<Option<String>> {
        println!("{}", format_page(page));
        Ok(None)
    }
}

/// Handles the --dry-run mode: validates options and shows what would be crawled
fn handle_dry_run(url: &str, options: &CrawlOptions) -> anyhow::Result<()> {
    ripple_crawl::config::validate(options)?;
    let seed = ripple_crawl::url::parse_http_url(url)?;

    println!("=== Ripple Dry Run ===\n");
    println!("Seed: {}", ripple_crawl::normalize_url(seed.as_str()));
    println!("  Max pages: {}", options.max_pages);
    println!("  Max depth: {}", options.max_depth);
    println!("  Concurrency: {}", options.max_concurrency);
    println!("  Allow backwards: {}", options.allow_backwards);
    println!("  Include patterns: {:?}", options.include_patterns);
    println!("  Exclude patterns: {:?}", options.exclude_patterns);
    println!("\nFetch:");
    println!("  Engine: {}", options.fetch.engine.as_str());
    println!("  Timeout: {}ms", options.fetch.timeout_ms);
    println!("  Only main content: {}", options.fetch.only_main_content);
    println!("  User agent: {}", options.fetch.user_agent);

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(args: CrawlArgs, quiet: bool) -> anyhow::Result<()> {
    let options = crawl_options(&args)?;

    if args.dry_run {
        return handle_dry_run(&args.url, &options);
    }

    let mut output = output_handler(&args.output)?;
    let mut summary = CrawlSummary::new(args.url.clone());
    let to_directory = args.output.output.is_some();

    let mut pages = ripple_crawl::crawl(&args.url, options)
        .await
        .context("starting crawl")?;

    while let Some(page) = pages.next().await {
        let file = output.write_page(&page).context("writing page")?;
        summary.record(&page, file);
    }

    summary.finish();
    output.finish(&summary).context("finishing output")?;

    tracing::info!("Crawl completed: {} pages", summary.total_pages());
    if to_directory && !quiet {
        print_statistics(&summary);
    }

    Ok(())
}

/// Handles scraping a single page
async fn handle_scrape(args: ScrapeArgs) -> anyhow::Result<()> {
    let mut fetch = load_options(args.config.as_ref())?.fetch;
    apply_fetch_args(&mut fetch, &args.fetch);

    let page = ripple_crawl::scrape(&args.url, fetch)
        .await
        .context("starting scrape")?;

    if let Some(error) = &page.error {
        anyhow::bail!("Failed to scrape {} (status {}): {}", page.url, page.status_code, error);
    }

    let mut output = output_handler(&args.output)?;
    output.write_page(&page).context("writing page")?;

    Ok(())
}
