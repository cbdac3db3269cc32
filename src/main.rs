//! # lictl CLI Application
//!
//! Command-line interface for scraping public LinkedIn pages.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - One subcommand per entity kind (`company`, `job`, `post`, `pulse`, `user`),
//!   each with:
//!   - `get`: fetch a single page by URL
//!   - `search`: find pages by keyword (and region, for jobs)
//!
//! ## Behaviour
//!
//! - Results are written to a timestamped JSON or CSV file in the output directory
//! - Partial search results are written before any error is reported
//! - A rate limit prints a dedicated warning; other failures print `Error: ...`
//! - When the output file cannot be written the records are printed as JSON
//! - Failures never change the exit status

mod telemetry;

use std::fmt::Debug;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lictl::entity::{Company, Job, Post, Pulse, User};
use lictl::output::{OutputFormat, write_record, write_records};
use lictl::record::Record;
use lictl::scrape::{ClientConfig, DEFAULT_USER_AGENTS, Extract, ScrapeClient, fetch_record};
use lictl::search::{BatchOutcome, DuckDuckGo, SearchOptions, Searchable, search_jobs, search_records};
use tracing::instrument;
use url::Url;

const RATE_LIMIT_WARNING: &str = "Warning: You've hit the rate limit (HTTP 429 Too Many Requests). Please avoid making further requests for some time.";

#[derive(Parser)]
#[command(author, version, about = "Scrape public LinkedIn pages into JSON or CSV files", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Output format (json|csv)
    #[arg(short, long, global = true, default_value = "json")]
    format: OutputFormat,

    /// Output directory, created if missing (default: current directory)
    #[arg(short, long, global = true, env = "LICTL_OUTPUT")]
    output: Option<PathBuf>,

    /// Log every fetched URL and record
    #[arg(short, long, global = true)]
    debug: bool,

    /// Pause between search pages or result URLs (e.g. 250ms, 2s, 1m)
    #[arg(short, long, global = true, default_value = "100ms", value_parser = parse_interval)]
    interval: Duration,

    /// Maximum number of search results to fetch
    #[arg(short, long, global = true, default_value = "100")]
    limit: usize,

    /// User agents to rotate through (comma-separated)
    #[arg(long, global = true, env = "LICTL_USER_AGENTS", value_delimiter = ',')]
    user_agents: Vec<String>,

    /// Proxy URLs to rotate through (comma-separated)
    #[arg(long, global = true, env = "LICTL_PROXIES", value_delimiter = ',')]
    proxies: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Attempts per request before giving up
    #[arg(long, global = true, default_value = "3")]
    retries: u32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// LinkedIn company pages
    Company {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// LinkedIn job postings
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// LinkedIn feed posts
    Post {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// LinkedIn Pulse articles
    Pulse {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// LinkedIn member profiles
    User {
        #[command(subcommand)]
        action: EntityAction,
    },
}

#[derive(Subcommand, Debug)]
enum EntityAction {
    /// Fetch a single page by URL
    Get(GetArgs),

    /// Search pages by keywords
    Search(SearchArgs),
}

#[derive(Subcommand, Debug)]
enum JobAction {
    /// Fetch a single job posting by URL
    Get(GetArgs),

    /// Search job postings by keywords and regions
    Search(JobSearchArgs),
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Page URL
    #[arg(short, long, value_parser = parse_url)]
    url: String,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Keywords to search for
    #[arg(short, long, required = true, num_args = 1.., value_delimiter = ',')]
    keywords: Vec<String>,
}

#[derive(Args, Debug)]
struct JobSearchArgs {
    /// Keywords to search for
    #[arg(short, long, required = true, num_args = 1.., value_delimiter = ',')]
    keywords: Vec<String>,

    /// Regions to search in
    #[arg(short, long, required = true, num_args = 1.., value_delimiter = ',')]
    regions: Vec<String>,
}

/// Parse an interval such as `250ms`, `2s`, `1m` or a bare millisecond count
fn parse_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (amount, unit) = s.split_at(split);
    let amount: u64 = amount
        .parse()
        .map_err(|_| format!("invalid interval '{}'", s))?;

    let interval = match unit.trim() {
        "" | "ms" => Duration::from_millis(amount),
        "s" => Duration::from_secs(amount),
        "m" => Duration::from_secs(amount.saturating_mul(60)),
        other => return Err(format!("unknown interval unit '{}' (use ms, s or m)", other)),
    };

    if interval.is_zero() {
        return Err("interval must be greater than zero".to_string());
    }
    Ok(interval)
}

/// Accept only absolute http(s) URLs
fn parse_url(s: &str) -> Result<String, String> {
    let url = Url::parse(s.trim()).map_err(|e| format!("invalid URL '{}': {}", s, e))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(format!("URL '{}' must be an http or https address", s));
    }
    Ok(url.into())
}

fn build_client(global: &GlobalArgs) -> anyhow::Result<ScrapeClient> {
    let user_agents = if global.user_agents.is_empty() {
        DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
    } else {
        global.user_agents.clone()
    };

    let config = ClientConfig::builder()
        .user_agents(user_agents)
        .proxies(global.proxies.clone())
        .timeout(Duration::from_secs(global.timeout))
        .max_retries(global.retries)
        .build();

    ScrapeClient::new(config).context("failed to configure the scrape client")
}

fn search_options(global: &GlobalArgs, keywords: &[String], regions: &[String]) -> SearchOptions {
    SearchOptions::builder()
        .keywords(keywords.iter().cloned())
        .regions(regions.iter().cloned())
        .interval(global.interval)
        .limit(global.limit)
        .debug(global.debug)
        .build()
}

fn output_dir(global: &GlobalArgs) -> PathBuf {
    global.output.clone().unwrap_or_default()
}

fn report_error(err: &lictl::Error) {
    if err.is_rate_limited() {
        println!("{}", RATE_LIMIT_WARNING);
    } else {
        println!("Error: {}", err);
    }
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[instrument(skip(client, global))]
async fn get_command<R>(client: &ScrapeClient, url: &str, global: &GlobalArgs)
where
    R: Extract + Debug,
{
    let record = match fetch_record::<R>(client, url, global.debug).await {
        Ok(record) => record,
        Err(err) => {
            report_error(&err);
            return;
        }
    };

    match write_record(&record, global.format, output_dir(global)).await {
        Ok(path) => println!("{} details written to file {}", R::NAME, path.display()),
        Err(err) => {
            println!("Error writing {} details: {}", R::NAME, err);
            println!("Falling back to printing {} details:", R::NAME);
            println!("{}", record.json());
        }
    }
}

async fn write_batch<R: Record>(outcome: BatchOutcome<R>, global: &GlobalArgs) {
    // an error with nothing gathered leaves no file behind
    if outcome.error.is_none() || !outcome.records.is_empty() {
        match write_records(&outcome.records, global.format, output_dir(global)).await {
            Ok(path) => println!(
                "{} {} records written to file {}",
                outcome.records.len(),
                R::NAME,
                path.display()
            ),
            Err(err) => {
                println!("Error writing {} records: {}", R::NAME, err);
                println!("Falling back to printing {} records:", R::NAME);
                println!("{}", outcome.records.to_json());
            }
        }
    }

    if let Some(err) = &outcome.error {
        report_error(err);
    }
}

#[instrument(skip(client, global))]
async fn search_command<R: Searchable>(client: &ScrapeClient, keywords: &[String], global: &GlobalArgs) {
    let options = search_options(global, keywords, &[]);
    let engine = DuckDuckGo::new(client.clone());

    let progress = spinner(format!("Searching {} pages for {}", R::NAME, keywords.join(" ")));
    let outcome = search_records::<R, _>(client, &engine, &options).await;
    progress.finish_and_clear();

    write_batch(outcome, global).await;
}

#[instrument(skip(client, global))]
async fn job_search_command(client: &ScrapeClient, args: &JobSearchArgs, global: &GlobalArgs) {
    let options = search_options(global, &args.keywords, &args.regions);

    let progress = spinner(format!(
        "Searching jobs for {} in {}",
        args.keywords.join(" "),
        args.regions.join(", ")
    ));
    let outcome = search_jobs(client, &options).await;
    progress.finish_and_clear();

    write_batch(outcome, global).await;
}

async fn entity_command<R: Searchable>(client: &ScrapeClient, action: &EntityAction, global: &GlobalArgs) {
    match action {
        EntityAction::Get(args) => get_command::<R>(client, &args.url, global).await,
        EntityAction::Search(args) => search_command::<R>(client, &args.keywords, global).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing_subscriber(cli.global.debug);

    let client = match build_client(&cli.global) {
        Ok(client) => client,
        Err(err) => {
            println!("Error: {:#}", err);
            return Ok(());
        }
    };

    let global = &cli.global;
    match &cli.command {
        Commands::Company { action } => entity_command::<Company>(&client, action, global).await,
        Commands::Post { action } => entity_command::<Post>(&client, action, global).await,
        Commands::Pulse { action } => entity_command::<Pulse>(&client, action, global).await,
        Commands::User { action } => entity_command::<User>(&client, action, global).await,
        Commands::Job { action } => match action {
            JobAction::Get(args) => get_command::<Job>(&client, &args.url, global).await,
            JobAction::Search(args) => job_search_command(&client, args, global).await,
        },
    }

    Ok(())
}
