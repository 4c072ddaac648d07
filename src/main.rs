use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use review_metrics::chart::{self, ChartKind, Theme};
use review_metrics::config::{self, Config};
use review_metrics::github::{build_search_query, GitHubClient, DEFAULT_API_URL};
use review_metrics::output::{self, DEFAULT_CSV_PATH};
use review_metrics::pipeline::{self, PipelineError};
use review_metrics::{credentials, stderr_buffer};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_DATA: i32 = 5;
const EXIT_OUTPUT: i32 = 6;

#[derive(Parser, Debug)]
#[command(name = "review-metrics")]
#[command(about = "Export code review metrics for merged GitHub pull requests", long_about = None)]
#[command(version)]
struct Cli {
    /// Repository to search, as owner/name
    #[arg(short, long)]
    repo: Option<String>,

    /// Organization to search
    #[arg(short, long)]
    org: Option<String>,

    /// Full GitHub search string (replaces --repo and --org)
    #[arg(short, long)]
    query: Option<String>,

    /// GitHub token (defaults to REVIEW_METRICS_GH_TOKEN, then GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// CSV file to write, or to read with --graph
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// GraphQL endpoint (for GitHub Enterprise)
    #[arg(long)]
    api_url: Option<String>,

    /// Plot an existing CSV instead of fetching
    #[arg(short, long, conflicts_with_all = ["repo", "org", "query", "token", "api_url"])]
    graph: bool,

    /// Chart shown first in --graph mode
    #[arg(long, value_enum, default_value_t = ChartKind::CycleTime)]
    chart: ChartKind,

    /// Color theme for the chart viewer
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Path to config file (defaults to ~/.config/review-metrics/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging and per-PR output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "review_metrics=debug"
    } else {
        "review_metrics=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(stderr_buffer::writer),
        )
        .init();
}

fn pipeline_exit_code(err: &PipelineError) -> i32 {
    match err {
        PipelineError::Fetch(e) if e.is_unauthorized() => EXIT_AUTH,
        PipelineError::Fetch(_) => EXIT_NETWORK,
        PipelineError::Derive(_) => EXIT_DATA,
        PipelineError::Export(_) => EXIT_OUTPUT,
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = match config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let settings = file_config.merge(Config {
        repo: cli.repo.clone(),
        org: cli.org.clone(),
        query: cli.query.clone(),
        api_url: cli.api_url.clone(),
        output: cli.file.clone(),
        theme: cli.theme,
    });
    let path = settings
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));

    if cli.graph {
        let records = match output::read_records(&path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Failed to read metrics: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        };

        let theme = chart::resolve_theme(settings.theme.unwrap_or_default());
        let app = chart::App::new(records, path, cli.chart, theme);
        if let Err(e) = chart::run_charts(app).await {
            eprintln!("Chart viewer failed: {:#}", e);
            std::process::exit(EXIT_OUTPUT);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let token = match credentials::resolve_token(cli.token.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    let api_url = settings.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
    let client = match GitHubClient::new(api_url, &token) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let search = build_search_query(&settings.query_options());
    let records = match pipeline::export_metrics(&client, &search, &path).await {
        Ok(records) => records,
        Err(e) => {
            match &e {
                PipelineError::Fetch(fetch) if fetch.is_unauthorized() => {
                    eprintln!("Authentication failed: {}", fetch);
                    eprintln!("Check that your GitHub token is valid and has repo access.");
                }
                PipelineError::Fetch(fetch) => eprintln!("Fetch failed: {}", fetch),
                other => eprintln!("{}", other),
            }
            std::process::exit(pipeline_exit_code(&e));
        }
    };

    let use_colors = output::should_use_colors();
    if cli.verbose {
        println!("{}", output::format_record_list(&records, use_colors));
        println!();
        println!("{}", output::format_summary(&records));
    }
    println!(
        "{}",
        output::format_export_message(records.len(), &path, use_colors)
    );

    std::process::exit(EXIT_SUCCESS);
}
