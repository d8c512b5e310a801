//! Tably CLI — run the tab triage pipeline from a snapshot file.
//!
//! Usage:
//!   tably ping [--backend URL]
//!   tably analyze --tabs tabs.json [--backend URL]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tably::config::DEFAULT_BACKEND_URL;
use tably::{
    AnalysisClient, HttpAnalysisClient, Importance, PipelineConfig, ReconciledTab, SnapshotHost,
    TabPipeline, TabReport,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "tably",
    version,
    about = "Browser tab triage backed by a remote analysis service"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the analysis backend is reachable
    Ping {
        /// Base URL of the analysis backend
        #[arg(long, default_value = DEFAULT_BACKEND_URL)]
        backend: String,
    },
    /// Analyze a snapshot of open tabs and print the triage report
    Analyze {
        /// Path to a JSON snapshot of open tabs
        #[arg(long)]
        tabs: PathBuf,
        /// Base URL of the analysis backend
        #[arg(long, default_value = DEFAULT_BACKEND_URL)]
        backend: String,
        /// Per-tab fetch timeout in seconds
        #[arg(long, default_value_t = 2)]
        fetch_timeout: u64,
        /// Whole-batch request timeout in seconds
        #[arg(long, default_value_t = 30)]
        request_timeout: u64,
    },
}

async fn cmd_ping(config: PipelineConfig) -> i32 {
    let client = HttpAnalysisClient::new(&config);
    match client.ping().await {
        Ok(body) => {
            println!("Backend says: {}", body);
            0
        }
        Err(e) => {
            eprintln!("Error talking to backend: {}", e);
            1
        }
    }
}

async fn cmd_analyze(tabs_path: &Path, config: PipelineConfig) -> i32 {
    let host = match SnapshotHost::open(tabs_path) {
        Ok(host) => Arc::new(host),
        Err(e) => {
            eprintln!("Error reading snapshot: {}", e);
            return 1;
        }
    };
    let client = Arc::new(HttpAnalysisClient::new(&config));
    let pipeline = TabPipeline::new(host, client, config);

    match pipeline.run().await {
        Ok(report) => {
            render_report(&report);
            0
        }
        Err(e) => {
            eprintln!("Could not analyze tabs: {}", e);
            1
        }
    }
}

fn section_title(importance: Importance) -> &'static str {
    match importance {
        Importance::ReadNow => "Read now",
        Importance::SaveForLater => "Save for later",
        Importance::CloseCandidate => "Maybe close",
    }
}

fn chip_label(importance: Importance) -> &'static str {
    match importance {
        Importance::ReadNow => "Read now",
        Importance::SaveForLater => "Save",
        Importance::CloseCandidate => "Maybe close",
    }
}

fn render_card(tab: &ReconciledTab) {
    let c = &tab.classification;
    let title = if tab.record.handle.title.is_empty() {
        "(No title)"
    } else {
        &tab.record.handle.title
    };
    let topic = if c.topic.is_empty() { "Topic" } else { &c.topic };
    let category = if c.category.is_empty() {
        "other"
    } else {
        &c.category
    };
    println!(
        "  - {} [{} | {} | {}] · {} words",
        title,
        topic,
        category,
        chip_label(c.importance),
        c.word_count
    );
    if let Some(summary) = &c.summary {
        if !summary.is_empty() {
            println!("    {}", summary);
        }
    }
}

fn render_report(report: &TabReport) {
    println!("Total tabs: {}", report.tab_count);
    if !report.by_category.is_empty() {
        println!("By category:");
        for item in &report.by_category {
            println!("- {}: {}", item.category, item.count);
        }
    }
    for (importance, tabs) in report.buckets.sections() {
        println!();
        println!("{}", section_title(importance));
        for tab in tabs {
            render_card(tab);
        }
    }
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: could not install tracing subscriber");
    }

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Ping { backend } => {
            let config = PipelineConfig::new().with_backend_url(backend);
            cmd_ping(config).await
        }
        Commands::Analyze {
            tabs,
            backend,
            fetch_timeout,
            request_timeout,
        } => {
            let config = PipelineConfig::new()
                .with_backend_url(backend)
                .with_fetch_timeout(Duration::from_secs(fetch_timeout))
                .with_request_timeout(Duration::from_secs(request_timeout));
            cmd_analyze(&tabs, config).await
        }
    };
    std::process::exit(code);
}
