//! OSA Engine CLI
//!
//! Renders one page through the full pipeline and prints the render tree
//! as JSON.

use osa_engine::{Engine, EngineConfig};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<String> = None;
    let mut page_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(path.clone()),
                    None => anyhow::bail!("--config requires a file path"),
                }
            }
            other => page_path = Some(other.to_string()),
        }
        i += 1;
    }

    let page_path = match page_path {
        Some(path) => path,
        None => {
            eprintln!("Usage: osa-engine [--config <path-to-config.toml>] <page-path>");
            process::exit(1);
        }
    };

    let config = match config_path {
        Some(path) => EngineConfig::from_file(&path)?,
        None => {
            eprintln!("Warning: No config file specified, using default test configuration");
            EngineConfig::default_test_config()
        }
    };

    let engine = Engine::from_config(config)?;
    let page = engine.render_page(&page_path).await;

    println!("{}", serde_json::to_string_pretty(&page.node)?);

    Ok(())
}

fn print_help() {
    println!("OSA Engine - Tiered Page Rendering Pipeline");
    println!();
    println!("USAGE:");
    println!("    osa-engine [--config <path-to-config.toml>] <page-path>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    osa-engine --config config/engine.toml /engine/results/strategy-plans/osa/overview-dashboard");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - rules_overrides: optional path to a rule override TOML file");
    println!("    - [fetcher] base_url: base URL of the upstream tier data API");
    println!("    - [fetcher] timeout_secs, max_retries, refresh_interval_secs,");
    println!("      cache_ttl_secs, freshness_window_secs, prefetch_tiers");
    println!();
}
