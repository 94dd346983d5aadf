//! Implementation of the CLI commands.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::{AnalysisCache, ResultCache};
use crate::service::{HttpScreeningService, ScreeningFetcher};
use crate::sort::FieldPath;
use crate::store::open_store;
use crate::types::config::{Config, CONFIG_FILE};
use crate::view::{render_table, Dashboard};
use crate::ScreenerResult;

/// Wires the configured store and service into a dashboard.
pub fn build_dashboard(config: &Config, tickers: Vec<String>) -> ScreenerResult<Dashboard> {
    let store = open_store(&config.store)?;
    let service = Arc::new(HttpScreeningService::from_config(&config.service)?);

    let tickers = if tickers.is_empty() {
        config.service.tickers.clone()
    } else {
        tickers
    };

    let results = ResultCache::new(service.clone(), store).with_tickers(tickers);
    let analyses = AnalysisCache::new(service);
    Ok(Dashboard::new(results, analyses))
}

/// Writes a default configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> ScreenerResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Arc Screener initialized.");
    println!("Configuration created at: {}", config_path.display());
    println!("Results store: {}", config.store.path.display());
    println!();
    println!("Next steps:");
    println!("  1. Point [service] base_url at the scoring service");
    println!("  2. Check it answers: arc-screener status");
    println!("  3. Screen: arc-screener screen");

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Prints the headline figures, the table and the last-updated line.
pub(crate) fn print_overview(dashboard: &Dashboard) {
    let snapshot = dashboard.snapshot();
    let summary = dashboard.summary();

    let top = summary
        .top_score
        .map(|s| format!("{s:.1}"))
        .unwrap_or_else(|| "--".to_string());
    let avg = summary
        .avg_p_fcf
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "--".to_string());

    println!(
        "Tickers screened: {}   Top score: {}   Avg P/FCF: {}",
        summary.tickers_screened, top, avg
    );

    if let Some(error) = &snapshot.error {
        eprintln!("Error: {}", error);
    }

    if snapshot.rows.is_empty() {
        println!("\nNo results.");
    } else {
        println!();
        print!("{}", render_table(&snapshot.rows, &snapshot.sort));
    }

    if let Some(ts) = snapshot.last_updated {
        println!("\nLast updated: {}", format_timestamp(ts));
    }
}

/// Loads results (cached unless `refresh`), applies column clicks, prints.
pub async fn screen(
    refresh: bool,
    tickers: Vec<String>,
    sort: &[String],
    config: &Config,
) -> ScreenerResult<()> {
    let keys = sort
        .iter()
        .map(|s| s.parse::<FieldPath>())
        .collect::<ScreenerResult<Vec<_>>>()?;

    let dashboard = build_dashboard(config, tickers)?;

    let bar = spinner("Fetching latest market intelligence...");
    let outcome = dashboard.refresh(refresh).await;
    bar.finish_and_clear();

    for key in keys {
        dashboard.click_column(key);
    }

    print_overview(&dashboard);
    outcome
}

/// Fetches and prints the analysis for `symbol`.
pub async fn analyze(symbol: &str, config: &Config) -> ScreenerResult<()> {
    let dashboard = build_dashboard(config, Vec::new())?;

    let bar = spinner(&format!("Analyzing {}...", symbol));
    let outcome = dashboard.analyze(symbol).await;
    bar.finish_and_clear();

    match outcome {
        Ok(record) => {
            println!("Analysis: {}\n", record.symbol);
            println!("{}", record.display_text());
            Ok(())
        }
        Err(e) => {
            if let Some(notice) = dashboard.take_notice() {
                eprintln!("{}", notice);
            }
            Err(e)
        }
    }
}

/// Runs the interactive session.
pub async fn browse(refresh: bool, config: &Config) -> ScreenerResult<()> {
    let dashboard = build_dashboard(config, Vec::new())?;
    super::interactive::run_browser(&dashboard, refresh).await
}

/// Shows persisted entry freshness and service availability.
pub async fn status(config: &Config) -> ScreenerResult<()> {
    println!("Checking Arc Screener status...\n");

    let store = open_store(&config.store)?;
    let service = Arc::new(HttpScreeningService::from_config(&config.service)?);
    let results = ResultCache::new(service.clone(), store);

    match results.persisted_entry() {
        Some(entry) => {
            let age = entry.age(Utc::now());
            let state = if results.is_fresh(&entry) {
                "fresh"
            } else {
                "expired"
            };
            println!(
                "  ✓ cached results - {} records, {} ({}h{:02}m old)",
                entry.len(),
                state,
                age.num_hours(),
                age.num_minutes() % 60
            );
            println!("      fetched: {}", format_timestamp(entry.timestamp));
        }
        None => println!("  ○ cached results - none"),
    }

    let available = service.is_available().await;
    let (icon, text) = if available {
        ("✓", "reachable")
    } else {
        ("✗", "unreachable")
    };
    println!("  {} service {} - {}", icon, service.base_url(), text);

    Ok(())
}

/// Shows version.
pub fn version() {
    println!("arc-screener {}", env!("CARGO_PKG_VERSION"));
}
