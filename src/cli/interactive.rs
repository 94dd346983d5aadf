//! Interactive browsing session.
//!
//! One loop drives the dashboard: column clicks re-sort without touching the
//! caches, analyses are memoized for the whole session.

use dialoguer::{theme::ColorfulTheme, Select};

use super::commands::print_overview;
use crate::sort::Column;
use crate::view::Dashboard;
use crate::ScreenerResult;

/// Runs the browse loop until the user quits.
pub async fn run_browser(dashboard: &Dashboard, force_refresh: bool) -> ScreenerResult<()> {
    let theme = ColorfulTheme::default();

    if let Err(e) = dashboard.refresh(force_refresh).await {
        tracing::warn!("initial load failed: {}", e);
    }

    loop {
        println!();
        print_overview(dashboard);
        println!();

        let options = vec!["Sort by column", "Analyze a symbol", "Refresh data", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => sort_by_column(&theme, dashboard)?,
            1 => analyze_symbol(&theme, dashboard).await?,
            2 => {
                println!("\nRefreshing...");
                if let Err(e) = dashboard.refresh(true).await {
                    tracing::warn!("refresh failed: {}", e);
                }
            }
            _ => break,
        }
    }

    Ok(())
}

/// Clicks a column header.
fn sort_by_column(theme: &ColorfulTheme, dashboard: &Dashboard) -> ScreenerResult<()> {
    let active = Column::for_field(&dashboard.sort_state().key);
    let labels: Vec<&str> = Column::ALL.iter().map(|c| c.label()).collect();
    let current = active
        .and_then(|a| Column::ALL.iter().position(|&c| c == a))
        .unwrap_or(0);

    let selection = Select::with_theme(theme)
        .with_prompt("Sort by")
        .items(&labels)
        .default(current)
        .interact()?;

    let state = dashboard.click_column(Column::ALL[selection].field_path());
    println!(
        "\n✓ Sorted by {} ({})",
        Column::ALL[selection].label(),
        state.direction
    );
    Ok(())
}

/// Opens the analysis of a listed symbol.
async fn analyze_symbol(theme: &ColorfulTheme, dashboard: &Dashboard) -> ScreenerResult<()> {
    let symbols: Vec<String> = dashboard
        .snapshot()
        .rows
        .into_iter()
        .map(|r| r.symbol)
        .collect();

    if symbols.is_empty() {
        println!("\nNothing to analyze yet.");
        return Ok(());
    }

    let selection = Select::with_theme(theme)
        .with_prompt("Symbol")
        .items(&symbols)
        .default(0)
        .max_length(15)
        .interact()?;

    let symbol = &symbols[selection];
    println!("\nAnalyzing {}...", symbol);

    match dashboard.analyze(symbol).await {
        Ok(record) => {
            println!("\nAnalysis: {}\n", record.symbol);
            println!("{}", record.display_text());
            dashboard.close_analysis();
        }
        Err(e) => {
            tracing::debug!("analysis failed: {}", e);
            if let Some(notice) = dashboard.take_notice() {
                eprintln!("\n✗ {}", notice);
            }
        }
    }

    Ok(())
}
