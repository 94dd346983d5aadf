use arc_screener::cli::{Cli, Commands};
use arc_screener::types::config::Config;
use arc_screener::ScreenerResult;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ScreenerResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|_| Config::default_config())
    } else {
        Config::default_config()
    };

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("arc_screener={}", log_level)
            .parse()
            .unwrap_or_else(|_| "arc_screener=info".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            arc_screener::cli::commands::init(path).await?;
        }
        Commands::Screen {
            refresh,
            tickers,
            sort,
        } => {
            arc_screener::cli::commands::screen(refresh, tickers, &sort, &config).await?;
        }
        Commands::Analyze { symbol } => {
            arc_screener::cli::commands::analyze(&symbol, &config).await?;
        }
        Commands::Browse { refresh } => {
            arc_screener::cli::commands::browse(refresh, &config).await?;
        }
        Commands::Status => {
            arc_screener::cli::commands::status(&config).await?;
        }
        Commands::Version => {
            arc_screener::cli::commands::version();
        }
    }

    Ok(())
}
