//! Command line interface.

pub mod commands;
mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arc Screener - cached equity screening from the terminal.
#[derive(Parser, Debug)]
#[command(name = "arc-screener")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "arc-screener.toml")]
    pub config: PathBuf,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Writes a default configuration file.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Shows screening results, from cache when fresh.
    Screen {
        /// Ignore the cached results and fetch.
        #[arg(short, long)]
        refresh: bool,

        /// Symbols to screen (comma separated). Overrides the config.
        #[arg(short, long, value_delimiter = ',')]
        tickers: Vec<String>,

        /// Column to sort by; repeat to click a column several times.
        #[arg(short, long)]
        sort: Vec<String>,
    },

    /// Shows the generated analysis for a symbol.
    Analyze {
        /// Ticker symbol (case sensitive).
        symbol: String,
    },

    /// Interactive session: sort, analyze, refresh.
    Browse {
        /// Ignore the cached results on start.
        #[arg(short, long)]
        refresh: bool,
    },

    /// Shows cache freshness and service availability.
    Status,

    /// Shows version.
    Version,
}
