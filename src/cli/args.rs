//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    catalog::CatalogCommands, completions::CompletionsArgs, config::ConfigCommands,
    fabric::FabricCommands, init::InitArgs, kit::KitCommands, pattern::PatternCommands,
    shop::ShopCommands, status::StatusArgs, thread::ThreadCommands,
};

#[derive(Parser)]
#[command(name = "sable")]
#[command(author, version, about = "S.A.B.L.E needlework stash keeper")]
#[command(long_about = "Keep track of a needlework stash: thread inventory, fabric, kits, patterns and a shopping list.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Stash data directory (default: nearest .sable/, else the user data dir)
    #[arg(long, global = true, env = "SABLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stash in a directory
    Init(InitArgs),

    /// Thread inventory (seeded from the DMC catalog)
    #[command(subcommand)]
    Thread(ThreadCommands),

    /// Fabric stock
    #[command(subcommand)]
    Fabric(FabricCommands),

    /// Project kits
    #[command(subcommand)]
    Kit(KitCommands),

    /// Patterns and charts
    #[command(subcommand)]
    Pattern(PatternCommands),

    /// Shopping list
    #[command(subcommand)]
    Shop(ShopCommands),

    /// Browse the DMC reference catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Show a summary of every collection
    Status(StatusArgs),

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (pretty for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <OutputFormat as ValueEnum>::from_str(s, true)
    }
}
