//! `sable config` command - Configuration management
//!
//! Provides commands to view and modify sable configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::helpers::open_stash;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path(PathArgs),

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,

    /// Show only stash-level config
    #[arg(long = "stash-only", conflicts_with = "global_only")]
    pub stash_only: bool,

    /// Show only global (user) config
    #[arg(long = "global-only")]
    pub global_only: bool,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., default_brand, low_stock)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of stash config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of stash config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Show only stash config path
    #[arg(long = "stash-only", conflicts_with = "global_only")]
    pub stash_only: bool,

    /// Show only global config path
    #[arg(long = "global-only")]
    pub global_only: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("default_brand", "Brand recorded on new threads (default: DMC)"),
    (
        "default_format",
        "Default output format (tsv, json, yaml, csv, md, id)",
    ),
    ("low_stock", "Skein count at or below which a color is low (default: 1)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path(args) => run_path(args, global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let stash = open_stash(global)?;
    let config = Config::load(Some(&stash));

    if let Some(key) = &args.key {
        check_key(key)?;
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    if args.stash_only {
        return show_file("Stash config:", &stash.config_path());
    }
    if args.global_only {
        return show_file("Global config:", &global_config_path()?);
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();

    for (key, _) in VALID_KEYS {
        print_config_value(key, get_config_value(&config, key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (SABLE_BRAND, SABLE_FORMAT)");
    println!("  2. Stash config ({})", stash.config_path().display());
    println!("  3. Global config (~/.config/sable/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let value = parse_value(&args.key, &args.value)?;

    let config_path = target_path(args.global, global)?;
    let mut config_map = read_mapping(&config_path)?;

    if let serde_yml::Value::Mapping(map) = &mut config_map {
        map.insert(serde_yml::Value::String(args.key.clone()), value);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "stash" };
    if !global.quiet {
        println!(
            "{} Set {} {} {} in {} config",
            style("✓").green(),
            style(&args.key).cyan(),
            style("→").dim(),
            style(&args.value).yellow(),
            scope
        );
    }

    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let config_path = target_path(args.global, global)?;

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    let removed = match &mut config_map {
        serde_yml::Value::Mapping(map) => map
            .remove(&serde_yml::Value::String(args.key.clone()))
            .is_some(),
        _ => false,
    };

    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "stash" };
    if !global.quiet {
        println!(
            "{} Removed {} from {} config",
            style("✓").green(),
            style(&args.key).cyan(),
            scope
        );
    }

    Ok(())
}

fn run_path(args: PathArgs, global: &GlobalOpts) -> Result<()> {
    if args.stash_only {
        let stash = open_stash(global)?;
        println!("{}", stash.config_path().display());
        return Ok(());
    }
    if args.global_only {
        println!("{}", global_config_path()?.display());
        return Ok(());
    }

    let global_path = global_config_path()?;
    let stash_path = open_stash(global).map(|stash| stash.config_path());

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    print_exists(&global_path, 9);

    println!();
    match stash_path {
        Ok(path) => {
            println!("  {} {}", style("Stash:").cyan(), path.display());
            print_exists(&path, 8);
        }
        Err(_) => println!(
            "  {} {}",
            style("Stash:").cyan(),
            style("(no stash available)").dim()
        ),
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'sable config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn target_path(use_global: bool, global: &GlobalOpts) -> Result<PathBuf> {
    if use_global {
        global_config_path()
    } else {
        Ok(open_stash(global)?.config_path())
    }
}

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            "Unknown key '{}'. Run 'sable config keys' to list valid keys",
            key
        ))
    }
}

/// Type-check a value before it is written
fn parse_value(key: &str, raw: &str) -> Result<serde_yml::Value> {
    match key {
        "low_stock" => {
            let n: u32 = raw
                .trim()
                .parse()
                .map_err(|_| miette::miette!("low_stock must be a whole number, got '{}'", raw))?;
            Ok(serde_yml::Value::Number(n.into()))
        }
        "default_format" => {
            raw.parse::<OutputFormat>()
                .map_err(|_| miette::miette!("Unknown output format '{}'", raw))?;
            Ok(serde_yml::Value::String(raw.trim().to_lowercase()))
        }
        _ => {
            if raw.trim().is_empty() {
                return Err(miette::miette!("{} cannot be empty", key));
            }
            Ok(serde_yml::Value::String(raw.trim().to_string()))
        }
    }
}

fn read_mapping(path: &Path) -> Result<serde_yml::Value> {
    if !path.exists() {
        return Ok(serde_yml::Value::Mapping(Default::default()));
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    let parsed: serde_yml::Value =
        serde_yml::from_str(&content).unwrap_or(serde_yml::Value::Mapping(Default::default()));
    // A file holding only comments parses as null
    if parsed.is_mapping() {
        Ok(parsed)
    } else {
        Ok(serde_yml::Value::Mapping(Default::default()))
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "default_brand" => config.default_brand.clone(),
        "default_format" => config.default_format.clone(),
        "low_stock" => config.low_stock.map(|n| n.to_string()),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn print_exists(path: &Path, indent: usize) {
    let note = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("{:indent$}{}", "", note, indent = indent);
}

fn show_file(label: &str, path: &Path) -> Result<()> {
    println!("{} {}", style(label).bold(), style(path.display()).dim());
    println!();

    if path.exists() {
        let content = fs::read_to_string(path).into_diagnostic()?;
        print!("{}", content);
    } else {
        println!("{}", style("(not created)").dim());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_low_stock_is_numeric() {
        assert_eq!(
            parse_value("low_stock", "3").unwrap(),
            serde_yml::Value::Number(3u32.into())
        );
        assert!(parse_value("low_stock", "lots").is_err());
    }

    #[test]
    fn test_parse_default_format() {
        assert_eq!(
            parse_value("default_format", "JSON").unwrap(),
            serde_yml::Value::String("json".to_string())
        );
        assert!(parse_value("default_format", "pdf").is_err());
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("default_brand").is_ok());
        assert!(check_key("editor").is_err());
    }

    #[test]
    fn test_read_mapping_of_comment_only_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "# nothing here\n").unwrap();

        assert!(read_mapping(&path).unwrap().is_mapping());
    }
}
