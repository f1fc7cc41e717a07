//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::str::FromStr;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::filter::View;
use crate::core::identity::RecordId;
use crate::core::record::Record;
use crate::core::reference;
use crate::core::slot::SlotStorage;
use crate::core::stash::Stash;
use crate::core::store::CollectionStore;
use crate::core::Config;

/// View selection shared by every command that takes position references
///
/// `@N` always means the N-th row of `list` run with the same search.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Only records matching this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

impl SearchArgs {
    pub fn query(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// Locate the stash for this invocation
pub fn open_stash(global: &GlobalOpts) -> Result<Stash> {
    let stash = Stash::resolve(global.data_dir.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    tracing::debug!(dir = %stash.data_dir().display(), origin = ?stash.origin(), "using stash");
    Ok(stash)
}

/// Resolve `auto` against the configured default, then against `fallback`
pub fn effective_format(global: &GlobalOpts, config: &Config, fallback: OutputFormat) -> OutputFormat {
    match global.format {
        OutputFormat::Auto => config
            .default_format
            .as_deref()
            .and_then(|f| f.parse::<OutputFormat>().ok())
            .filter(|f| *f != OutputFormat::Auto)
            .unwrap_or(fallback),
        f => f,
    }
}

/// Save a store at the end of a command, surfacing any write failure
pub fn flush<T: Record, S: SlotStorage>(store: &mut CollectionStore<T, S>) -> Result<()> {
    store.flush().into_diagnostic()
}

/// Turn a store's "found" result into an error naming the missing record
pub fn ensure_found(found: bool, label: &str, id: &RecordId) -> Result<()> {
    if found {
        Ok(())
    } else {
        Err(miette::miette!("{} {} not found", label, id))
    }
}

/// Resolve a user reference against a view
pub fn resolve_ref<T: Record>(view: &View<'_, T>, reference: &str) -> Result<RecordId> {
    reference::resolve(view, reference).map_err(|e| miette::miette!("{}", e))
}

/// Resolve several user references against a view
pub fn resolve_refs<T: Record>(view: &View<'_, T>, references: &[String]) -> Result<Vec<RecordId>> {
    reference::resolve_all(view, references).map_err(|e| miette::miette!("{}", e))
}

/// Serialize records for the structured output formats
///
/// Returns `false` when the format is not a structured one.
pub fn print_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
            Ok(true)
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Print the standard confirmation line for a change
pub fn confirm(global: &GlobalOpts, message: impl std::fmt::Display) {
    if !global.quiet {
        println!("{} {}", style("✓").green(), message);
    }
}

/// Require a non-empty text value (form validation)
pub fn require_text(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(miette::miette!("{} is required", field)),
    }
}

/// Require a strictly positive measurement
pub fn require_positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(miette::miette!("{} must be a positive number, got {}", field, value))
    }
}

/// Prompt for a text field; required fields re-ask until non-blank
pub fn prompt_text(prompt: &str, initial: Option<String>, required: bool) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(!required);
    if let Some(initial) = initial {
        input = input.default(initial);
    }
    if required {
        input = input.validate_with(|value: &String| -> std::result::Result<(), &str> {
            if value.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        });
    }
    let value = input.interact_text().into_diagnostic()?;
    Ok(value.trim().to_string())
}

/// Prompt for a parsed value; dialoguer re-asks until it parses
pub fn prompt_value<T>(prompt: &str, initial: Option<T>) -> Result<T>
where
    T: Clone + ToString + FromStr,
    T::Err: std::fmt::Debug + ToString,
{
    let theme = ColorfulTheme::default();
    let mut input = Input::<T>::with_theme(&theme).with_prompt(prompt);
    if let Some(initial) = initial {
        input = input.default(initial);
    }
    input.interact_text().into_diagnostic()
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a record's key/value detail block
///
/// Empty values are skipped; multi-line values get their own paragraph.
pub fn print_details<T: Record>(record: &T, fields: &[(&str, String)]) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(record.id().to_string()).cyan());
    println!("{}: {}", style("Title").bold(), style(record.title()).yellow());
    println!("{}", style("─".repeat(60)).dim());
    for (label, value) in fields {
        if value.is_empty() {
            continue;
        }
        if value.contains('\n') {
            println!();
            println!("{}", style(format!("{}:", label)).bold());
            println!("{}", value);
        } else {
            println!("{}: {}", style(label).bold(), value);
        }
    }
    println!("{}", style("─".repeat(60)).dim());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("ééééé", 4), "é...");
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("Name", Some("  Hoop ".into())).unwrap(), "Hoop");
        assert!(require_text("Name", Some("   ".into())).is_err());
        assert!(require_text("Name", None).is_err());
    }

    #[test]
    fn test_ensure_found() {
        use crate::core::identity::RecordKind;
        use crate::core::slot::MemorySlots;
        use crate::entities::ShoppingItem;

        let mut store = CollectionStore::open(MemorySlots::new());
        let id = store.add(ShoppingItem::new("hoop"));
        assert!(ensure_found(store.modify(&id, |i| i.is_checked = true), "Item", &id).is_ok());

        let ghost = RecordId::new(RecordKind::Shopping);
        let err = ensure_found(store.modify(&ghost, |i| i.is_checked = true), "Item", &ghost)
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains(&ghost.to_string()));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("Length", 12.5).is_ok());
        assert!(require_positive("Length", 0.0).is_err());
        assert!(require_positive("Length", -1.0).is_err());
        assert!(require_positive("Length", f64::NAN).is_err());
    }

    #[test]
    fn test_effective_format() {
        let global = GlobalOpts {
            format: OutputFormat::Auto,
            quiet: false,
            verbose: false,
            data_dir: None,
        };
        let mut config = Config::default();
        assert_eq!(effective_format(&global, &config, OutputFormat::Tsv), OutputFormat::Tsv);

        config.default_format = Some("json".to_string());
        assert_eq!(effective_format(&global, &config, OutputFormat::Tsv), OutputFormat::Json);

        let explicit = GlobalOpts {
            format: OutputFormat::Md,
            ..global
        };
        assert_eq!(effective_format(&explicit, &config, OutputFormat::Tsv), OutputFormat::Md);
    }
}
