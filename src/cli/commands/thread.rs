//! `sable thread` command - Thread inventory management
//!
//! The inventory is always the full DMC catalog: every color is listed, with
//! zero skeins until it is stocked. Positions (`@N`) refer to the rows printed
//! by `thread list` with the same view flags.

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{
    confirm, effective_format, ensure_found, flush, open_stash, print_details, print_structured,
    require_text, resolve_ref, resolve_refs, SearchArgs,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::{self, display_color};
use crate::core::filter::View;
use crate::core::slot::FileSlots;
use crate::core::store::CollectionStore;
use crate::core::Config;
use crate::entities::Thread;

type ThreadStore = CollectionStore<Thread, FileSlots>;

#[derive(Subcommand, Debug)]
pub enum ThreadCommands {
    /// List thread colors and stock
    List(ListArgs),

    /// Add a thread record
    Add(AddArgs),

    /// Show one thread
    Show(ShowArgs),

    /// Change fields of a thread
    Edit(EditArgs),

    /// Step the skein count up or down (e.g. `adjust @3 2`, `adjust @3 -1`)
    Adjust(AdjustArgs),

    /// Mark a thread as spoken for (reserved for a project)
    Spoken(SpokenArgs),

    /// Remove threads
    Rm(RmArgs),
}

/// Which rows `@N` positions refer to
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ThreadViewArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Only colors with skeins on hand
    #[arg(long)]
    pub owned: bool,

    /// Only colors that are spoken for
    #[arg(long)]
    pub spoken: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ThreadViewArgs,

    /// Show count only, not the items
    #[arg(long)]
    pub count: bool,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Color: a catalog number (e.g. 310) or free text
    #[arg(long, short = 'c')]
    pub color: Option<String>,

    /// Skeins on hand
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Brand (default: config `default_brand`, else DMC)
    #[arg(long, short = 'b')]
    pub brand: Option<String>,

    /// Reserve for a project
    #[arg(long)]
    pub spoken_for: bool,

    /// Prompt for each field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Position (@N) or ID
    pub reference: String,

    #[command(flatten)]
    pub view: ThreadViewArgs,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Position (@N) or ID
    pub reference: String,

    #[command(flatten)]
    pub view: ThreadViewArgs,

    /// New brand
    #[arg(long, short = 'b')]
    pub brand: Option<String>,

    /// New color
    #[arg(long, short = 'c')]
    pub color: Option<String>,

    /// New skein count
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Spoken for (true/false)
    #[arg(long, value_name = "BOOL")]
    pub spoken_for: Option<bool>,
}

#[derive(clap::Args, Debug)]
pub struct AdjustArgs {
    /// Position (@N) or ID
    pub reference: String,

    /// Skeins to add (negative to use up)
    #[arg(allow_hyphen_values = true)]
    pub delta: i64,

    #[command(flatten)]
    pub view: ThreadViewArgs,
}

#[derive(clap::Args, Debug)]
pub struct SpokenArgs {
    /// Position (@N) or ID
    pub reference: String,

    /// Release the reservation instead
    #[arg(long)]
    pub off: bool,

    #[command(flatten)]
    pub view: ThreadViewArgs,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Positions (@N) or IDs
    #[arg(required = true)]
    pub references: Vec<String>,

    #[command(flatten)]
    pub view: ThreadViewArgs,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("swatch", "SWATCH", 10),
    ColumnDef::new("color", "COLOR", 34),
    ColumnDef::new("brand", "BRAND", 8),
    ColumnDef::new("quantity", "QTY", 5),
    ColumnDef::new("spokenFor", "SPOKEN", 6),
];

pub fn run(cmd: ThreadCommands, global: &GlobalOpts) -> Result<()> {
    let stash = open_stash(global)?;
    let config = Config::load(Some(&stash));
    let mut store: ThreadStore = stash.open();

    match cmd {
        ThreadCommands::List(args) => run_list(&store, args, global, &config)?,
        ThreadCommands::Add(args) => run_add(&mut store, args, global, &config)?,
        ThreadCommands::Show(args) => run_show(&store, args, global, &config)?,
        ThreadCommands::Edit(args) => run_edit(&mut store, args, global)?,
        ThreadCommands::Adjust(args) => run_adjust(&mut store, args, global)?,
        ThreadCommands::Spoken(args) => run_spoken(&mut store, args, global)?,
        ThreadCommands::Rm(args) => run_rm(&mut store, args, global)?,
    }

    flush(&mut store)
}

/// The rows `list` would print for these flags
fn thread_view<'a>(store: &'a ThreadStore, args: &ThreadViewArgs) -> View<'a, Thread> {
    store
        .filter(args.search.query())
        .retain(|t| !args.owned || t.quantity > 0)
        .retain(|t| !args.spoken || t.spoken_for)
}

/// Expand a bare catalog number (`310`) to its composite color
fn normalize_color(input: &str) -> String {
    let input = input.trim();
    catalog::lookup(input).map_or_else(|| input.to_string(), |entry| entry.composite())
}

fn is_catalog_color(color: &str) -> bool {
    catalog::entries().iter().any(|e| e.composite() == color)
}

fn warn_off_catalog(color: &str) {
    eprintln!(
        "{} '{}' is not a {} catalog color; it will not be kept the next time the inventory loads",
        style("!").yellow(),
        color,
        catalog::CATALOG_BRAND
    );
}

fn run_list(store: &ThreadStore, args: ListArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let mut view = thread_view(store, &args.view);

    if args.count {
        println!("{}", view.len());
        return Ok(());
    }
    if let Some(limit) = args.limit {
        view.truncate(limit);
    }

    let format = effective_format(global, config, OutputFormat::Tsv);
    let records: Vec<&Thread> = view.records().collect();
    if print_structured(&records, format)? {
        return Ok(());
    }

    if view.is_empty() {
        if !global.quiet {
            println!("No threads match.");
        }
        return Ok(());
    }

    let low = config.low_stock();
    let rows: Vec<TableRow> = view
        .iter()
        .map(|(pos, t)| {
            TableRow::new(
                pos,
                t.id.to_string(),
                vec![
                    CellValue::Swatch(display_color(t.color_name())),
                    CellValue::Text(t.color.clone()),
                    CellValue::Text(t.brand.clone()),
                    CellValue::Stock {
                        quantity: t.quantity,
                        low,
                    },
                    CellValue::Flag(t.spoken_for),
                ],
            )
        })
        .collect();

    TableFormatter::new(COLUMNS, "thread")
        .quiet(global.quiet)
        .output(&rows, format)
}

fn run_add(store: &mut ThreadStore, args: AddArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let (brand, color, quantity, spoken_for) = if args.interactive {
        let theme = ColorfulTheme::default();

        let brand: String = Input::with_theme(&theme)
            .with_prompt("Brand")
            .default(args.brand.unwrap_or_else(|| config.brand()))
            .interact_text()
            .into_diagnostic()?;

        let color: String = Input::with_theme(&theme)
            .with_prompt("Color (catalog number or name)")
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if input.trim().is_empty() {
                    Err("color is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .into_diagnostic()?;

        let quantity: u32 = Input::with_theme(&theme)
            .with_prompt("Quantity")
            .default(args.quantity.unwrap_or(1))
            .interact_text()
            .into_diagnostic()?;

        let spoken_for = Confirm::with_theme(&theme)
            .with_prompt("Spoken for?")
            .default(args.spoken_for)
            .interact()
            .into_diagnostic()?;

        (brand, color, quantity, spoken_for)
    } else {
        let color = require_text("Color", args.color)?;
        let quantity = args
            .quantity
            .ok_or_else(|| miette::miette!("Quantity is required (use --quantity N)"))?;
        let brand = args.brand.unwrap_or_else(|| config.brand());
        (brand, color, quantity, args.spoken_for)
    };

    let brand = require_text("Brand", Some(brand))?;
    let color = normalize_color(&color);
    if !is_catalog_color(&color) {
        warn_off_catalog(&color);
    }

    let id = store.add(Thread::new(brand, color.clone(), quantity, spoken_for));

    if global.format == OutputFormat::Id {
        println!("{}", id);
    } else {
        confirm(
            global,
            format_args!(
                "Added {} ({} skeins) as {}",
                style(&color).yellow(),
                quantity,
                style(id.to_string()).cyan()
            ),
        );
    }
    Ok(())
}

fn run_show(store: &ThreadStore, args: ShowArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let view = thread_view(store, &args.view);
    let id = resolve_ref(&view, &args.reference)?;
    let thread = store
        .get(&id)
        .ok_or_else(|| miette::miette!("Thread {} not found", id))?;

    let format = effective_format(global, config, OutputFormat::Auto);
    if print_structured(thread, format)? {
        return Ok(());
    }
    if format == OutputFormat::Id {
        println!("{}", thread.id);
        return Ok(());
    }

    let number = thread
        .color
        .split_once(" - ")
        .map_or_else(String::new, |(number, _)| number.to_string());
    let spoken = if thread.spoken_for { "yes" } else { "no" };

    print_details(
        thread,
        &[
            ("Brand", thread.brand.clone()),
            ("Number", number),
            ("Quantity", thread.quantity.to_string()),
            ("Spoken for", spoken.to_string()),
            ("Display color", display_color(thread.color_name()).to_string()),
        ],
    );
    Ok(())
}

fn run_edit(store: &mut ThreadStore, args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let view = thread_view(store, &args.view);
    let id = resolve_ref(&view, &args.reference)?;
    let mut edited = store
        .get(&id)
        .cloned()
        .ok_or_else(|| miette::miette!("Thread {} not found", id))?;

    if args.brand.is_none() && args.color.is_none() && args.quantity.is_none() && args.spoken_for.is_none() {
        return Err(miette::miette!(
            "Nothing to change. Use --brand, --color, --quantity or --spoken-for"
        ));
    }

    if let Some(brand) = args.brand {
        edited.brand = require_text("Brand", Some(brand))?;
    }
    if let Some(color) = args.color {
        edited.color = normalize_color(&require_text("Color", Some(color))?);
        if !is_catalog_color(&edited.color) {
            warn_off_catalog(&edited.color);
        }
    }
    if let Some(quantity) = args.quantity {
        edited.quantity = quantity;
    }
    if let Some(spoken_for) = args.spoken_for {
        edited.spoken_for = spoken_for;
    }

    let label = edited.color.clone();
    ensure_found(store.update(&id, edited), "Thread", &id)?;
    confirm(global, format_args!("Updated {}", style(label).yellow()));
    Ok(())
}

fn run_adjust(store: &mut ThreadStore, args: AdjustArgs, global: &GlobalOpts) -> Result<()> {
    let view = thread_view(store, &args.view);
    let id = resolve_ref(&view, &args.reference)?;

    ensure_found(store.adjust_quantity(&id, args.delta), "Thread", &id)?;

    if let Some(thread) = store.get(&id) {
        confirm(
            global,
            format_args!(
                "{} now has {} skeins",
                style(&thread.color).yellow(),
                style(thread.quantity).cyan()
            ),
        );
    }
    Ok(())
}

fn run_spoken(store: &mut ThreadStore, args: SpokenArgs, global: &GlobalOpts) -> Result<()> {
    let view = thread_view(store, &args.view);
    let id = resolve_ref(&view, &args.reference)?;

    ensure_found(store.set_spoken_for(&id, !args.off), "Thread", &id)?;

    if let Some(thread) = store.get(&id) {
        let state = if thread.spoken_for { "spoken for" } else { "available" };
        confirm(global, format_args!("{} is {}", style(&thread.color).yellow(), state));
    }
    Ok(())
}

fn run_rm(store: &mut ThreadStore, args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let view = thread_view(store, &args.view);
    let ids = resolve_refs(&view, &args.references)?;

    let removed = store.remove_ids(&ids);
    confirm(global, format_args!("Removed {} thread(s)", removed));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_color_expands_catalog_numbers() {
        assert_eq!(normalize_color("310"), "310 - Black");
        assert_eq!(normalize_color(" 321 "), "321 - Red");
        assert_eq!(normalize_color("my own green"), "my own green");
    }

    #[test]
    fn test_is_catalog_color() {
        assert!(is_catalog_color("310 - Black"));
        assert!(!is_catalog_color("310 - Jet"));
    }
}
