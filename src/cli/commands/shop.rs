//! `sable shop` command - Shopping list

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{
    confirm, effective_format, ensure_found, flush, open_stash, print_structured, require_text,
    resolve_ref, resolve_refs, SearchArgs,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::slot::FileSlots;
use crate::core::store::CollectionStore;
use crate::core::Config;
use crate::entities::ShoppingItem;

type ShopStore = CollectionStore<ShoppingItem, FileSlots>;

#[derive(Subcommand, Debug)]
pub enum ShopCommands {
    /// List the shopping list
    List(ListArgs),

    /// Add items to the list
    Add(AddArgs),

    /// Cross items off (or back on with --off)
    Check(CheckArgs),

    /// Rename an item
    Edit(EditArgs),

    /// Remove items
    Rm(RmArgs),

    /// Remove every crossed-off item
    Clear,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: SearchArgs,

    /// Only items still to buy
    #[arg(long, conflicts_with = "checked")]
    pub pending: bool,

    /// Only crossed-off items
    #[arg(long)]
    pub checked: bool,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Item names (one item per argument)
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Positions (@N) or IDs
    #[arg(required = true)]
    pub references: Vec<String>,

    /// Put the items back on the list
    #[arg(long)]
    pub off: bool,

    #[command(flatten)]
    pub view: SearchArgs,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Position (@N) or ID
    pub reference: String,

    /// New name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub view: SearchArgs,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Positions (@N) or IDs
    #[arg(required = true)]
    pub references: Vec<String>,

    #[command(flatten)]
    pub view: SearchArgs,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("isChecked", "DONE", 6),
    ColumnDef::new("name", "ITEM", 40),
];

pub fn run(cmd: ShopCommands, global: &GlobalOpts) -> Result<()> {
    let stash = open_stash(global)?;
    let config = Config::load(Some(&stash));
    let mut store: ShopStore = stash.open();

    match cmd {
        ShopCommands::List(args) => run_list(&store, args, global, &config)?,
        ShopCommands::Add(args) => run_add(&mut store, args, global)?,
        ShopCommands::Check(args) => run_check(&mut store, args, global)?,
        ShopCommands::Edit(args) => run_edit(&mut store, args, global)?,
        ShopCommands::Rm(args) => run_rm(&mut store, args, global)?,
        ShopCommands::Clear => run_clear(&mut store, global),
    }

    flush(&mut store)
}

fn run_list(store: &ShopStore, args: ListArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let mut view = store
        .filter(args.view.query())
        .retain(|i| !args.pending || !i.is_checked)
        .retain(|i| !args.checked || i.is_checked);
    if let Some(limit) = args.limit {
        view.truncate(limit);
    }

    let format = effective_format(global, config, OutputFormat::Tsv);
    let records: Vec<&ShoppingItem> = view.records().collect();
    if print_structured(&records, format)? {
        return Ok(());
    }

    if view.is_empty() {
        if !global.quiet {
            println!("The shopping list is empty.");
        }
        return Ok(());
    }

    let rows: Vec<TableRow> = view
        .iter()
        .map(|(pos, i)| {
            TableRow::new(
                pos,
                i.id.to_string(),
                vec![CellValue::Flag(i.is_checked), CellValue::Text(i.name.clone())],
            )
        })
        .collect();

    TableFormatter::new(COLUMNS, "item")
        .quiet(global.quiet)
        .output(&rows, format)
}

fn run_add(store: &mut ShopStore, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    // Validate everything before touching the list.
    let names = args
        .names
        .into_iter()
        .map(|name| require_text("Item name", Some(name)))
        .collect::<Result<Vec<_>>>()?;

    for name in names {
        let id = store.add(ShoppingItem::new(name.clone()));
        if global.format == OutputFormat::Id {
            println!("{}", id);
        } else {
            confirm(global, format_args!("Added {}", style(name).yellow()));
        }
    }
    Ok(())
}

fn run_check(store: &mut ShopStore, args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let ids = resolve_refs(&view, &args.references)?;

    let checked = !args.off;
    for id in &ids {
        ensure_found(store.set_checked(id, checked), "Item", id)?;
    }

    let verb = if checked { "Checked off" } else { "Unchecked" };
    confirm(global, format_args!("{} {} item(s)", verb, ids.len()));
    Ok(())
}

fn run_edit(store: &mut ShopStore, args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let id = resolve_ref(&view, &args.reference)?;
    let name = require_text("Item name", Some(args.name))?;

    ensure_found(store.modify(&id, |item| item.name = name.clone()), "Item", &id)?;
    confirm(global, format_args!("Renamed to {}", style(name).yellow()));
    Ok(())
}

fn run_rm(store: &mut ShopStore, args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let ids = resolve_refs(&view, &args.references)?;

    let removed = store.remove_ids(&ids);
    confirm(global, format_args!("Removed {} item(s)", removed));
    Ok(())
}

fn run_clear(store: &mut ShopStore, global: &GlobalOpts) {
    let removed = store.clear_checked();
    if removed == 0 {
        if !global.quiet {
            println!("{} Nothing crossed off", style("!").yellow());
        }
    } else {
        confirm(global, format_args!("Cleared {} checked item(s)", removed));
    }
}
