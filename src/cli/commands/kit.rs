//! `sable kit` command - Project kit management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{
    confirm, effective_format, ensure_found, flush, open_stash, print_details, print_structured,
    prompt_text, require_text, resolve_ref, resolve_refs, SearchArgs,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::slot::FileSlots;
use crate::core::store::CollectionStore;
use crate::core::Config;
use crate::entities::Kit;

type KitStore = CollectionStore<Kit, FileSlots>;

#[derive(Subcommand, Debug)]
pub enum KitCommands {
    /// List kits
    List(ListArgs),

    /// Add a kit
    Add(AddArgs),

    /// Show one kit
    Show(ShowArgs),

    /// Change fields of a kit
    Edit(EditArgs),

    /// Remove kits
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: SearchArgs,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Kit name
    #[arg(long)]
    pub name: Option<String>,

    /// Finished size (e.g. "8x10 inches")
    #[arg(long)]
    pub size: Option<String>,

    /// Estimated stitching time (e.g. "20 hours")
    #[arg(long, short = 't')]
    pub estimated_time: Option<String>,

    /// Notes
    #[arg(long, short = 'd')]
    pub details: Option<String>,

    /// Prompt for each field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Position (@N) or ID
    pub reference: String,

    #[command(flatten)]
    pub view: SearchArgs,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Position (@N) or ID
    pub reference: String,

    #[command(flatten)]
    pub view: SearchArgs,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New finished size
    #[arg(long)]
    pub size: Option<String>,

    /// New time estimate
    #[arg(long, short = 't')]
    pub estimated_time: Option<String>,

    /// New notes (empty string clears them)
    #[arg(long, short = 'd')]
    pub details: Option<String>,
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
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("size", "SIZE", 14),
    ColumnDef::new("estimatedTime", "TIME", 12),
    ColumnDef::new("details", "DETAILS", 30),
];

pub fn run(cmd: KitCommands, global: &GlobalOpts) -> Result<()> {
    let stash = open_stash(global)?;
    let config = Config::load(Some(&stash));
    let mut store: KitStore = stash.open();

    match cmd {
        KitCommands::List(args) => run_list(&store, args, global, &config)?,
        KitCommands::Add(args) => run_add(&mut store, args, global)?,
        KitCommands::Show(args) => run_show(&store, args, global, &config)?,
        KitCommands::Edit(args) => run_edit(&mut store, args, global)?,
        KitCommands::Rm(args) => run_rm(&mut store, args, global)?,
    }

    flush(&mut store)
}

fn run_list(store: &KitStore, args: ListArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let mut view = store.filter(args.view.query());
    if let Some(limit) = args.limit {
        view.truncate(limit);
    }

    let format = effective_format(global, config, OutputFormat::Tsv);
    let records: Vec<&Kit> = view.records().collect();
    if print_structured(&records, format)? {
        return Ok(());
    }

    if view.is_empty() {
        if !global.quiet {
            println!("No kits found.");
            println!();
            println!("Add one with: {}", style("sable kit add -i").yellow());
        }
        return Ok(());
    }

    let rows: Vec<TableRow> = view
        .iter()
        .map(|(pos, k)| {
            let details = if k.details.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(k.details.clone())
            };
            TableRow::new(
                pos,
                k.id.to_string(),
                vec![
                    CellValue::Text(k.name.clone()),
                    CellValue::Text(k.size.clone()),
                    CellValue::Text(k.estimated_time.clone()),
                    details,
                ],
            )
        })
        .collect();

    TableFormatter::new(COLUMNS, "kit")
        .quiet(global.quiet)
        .output(&rows, format)
}

fn run_add(store: &mut KitStore, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let kit = if args.interactive {
        let name = prompt_text("Name", args.name, true)?;
        let size = prompt_text("Size", args.size, true)?;
        let estimated_time = prompt_text("Estimated time", args.estimated_time, true)?;
        let details = prompt_text("Details", args.details, false)?;
        Kit::new(name, size, estimated_time, details)
    } else {
        Kit::new(
            require_text("Name", args.name)?,
            require_text("Size", args.size)?,
            require_text("Estimated time", args.estimated_time)?,
            args.details.unwrap_or_default().trim(),
        )
    };

    let name = kit.name.clone();
    let id = store.add(kit);

    if global.format == OutputFormat::Id {
        println!("{}", id);
    } else {
        confirm(
            global,
            format_args!("Added kit {} as {}", style(name).yellow(), style(id.to_string()).cyan()),
        );
    }
    Ok(())
}

fn run_show(store: &KitStore, args: ShowArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let view = store.filter(args.view.query());
    let id = resolve_ref(&view, &args.reference)?;
    let kit = store
        .get(&id)
        .ok_or_else(|| miette::miette!("Kit {} not found", id))?;

    let format = effective_format(global, config, OutputFormat::Auto);
    if print_structured(kit, format)? {
        return Ok(());
    }
    if format == OutputFormat::Id {
        println!("{}", kit.id);
        return Ok(());
    }

    print_details(
        kit,
        &[
            ("Size", kit.size.clone()),
            ("Estimated time", kit.estimated_time.clone()),
            ("Details", kit.details.clone()),
        ],
    );
    Ok(())
}

fn run_edit(store: &mut KitStore, args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let id = resolve_ref(&view, &args.reference)?;
    let mut edited = store
        .get(&id)
        .cloned()
        .ok_or_else(|| miette::miette!("Kit {} not found", id))?;

    if args.name.is_none() && args.size.is_none() && args.estimated_time.is_none() && args.details.is_none() {
        return Err(miette::miette!(
            "Nothing to change. Use --name, --size, --estimated-time or --details"
        ));
    }

    if let Some(name) = args.name {
        edited.name = require_text("Name", Some(name))?;
    }
    if let Some(size) = args.size {
        edited.size = require_text("Size", Some(size))?;
    }
    if let Some(estimated_time) = args.estimated_time {
        edited.estimated_time = require_text("Estimated time", Some(estimated_time))?;
    }
    if let Some(details) = args.details {
        edited.details = details.trim().to_string();
    }

    let label = edited.name.clone();
    ensure_found(store.update(&id, edited), "Kit", &id)?;
    confirm(global, format_args!("Updated kit {}", style(label).yellow()));
    Ok(())
}

fn run_rm(store: &mut KitStore, args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let ids = resolve_refs(&view, &args.references)?;

    let removed = store.remove_ids(&ids);
    confirm(global, format_args!("Removed {} kit(s)", removed));
    Ok(())
}
