//! `sable fabric` command - Fabric stock management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{
    confirm, effective_format, ensure_found, flush, open_stash, print_details, print_structured,
    prompt_text, prompt_value, require_positive, require_text, resolve_ref, resolve_refs,
    SearchArgs,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::slot::FileSlots;
use crate::core::store::CollectionStore;
use crate::core::Config;
use crate::entities::Fabric;

type FabricStore = CollectionStore<Fabric, FileSlots>;

#[derive(Subcommand, Debug)]
pub enum FabricCommands {
    /// List fabric pieces
    List(ListArgs),

    /// Add a fabric piece
    Add(AddArgs),

    /// Show one fabric piece
    Show(ShowArgs),

    /// Change fields of a fabric piece
    Edit(EditArgs),

    /// Remove fabric pieces
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: SearchArgs,

    /// Only fabric of this count
    #[arg(long)]
    pub count: Option<u32>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Stitches per inch (e.g. 14, 18, 28)
    #[arg(long)]
    pub count: Option<u32>,

    /// Length in inches
    #[arg(long, short = 'l')]
    pub length: Option<f64>,

    /// Width in inches
    #[arg(long, short = 'w')]
    pub width: Option<f64>,

    /// Color description
    #[arg(long, short = 'c')]
    pub color: Option<String>,

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

    /// New count
    #[arg(long)]
    pub count: Option<u32>,

    /// New length in inches
    #[arg(long, short = 'l')]
    pub length: Option<f64>,

    /// New width in inches
    #[arg(long, short = 'w')]
    pub width: Option<f64>,

    /// New color
    #[arg(long, short = 'c')]
    pub color: Option<String>,
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
    ColumnDef::new("color", "COLOR", 24),
    ColumnDef::new("count", "COUNT", 6),
    ColumnDef::new("length", "LENGTH", 8),
    ColumnDef::new("width", "WIDTH", 8),
    ColumnDef::new("area", "SQ IN", 9),
];

pub fn run(cmd: FabricCommands, global: &GlobalOpts) -> Result<()> {
    let stash = open_stash(global)?;
    let config = Config::load(Some(&stash));
    let mut store: FabricStore = stash.open();

    match cmd {
        FabricCommands::List(args) => run_list(&store, args, global, &config)?,
        FabricCommands::Add(args) => run_add(&mut store, args, global)?,
        FabricCommands::Show(args) => run_show(&store, args, global, &config)?,
        FabricCommands::Edit(args) => run_edit(&mut store, args, global)?,
        FabricCommands::Rm(args) => run_rm(&mut store, args, global)?,
    }

    flush(&mut store)
}

fn run_list(store: &FabricStore, args: ListArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let mut view = store
        .filter(args.view.query())
        .retain(|f| args.count.map_or(true, |count| f.count == count));
    if let Some(limit) = args.limit {
        view.truncate(limit);
    }

    let format = effective_format(global, config, OutputFormat::Tsv);
    let records: Vec<&Fabric> = view.records().collect();
    if print_structured(&records, format)? {
        return Ok(());
    }

    if view.is_empty() {
        if !global.quiet {
            println!("No fabric found.");
            println!();
            println!(
                "Add some with: {}",
                style("sable fabric add --count 14 --length 18 --width 22 --color white").yellow()
            );
        }
        return Ok(());
    }

    let rows: Vec<TableRow> = view
        .iter()
        .map(|(pos, f)| {
            TableRow::new(
                pos,
                f.id.to_string(),
                vec![
                    CellValue::Text(f.color.clone()),
                    CellValue::Number(i64::from(f.count)),
                    CellValue::Float(f.length, 1),
                    CellValue::Float(f.width, 1),
                    CellValue::Float(f.area(), 0),
                ],
            )
        })
        .collect();

    TableFormatter::new(COLUMNS, "fabric")
        .quiet(global.quiet)
        .output(&rows, format)
}

fn run_add(store: &mut FabricStore, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let (count, length, width, color) = if args.interactive {
        let count: u32 = prompt_value("Count (stitches per inch)", args.count.or(Some(14)))?;
        let length: f64 = prompt_value("Length (inches)", args.length)?;
        let width: f64 = prompt_value("Width (inches)", args.width)?;
        let color = prompt_text("Color", args.color, true)?;
        (count, length, width, color)
    } else {
        let count = args
            .count
            .ok_or_else(|| miette::miette!("Count is required (use --count N)"))?;
        let length = args
            .length
            .ok_or_else(|| miette::miette!("Length is required (use --length INCHES)"))?;
        let width = args
            .width
            .ok_or_else(|| miette::miette!("Width is required (use --width INCHES)"))?;
        (count, length, width, require_text("Color", args.color)?)
    };

    if count == 0 {
        return Err(miette::miette!("Count must be at least 1"));
    }
    let length = require_positive("Length", length)?;
    let width = require_positive("Width", width)?;

    let fabric = Fabric::new(count, length, width, color);
    let label = format!("{}-count {}", fabric.count, fabric.color);
    let id = store.add(fabric);

    if global.format == OutputFormat::Id {
        println!("{}", id);
    } else {
        confirm(
            global,
            format_args!("Added {} as {}", style(label).yellow(), style(id.to_string()).cyan()),
        );
    }
    Ok(())
}

fn run_show(store: &FabricStore, args: ShowArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let view = store.filter(args.view.query());
    let id = resolve_ref(&view, &args.reference)?;
    let fabric = store
        .get(&id)
        .ok_or_else(|| miette::miette!("Fabric {} not found", id))?;

    let format = effective_format(global, config, OutputFormat::Auto);
    if print_structured(fabric, format)? {
        return Ok(());
    }
    if format == OutputFormat::Id {
        println!("{}", fabric.id);
        return Ok(());
    }

    print_details(
        fabric,
        &[
            ("Count", fabric.count.to_string()),
            ("Length", format!("{} in", fabric.length)),
            ("Width", format!("{} in", fabric.width)),
            ("Area", format!("{:.1} sq in", fabric.area())),
        ],
    );
    Ok(())
}

fn run_edit(store: &mut FabricStore, args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let id = resolve_ref(&view, &args.reference)?;
    let mut edited = store
        .get(&id)
        .cloned()
        .ok_or_else(|| miette::miette!("Fabric {} not found", id))?;

    if args.count.is_none() && args.length.is_none() && args.width.is_none() && args.color.is_none() {
        return Err(miette::miette!(
            "Nothing to change. Use --count, --length, --width or --color"
        ));
    }

    if let Some(count) = args.count {
        if count == 0 {
            return Err(miette::miette!("Count must be at least 1"));
        }
        edited.count = count;
    }
    if let Some(length) = args.length {
        edited.length = require_positive("Length", length)?;
    }
    if let Some(width) = args.width {
        edited.width = require_positive("Width", width)?;
    }
    if let Some(color) = args.color {
        edited.color = require_text("Color", Some(color))?;
    }

    let label = edited.color.clone();
    ensure_found(store.update(&id, edited), "Fabric", &id)?;
    confirm(global, format_args!("Updated {}", style(label).yellow()));
    Ok(())
}

fn run_rm(store: &mut FabricStore, args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let ids = resolve_refs(&view, &args.references)?;

    let removed = store.remove_ids(&ids);
    confirm(global, format_args!("Removed {} fabric piece(s)", removed));
    Ok(())
}
