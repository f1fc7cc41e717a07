//! `sable pattern` command - Pattern and chart management

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
use crate::entities::Pattern;

type PatternStore = CollectionStore<Pattern, FileSlots>;

#[derive(Subcommand, Debug)]
pub enum PatternCommands {
    /// List patterns
    List(ListArgs),

    /// Add a pattern
    Add(AddArgs),

    /// Show one pattern
    Show(ShowArgs),

    /// Change fields of a pattern
    Edit(EditArgs),

    /// Remove patterns
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: SearchArgs,

    /// Only patterns kept at this location (case-insensitive)
    #[arg(long)]
    pub location: Option<String>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Pattern name
    #[arg(long)]
    pub name: Option<String>,

    /// Designer
    #[arg(long, short = 'D')]
    pub designer: Option<String>,

    /// Where the chart is kept (binder, PDF folder, ...)
    #[arg(long, short = 'l')]
    pub location: Option<String>,

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

    /// New designer
    #[arg(long, short = 'D')]
    pub designer: Option<String>,

    /// New location
    #[arg(long, short = 'l')]
    pub location: Option<String>,

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
    ColumnDef::new("designer", "DESIGNER", 20),
    ColumnDef::new("location", "LOCATION", 16),
    ColumnDef::new("details", "DETAILS", 24),
];

pub fn run(cmd: PatternCommands, global: &GlobalOpts) -> Result<()> {
    let stash = open_stash(global)?;
    let config = Config::load(Some(&stash));
    let mut store: PatternStore = stash.open();

    match cmd {
        PatternCommands::List(args) => run_list(&store, args, global, &config)?,
        PatternCommands::Add(args) => run_add(&mut store, args, global)?,
        PatternCommands::Show(args) => run_show(&store, args, global, &config)?,
        PatternCommands::Edit(args) => run_edit(&mut store, args, global)?,
        PatternCommands::Rm(args) => run_rm(&mut store, args, global)?,
    }

    flush(&mut store)
}

fn run_list(store: &PatternStore, args: ListArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let location = args.location.as_deref().map(str::to_lowercase);
    let mut view = store.filter(args.view.query()).retain(|p| {
        location
            .as_deref()
            .map_or(true, |loc| p.location.to_lowercase() == loc)
    });
    if let Some(limit) = args.limit {
        view.truncate(limit);
    }

    let format = effective_format(global, config, OutputFormat::Tsv);
    let records: Vec<&Pattern> = view.records().collect();
    if print_structured(&records, format)? {
        return Ok(());
    }

    if view.is_empty() {
        if !global.quiet {
            println!("No patterns found.");
            println!();
            println!("Add one with: {}", style("sable pattern add -i").yellow());
        }
        return Ok(());
    }

    let rows: Vec<TableRow> = view
        .iter()
        .map(|(pos, p)| {
            let details = if p.details.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(p.details.clone())
            };
            TableRow::new(
                pos,
                p.id.to_string(),
                vec![
                    CellValue::Text(p.name.clone()),
                    CellValue::Text(p.designer.clone()),
                    CellValue::Text(p.location.clone()),
                    details,
                ],
            )
        })
        .collect();

    TableFormatter::new(COLUMNS, "pattern")
        .quiet(global.quiet)
        .output(&rows, format)
}

fn run_add(store: &mut PatternStore, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let pattern = if args.interactive {
        let name = prompt_text("Name", args.name, true)?;
        let designer = prompt_text("Designer", args.designer, true)?;
        let location = prompt_text("Location", args.location, true)?;
        let details = prompt_text("Details", args.details, false)?;
        Pattern::new(name, designer, location, details)
    } else {
        Pattern::new(
            require_text("Name", args.name)?,
            require_text("Designer", args.designer)?,
            require_text("Location", args.location)?,
            args.details.unwrap_or_default().trim(),
        )
    };

    let name = pattern.name.clone();
    let id = store.add(pattern);

    if global.format == OutputFormat::Id {
        println!("{}", id);
    } else {
        confirm(
            global,
            format_args!("Added pattern {} as {}", style(name).yellow(), style(id.to_string()).cyan()),
        );
    }
    Ok(())
}

fn run_show(store: &PatternStore, args: ShowArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let view = store.filter(args.view.query());
    let id = resolve_ref(&view, &args.reference)?;
    let pattern = store
        .get(&id)
        .ok_or_else(|| miette::miette!("Pattern {} not found", id))?;

    let format = effective_format(global, config, OutputFormat::Auto);
    if print_structured(pattern, format)? {
        return Ok(());
    }
    if format == OutputFormat::Id {
        println!("{}", pattern.id);
        return Ok(());
    }

    print_details(
        pattern,
        &[
            ("Designer", pattern.designer.clone()),
            ("Location", pattern.location.clone()),
            ("Details", pattern.details.clone()),
        ],
    );
    Ok(())
}

fn run_edit(store: &mut PatternStore, args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let id = resolve_ref(&view, &args.reference)?;
    let mut edited = store
        .get(&id)
        .cloned()
        .ok_or_else(|| miette::miette!("Pattern {} not found", id))?;

    if args.name.is_none() && args.designer.is_none() && args.location.is_none() && args.details.is_none() {
        return Err(miette::miette!(
            "Nothing to change. Use --name, --designer, --location or --details"
        ));
    }

    if let Some(name) = args.name {
        edited.name = require_text("Name", Some(name))?;
    }
    if let Some(designer) = args.designer {
        edited.designer = require_text("Designer", Some(designer))?;
    }
    if let Some(location) = args.location {
        edited.location = require_text("Location", Some(location))?;
    }
    if let Some(details) = args.details {
        edited.details = details.trim().to_string();
    }

    let label = edited.name.clone();
    ensure_found(store.update(&id, edited), "Pattern", &id)?;
    confirm(global, format_args!("Updated pattern {}", style(label).yellow()));
    Ok(())
}

fn run_rm(store: &mut PatternStore, args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let view = store.filter(args.view.query());
    let ids = resolve_refs(&view, &args.references)?;

    let removed = store.remove_ids(&ids);
    confirm(global, format_args!("Removed {} pattern(s)", removed));
    Ok(())
}
