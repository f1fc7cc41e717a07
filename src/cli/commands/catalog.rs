//! `sable catalog` command - Browse the DMC reference palette

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{print_structured, SearchArgs};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::{self, display_color, CatalogEntry};

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List palette entries
    List(ListArgs),

    /// Show the display swatch for a color name or catalog number
    Color(ColorArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: SearchArgs,

    /// Show count only, not the entries
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ColorArgs {
    /// Catalog number (e.g. 321) or color name (e.g. "Blue Very Dark")
    pub name: String,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("swatch", "SWATCH", 10),
    ColumnDef::new("number", "NUMBER", 8),
    ColumnDef::new("name", "NAME", 34),
];

#[derive(serde::Serialize)]
struct EntryOut<'a> {
    number: &'a str,
    name: &'a str,
    color: String,
    swatch: String,
}

impl<'a> From<&'a CatalogEntry> for EntryOut<'a> {
    fn from(entry: &'a CatalogEntry) -> Self {
        Self {
            number: entry.number,
            name: entry.name,
            color: entry.composite(),
            swatch: display_color(entry.name).to_string(),
        }
    }
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::List(args) => run_list(args, global),
        CatalogCommands::Color(args) => run_color(args, global),
    }
}

fn matching(query: &str) -> Vec<&'static CatalogEntry> {
    let needle = query.to_lowercase();
    catalog::entries()
        .iter()
        .filter(|e| needle.is_empty() || e.composite().to_lowercase().contains(&needle))
        .collect()
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let entries = matching(args.view.query());

    if args.count {
        println!("{}", entries.len());
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };
    let out: Vec<EntryOut<'_>> = entries.iter().copied().map(EntryOut::from).collect();
    if print_structured(&out, format)? {
        return Ok(());
    }

    let rows: Vec<TableRow> = entries
        .iter()
        .enumerate()
        .map(|(pos, e)| {
            TableRow::new(
                pos,
                e.composite(),
                vec![
                    CellValue::Swatch(display_color(e.name)),
                    CellValue::Text(e.number.to_string()),
                    CellValue::Text(e.name.to_string()),
                ],
            )
        })
        .collect();

    TableFormatter::new(COLUMNS, "color")
        .quiet(global.quiet)
        .output(&rows, format)
}

fn run_color(args: ColorArgs, global: &GlobalOpts) -> Result<()> {
    let (label, name) = match catalog::lookup(&args.name) {
        Some(entry) => (entry.composite(), entry.name.to_string()),
        None => (args.name.clone(), args.name.clone()),
    };
    let rgb = display_color(&name);

    match global.format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let out = serde_json::json!({ "color": label, "swatch": rgb.to_string() });
            print_structured(&out, global.format)?;
        }
        _ if global.quiet => println!("{}", rgb),
        _ => println!(
            "{} {}  {}",
            CellValue::Swatch(rgb).format_tsv(10),
            style(label).yellow(),
            style("(approximate)").dim()
        ),
    }
    Ok(())
}
