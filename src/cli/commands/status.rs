//! `sable status` command - Stash overview

use console::style;
use miette::Result;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{flush, open_stash, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::RecordKind;
use crate::core::slot::{FileSlots, SlotStorage};
use crate::core::store::CollectionStore;
use crate::core::Config;
use crate::entities::{Fabric, Kit, Pattern, ShoppingItem, Thread};

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// List the low-stock colors too
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreadMetrics {
    colors: usize,
    owned: usize,
    skeins: u64,
    spoken_for: usize,
    low_stock: usize,
    low_stock_threshold: u32,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShoppingMetrics {
    items: usize,
    pending: usize,
    checked: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StashStatus {
    data_dir: String,
    threads: ThreadMetrics,
    fabric: usize,
    fabric_square_inches: f64,
    kits: usize,
    patterns: usize,
    shopping: ShoppingMetrics,
}

fn thread_metrics<S: SlotStorage>(store: &CollectionStore<Thread, S>, low: u32) -> ThreadMetrics {
    let records = store.records();
    ThreadMetrics {
        colors: records.len(),
        owned: records.iter().filter(|t| t.quantity > 0).count(),
        skeins: store.total_skeins(),
        spoken_for: records.iter().filter(|t| t.spoken_for).count(),
        low_stock: records
            .iter()
            .filter(|t| t.quantity > 0 && t.quantity <= low)
            .count(),
        low_stock_threshold: low,
    }
}

fn shopping_metrics<S: SlotStorage>(store: &CollectionStore<ShoppingItem, S>) -> ShoppingMetrics {
    let checked = store.checked_positions().len();
    ShoppingMetrics {
        items: store.len(),
        pending: store.len() - checked,
        checked,
    }
}

pub fn run(args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let stash = open_stash(global)?;
    let config = Config::load(Some(&stash));
    let low = config.low_stock();

    let mut threads: CollectionStore<Thread, FileSlots> = stash.open();
    let mut fabric: CollectionStore<Fabric, FileSlots> = stash.open();
    let mut kits: CollectionStore<Kit, FileSlots> = stash.open();
    let mut patterns: CollectionStore<Pattern, FileSlots> = stash.open();
    let mut shopping: CollectionStore<ShoppingItem, FileSlots> = stash.open();

    let status = StashStatus {
        data_dir: stash.data_dir().display().to_string(),
        threads: thread_metrics(&threads, low),
        fabric: fabric.len(),
        fabric_square_inches: fabric.records().iter().map(Fabric::area).sum(),
        kits: kits.len(),
        patterns: patterns.len(),
        shopping: shopping_metrics(&shopping),
    };

    if !print_structured(&status, global.format)? {
        print_dashboard(&status, global);

        if args.detailed && status.threads.low_stock > 0 {
            println!();
            println!("{}", style("Low stock").bold());
            for t in threads
                .records()
                .iter()
                .filter(|t| t.quantity > 0 && t.quantity <= low)
            {
                println!("  {:<34} {}", t.color, style(t.quantity).yellow());
            }
        }
    }

    flush(&mut threads)?;
    flush(&mut fabric)?;
    flush(&mut kits)?;
    flush(&mut patterns)?;
    flush(&mut shopping)
}

fn print_dashboard(status: &StashStatus, global: &GlobalOpts) {
    if global.format == OutputFormat::Auto && !global.quiet {
        println!("{}", style("S.A.B.L.E Stash").bold().underlined());
        println!("{}", style(&status.data_dir).dim());
        println!();
    }

    let t = &status.threads;
    let mut builder = Builder::default();
    builder.push_record(["Collection", "Records", "Notes"]);
    builder.push_record([
        RecordKind::Thread.label().to_string(),
        t.owned.to_string(),
        format!(
            "{} skeins, {} spoken for, {} low (<= {}), {} catalog colors",
            t.skeins, t.spoken_for, t.low_stock, t.low_stock_threshold, t.colors
        ),
    ]);
    builder.push_record([
        RecordKind::Fabric.label().to_string(),
        status.fabric.to_string(),
        format!("{:.0} sq in", status.fabric_square_inches),
    ]);
    builder.push_record([
        RecordKind::Kit.label().to_string(),
        status.kits.to_string(),
        String::new(),
    ]);
    builder.push_record([
        RecordKind::Pattern.label().to_string(),
        status.patterns.to_string(),
        String::new(),
    ]);
    builder.push_record([
        RecordKind::Shopping.label().to_string(),
        status.shopping.items.to_string(),
        format!(
            "{} to buy, {} checked off",
            status.shopping.pending, status.shopping.checked
        ),
    ]);

    let mut table = builder.build();
    if global.format == OutputFormat::Md {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::MemorySlots;

    #[test]
    fn test_thread_metrics_counts_stock() {
        let mut store: CollectionStore<Thread, MemorySlots> =
            CollectionStore::open(MemorySlots::new());
        let a = store.records()[0].id.clone();
        let b = store.records()[1].id.clone();
        store.set_quantity(&a, 1);
        store.set_quantity(&b, 4);
        store.set_spoken_for(&b, true);

        let m = thread_metrics(&store, 1);
        assert_eq!(m.colors, store.len());
        assert_eq!(m.owned, 2);
        assert_eq!(m.skeins, 5);
        assert_eq!(m.spoken_for, 1);
        assert_eq!(m.low_stock, 1);
    }

    #[test]
    fn test_shopping_metrics() {
        let mut store: CollectionStore<ShoppingItem, MemorySlots> =
            CollectionStore::open(MemorySlots::new());
        let first = store.add(ShoppingItem::new("needles"));
        store.add(ShoppingItem::new("hoop"));
        store.toggle_checked(&first);

        let m = shopping_metrics(&store);
        assert_eq!(m.items, 2);
        assert_eq!(m.pending, 1);
        assert_eq!(m.checked, 1);
    }
}
