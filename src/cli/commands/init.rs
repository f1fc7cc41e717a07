//! `sable init` command - Create a local stash

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::identity::RecordKind;
use crate::core::stash::{Stash, StashError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Reinitialize even if .sable/ already exists (saved data is kept)
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        if !global.quiet {
            println!(
                "{} Created directory {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    }

    let stash = if args.force {
        Stash::init_force(&path)
    } else {
        Stash::init(&path)
    };

    match stash {
        Ok(stash) => {
            tracing::debug!(dir = %stash.data_dir().display(), "initialized stash");
            if global.quiet {
                return Ok(());
            }
            println!(
                "{} Initialized stash at {}",
                style("✓").green(),
                style(stash.data_dir().display()).cyan()
            );
            println!();
            print_structure(&stash);
            println!();
            println!("Next steps:");
            println!(
                "  {} Browse the thread inventory",
                style("sable thread list").yellow()
            );
            println!(
                "  {} Record skeins you own",
                style("sable thread adjust @1 2").yellow()
            );
            println!(
                "  {} Start a shopping list",
                style("sable shop add \"tapestry needles\"").yellow()
            );
            Ok(())
        }
        Err(StashError::AlreadyExists(path)) => {
            println!(
                "{} Stash already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("sable init --force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

fn print_structure(stash: &Stash) {
    let slots = stash.slots();
    println!("  📄 {}", style("config.yaml").dim());
    for kind in RecordKind::all() {
        let path = slots.slot_path(kind.slot());
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let note = if path.exists() { "" } else { " (created on first use)" };
        println!("  📄 {}{}", style(file).dim(), style(note).dim());
    }
}
