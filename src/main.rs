use clap::Parser;
use miette::Result;
use sable::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global);

    match cli.command {
        Commands::Init(args) => sable::cli::commands::init::run(args, &global),
        Commands::Thread(cmd) => sable::cli::commands::thread::run(cmd, &global),
        Commands::Fabric(cmd) => sable::cli::commands::fabric::run(cmd, &global),
        Commands::Kit(cmd) => sable::cli::commands::kit::run(cmd, &global),
        Commands::Pattern(cmd) => sable::cli::commands::pattern::run(cmd, &global),
        Commands::Shop(cmd) => sable::cli::commands::shop::run(cmd, &global),
        Commands::Catalog(cmd) => sable::cli::commands::catalog::run(cmd, &global),
        Commands::Status(args) => sable::cli::commands::status::run(args, &global),
        Commands::Config(cmd) => sable::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => sable::cli::commands::completions::run(args),
    }
}

/// Diagnostics go to stderr so they never mix with piped output.
/// `SABLE_LOG` takes any `EnvFilter` directive and overrides the flags.
fn init_tracing(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_env("SABLE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if global.verbose {
            "sable=debug,warn"
        } else if global.quiet {
            "error"
        } else {
            "warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr).without_time())
        .init();
}
