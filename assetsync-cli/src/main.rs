//! assetsync: publish component assets into a site's public tree.
//!
//! # Usage
//!
//! ```text
//! assetsync [--root <dir>] [-v...] list [--all] [--json]
//! assetsync publish <kind> <name> [--format text|html|json]
//! assetsync refresh [--format text|html|json]
//! assetsync component add <kind> <name> [--title <title>]
//! assetsync component enable|disable|remove <kind> <name>
//! ```

mod commands;
mod output;

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use assetsync_core::{config, SiteConfig};
use commands::{
    component::ComponentCommand, list::ListArgs, publish::PublishArgs, refresh::RefreshArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "assetsync",
    version,
    about = "Publish module and theme assets into a site's public directory",
    long_about = None,
)]
struct Cli {
    /// Site root containing assetsync.yaml (defaults to the current directory).
    #[arg(long, short = 'C', global = true, default_value = ".")]
    root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered modules and themes.
    List(ListArgs),

    /// Remove and republish the assets of one component.
    Publish(PublishArgs),

    /// Republish every active module and theme and clear compiled assets.
    Refresh(RefreshArgs),

    /// Manage the component registry.
    Component {
        #[command(subcommand)]
        command: ComponentCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load `<root>/assetsync.yaml` (or defaults) with paths resolved against `root`.
pub(crate) fn load_config(root: &Path) -> Result<SiteConfig> {
    config::load_at(root)
        .with_context(|| format!("failed to load site config under '{}'", root.display()))
}

/// Drive `future` to completion on a fresh multi-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let root = cli.root;
    match cli.command {
        Commands::List(args) => args.run(&root),
        Commands::Publish(args) => args.run(&root),
        Commands::Refresh(args) => args.run(&root),
        Commands::Component { command } => commands::component::run(command, &root),
    }
}
