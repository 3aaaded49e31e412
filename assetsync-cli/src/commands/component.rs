//! `assetsync component add|enable|disable|remove`

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use assetsync_core::{registry, ComponentKind, ComponentName};

/// Manage the component registry.
#[derive(Subcommand, Debug)]
pub enum ComponentCommand {
    /// Register a component as active.
    Add(AddArgs),

    /// Re-activate a disabled component.
    Enable(TargetArgs),

    /// Keep a component registered but skip it on refresh.
    Disable(TargetArgs),

    /// Drop a component from the registry. Published files are kept.
    Remove(TargetArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Human-readable title shown by `assetsync list`.
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Component kind: module | theme.
    pub kind: ComponentKind,

    /// Component name (e.g. "blog").
    pub name: String,
}

pub fn run(cmd: ComponentCommand, root: &Path) -> Result<()> {
    let config = crate::load_config(root)?;
    let dir = config.registry_dir.as_path();

    match cmd {
        ComponentCommand::Add(args) => {
            let TargetArgs { kind, name } = args.target;
            let component_name = ComponentName::from(name.clone());
            let record = registry::register_at(dir, &kind, component_name, args.title)
                .with_context(|| format!("failed to register {kind}/{name}"))?;
            println!("{} Registered {kind}/{}", "✓".green(), record.name);
        }
        ComponentCommand::Enable(target) => set_active(dir, target, true)?,
        ComponentCommand::Disable(target) => set_active(dir, target, false)?,
        ComponentCommand::Remove(TargetArgs { kind, name }) => {
            let name = ComponentName::from(name);
            registry::unregister_at(dir, &kind, &name)
                .with_context(|| format!("failed to remove {kind}/{name}"))?;
            println!("{} Removed {kind}/{name}", "✓".green());
        }
    }
    Ok(())
}

fn set_active(dir: &Path, target: TargetArgs, active: bool) -> Result<()> {
    let TargetArgs { kind, name } = target;
    let name = ComponentName::from(name);
    registry::set_active_at(dir, &kind, &name, active)
        .with_context(|| format!("failed to update {kind}/{name}"))?;
    let verb = if active { "Enabled" } else { "Disabled" };
    println!("{} {verb} {kind}/{name}", "✓".green());
    Ok(())
}
