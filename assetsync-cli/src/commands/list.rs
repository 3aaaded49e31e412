//! `assetsync list`: registered components per kind.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use assetsync_core::{registry, ComponentKind, ComponentRecord};

/// Arguments for `assetsync list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include disabled components.
    #[arg(long)]
    pub all: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "active")]
    active: String,
    #[tabled(rename = "registered")]
    registered: String,
}

impl ListArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let config = crate::load_config(root)?;

        let mut by_kind: BTreeMap<String, Vec<ComponentRecord>> = BTreeMap::new();
        for kind in ComponentKind::refreshable() {
            let mut records = registry::list_records_at(&config.registry_dir, kind).context(
                "failed to read registry; add a component with `assetsync component add` first",
            )?;
            if !self.all {
                records.retain(|r| r.active);
            }
            by_kind.insert(kind.to_string(), records);
        }

        if self.json {
            let json =
                serde_json::to_string_pretty(&by_kind).context("failed to serialize registry")?;
            println!("{json}");
            return Ok(());
        }

        let rows: Vec<ComponentRow> = by_kind
            .iter()
            .flat_map(|(kind, records)| {
                records.iter().map(move |r| ComponentRow {
                    kind: kind.clone(),
                    name: r.name.to_string(),
                    title: r.display_title().to_string(),
                    active: if r.active { "yes".into() } else { "no".into() },
                    registered: r.registered_at.format("%Y-%m-%d %H:%M").to_string(),
                })
            })
            .collect();

        if rows.is_empty() {
            println!("{}", "No components registered.".yellow());
            println!("Run: assetsync component add <kind> <name>");
            return Ok(());
        }

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
