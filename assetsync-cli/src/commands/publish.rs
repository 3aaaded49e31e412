//! `assetsync publish <kind> <name>`

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use assetsync_core::{ComponentKind, ComponentName};
use assetsync_sync::Pipeline;

use crate::output::{print_report, OutputFormat};

/// Arguments for `assetsync publish`.
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Component kind: module | theme.
    pub kind: ComponentKind,

    /// Component name as registered (e.g. "blog").
    pub name: String,

    /// Output format for the result message.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PublishArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let config = crate::load_config(root)?;
        let name = ComponentName::from(self.name);
        if !name.is_valid() {
            bail!("invalid component name '{name}'");
        }

        let pipeline = Pipeline::from_config(&config);
        let kind = self.kind;
        let report = crate::block_on(pipeline.publish(kind.clone(), name.clone()))?;
        print_report(&report, self.format, &config)?;

        if !report.status {
            bail!("publishing {kind}/{name} failed");
        }
        Ok(())
    }
}
