//! `assetsync refresh`: republish every active module and theme.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use assetsync_sync::Pipeline;

use crate::output::{print_report, OutputFormat};

/// Arguments for `assetsync refresh`.
#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Output format for the result message.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl RefreshArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let config = crate::load_config(root)?;
        let pipeline = Pipeline::from_config(&config);
        let report = crate::block_on(pipeline.refresh_all())?;
        print_report(&report, self.format, &config)?;

        if !report.status {
            bail!("refresh finished with failures");
        }
        Ok(())
    }
}
