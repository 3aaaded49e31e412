//! Printing of pipeline reports in the selected output format.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;

use assetsync_core::{Message, Severity, SiteConfig};
use assetsync_renderer::{MessageFormat, Renderer};
use assetsync_sync::PipelineReport;

/// How `publish` and `refresh` print their result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Print `report` to stdout; warnings go to stderr.
pub fn print_report(
    report: &PipelineReport,
    format: OutputFormat,
    config: &SiteConfig,
) -> Result<()> {
    let message_format = match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
            println!("{json}");
            return Ok(());
        }
        OutputFormat::Text => MessageFormat::Text,
        OutputFormat::Html => MessageFormat::Html,
    };

    let renderer = Renderer::with_template_dir(config.template_dir.as_deref())
        .context("failed to load message templates")?;
    println!("{}", render(&renderer, &report.message, message_format)?);
    if let Some(warning) = &report.warning {
        eprintln!("{}", render(&renderer, warning, message_format)?);
    }
    Ok(())
}

fn render(renderer: &Renderer, message: &Message, format: MessageFormat) -> Result<String> {
    let body = renderer
        .render(message, format)
        .context("failed to render message")?;
    if format == MessageFormat::Html {
        return Ok(body);
    }
    Ok(match message.severity {
        Severity::Error => body.red().to_string(),
        Severity::Success => body.green().to_string(),
        Severity::Info => body.yellow().to_string(),
    })
}
