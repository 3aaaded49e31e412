//! Tera rendering engine: [`MessageFormat`] enum and [`Renderer`].
//!
//! | Format | Template name          | Escaping |
//! |--------|------------------------|----------|
//! | Text   | `message/plain.txt`    | none     |
//! | Html   | `message/panel.html`   | HTML     |
//!
//! A user template directory may override either template by providing
//! `message/plain.txt.tera` or `message/panel.html.tera`.

use std::path::{Path, PathBuf};

use tera::Tera;
use walkdir::WalkDir;

use assetsync_core::Message;

use crate::context::MessageContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("message/plain.txt", include_str!("templates/plain.txt.tera")),
    ("message/panel.html", include_str!("templates/panel.html.tera")),
];

const TEMPLATE_EXT: &str = ".tera";

// ---------------------------------------------------------------------------
// Override loading
// ---------------------------------------------------------------------------

fn read_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

/// `message\Panel.HTML.tera` → `message/panel.html`
fn normalize_template_name(path: &Path) -> String {
    let name = path.to_string_lossy().replace('\\', "/").to_lowercase();
    match name.strip_suffix(TEMPLATE_EXT) {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    let mut found = Vec::new();
    if !dir.is_dir() {
        return Ok(found);
    }
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            read_err(path, std::io::Error::other(e.to_string()))
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !path.to_string_lossy().ends_with(TEMPLATE_EXT) {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path);
        let contents = std::fs::read_to_string(path).map_err(|e| read_err(path, e))?;
        found.push((normalize_template_name(rel), contents));
    }
    Ok(found)
}

/// Embedded templates first; overrides with the same name replace them.
fn build_tera(overrides: Option<&Path>) -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TPLS.iter().copied())?;
    if let Some(dir) = overrides {
        let user = load_user_templates(dir)?;
        if !user.is_empty() {
            tera.add_raw_templates(user)?;
        }
    }
    Ok(tera)
}

// ---------------------------------------------------------------------------
// MessageFormat
// ---------------------------------------------------------------------------

/// Output formats for a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageFormat {
    #[default]
    Text,
    Html,
}

impl MessageFormat {
    pub fn template_name(&self) -> &'static str {
        match self {
            MessageFormat::Text => "message/plain.txt",
            MessageFormat::Html => "message/panel.html",
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Compiled message templates.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(overrides: Option<&Path>) -> Result<Self, RenderError> {
        Ok(Self { tera: build_tera(overrides)? })
    }

    /// Render `ctx` with the template for `format`.
    ///
    /// Line endings are normalised to LF and trailing whitespace is trimmed.
    pub fn render(
        &self,
        ctx: &MessageContext,
        format: MessageFormat,
    ) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let content = self.tera.render(format.template_name(), &tera_ctx)?;
        Ok(content.replace("\r\n", "\n").trim_end().to_string())
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Message renderer. Create once and reuse.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(None)? })
    }

    /// Construct a [`Renderer`] whose templates may be overridden from `dir`.
    pub fn with_template_dir(dir: Option<&Path>) -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(dir)? })
    }

    pub fn render(&self, message: &Message, format: MessageFormat) -> Result<String, RenderError> {
        let ctx = MessageContext::from_message(message);
        self.engine.render(&ctx, format)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
