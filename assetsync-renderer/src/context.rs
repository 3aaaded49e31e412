//! Template context: serializable rendering payload built from a [`Message`].

use serde::{Deserialize, Serialize};

use assetsync_core::{Message, Severity};

use crate::error::RenderError;

/// Flat payload handed to the message templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContext {
    pub title: String,
    pub detail: Vec<String>,
    /// `error`, `success`, or `info`.
    pub severity: String,
    /// Panel CSS modifier: `danger` for errors, otherwise the severity name.
    pub css_class: String,
}

impl MessageContext {
    pub fn from_message(message: &Message) -> Self {
        Self {
            title: message.title.clone(),
            detail: message.detail.clone(),
            severity: message.severity.to_string(),
            css_class: css_class(message.severity).to_string(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        let value = serde_json::to_value(self)?;
        Ok(tera::Context::from_value(value)?)
    }
}

fn css_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "danger",
        Severity::Success => "success",
        Severity::Info => "info",
    }
}
