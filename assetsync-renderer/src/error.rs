//! Errors raised while turning a [`Message`](assetsync_core::Message) into text or HTML.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A message template failed to parse or render.
    #[error("message template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("could not build message context: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A template override could not be read.
    #[error("failed to read template override {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
