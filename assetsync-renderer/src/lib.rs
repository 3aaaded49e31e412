//! # assetsync-renderer
//!
//! Tera-based rendering of publish [`Message`](assetsync_core::Message)s as
//! plain text or as an HTML card panel.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use assetsync_core::{Message, Severity};
//! use assetsync_renderer::{MessageFormat, Renderer};
//!
//! fn show(message: &Message) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(html) = renderer.render(message, MessageFormat::Html) {
//!             println!("{html}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::MessageContext;
pub use engine::{MessageFormat, Renderer, TemplateEngine};
pub use error::RenderError;
