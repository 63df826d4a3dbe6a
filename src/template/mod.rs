//! Email templates.
//!
//! A fixed registry of subject/body pairs containing `{{key}}` placeholders,
//! and a renderer that substitutes per-request variables into them.
//!
//! # Example
//!
//! ```
//! use mail_relay::template::{find, render};
//! use serde_json::json;
//!
//! let template = find("notification").unwrap();
//! let vars = json!({"subject": "Hi", "title": "T", "message": "M", "senderName": "S"});
//! let rendered = render(template, vars.as_object().unwrap());
//! assert_eq!(rendered.subject, "Hi");
//! assert!(!rendered.html.contains("{{"));
//! ```

mod registry;
mod renderer;

use thiserror::Error;

pub use registry::{find, names, TEMPLATES};
pub use renderer::{render, substitution, RenderedTemplate};

/// A registered email template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Identifier used by callers.
    pub name: &'static str,
    /// Subject line pattern.
    pub subject: &'static str,
    /// HTML body pattern.
    pub html: &'static str,
}

/// Template-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// No template with the given identifier.
    #[error("template not found: {0}")]
    NotFound(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
