//! Placeholder substitution.

use serde_json::{Map, Value};

use super::Template;

/// Subject and body after substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    /// Rendered subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html: String,
}

/// Text substituted for a variable value.
///
/// Falsy values (`null`, `""`, `0`, `false`) become the empty string.
pub fn substitution(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Render `template` with `variables`.
///
/// Every `{{key}}` token for a key present in `variables` is replaced, in
/// the mapping's insertion order. Tokens without a matching key are kept
/// verbatim.
pub fn render(template: &Template, variables: &Map<String, Value>) -> RenderedTemplate {
    let mut subject = template.subject.to_string();
    let mut html = template.html.to_string();

    for (key, value) in variables {
        let token = format!("{{{{{key}}}}}");
        let replacement = substitution(value);
        subject = subject.replace(&token, &replacement);
        html = html.replace(&token, &replacement);
    }

    RenderedTemplate { subject, html }
}
