//! Built-in template table.

use super::{Result, Template, TemplateError};

/// All templates, in the order they are reported to callers.
pub static TEMPLATES: [Template; 4] = [
    Template {
        name: "welcome",
        subject: "Welcome to {{appName}}, {{name}}!",
        html: r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h1 style="color: #333;">Welcome, {{name}}!</h1>
  <p>Thanks for joining {{appName}}. Your account is ready to use.</p>
  <p><a href="{{loginUrl}}" style="background: #4f46e5; color: #fff; padding: 10px 20px; text-decoration: none; border-radius: 4px;">Get started</a></p>
  <p style="color: #888; font-size: 12px;">If you did not create this account, you can ignore this email.</p>
</div>"#,
    },
    Template {
        name: "art_submission",
        subject: "New art submission: {{artTitle}}",
        html: r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">New artwork submitted</h2>
  <p><strong>{{artistName}}</strong> submitted <em>{{artTitle}}</em>.</p>
  <blockquote style="border-left: 3px solid #ddd; padding-left: 12px; color: #555;">{{description}}</blockquote>
  <p><a href="{{submissionUrl}}">Review the submission</a></p>
</div>"#,
    },
    Template {
        name: "reset_password",
        subject: "Reset your password",
        html: r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">Password reset</h2>
  <p>Hi {{name}},</p>
  <p>We received a request to reset your password. Use the link below to choose a new one.</p>
  <p><a href="{{resetLink}}" style="background: #dc2626; color: #fff; padding: 10px 20px; text-decoration: none; border-radius: 4px;">Reset password</a></p>
  <p>This link expires in {{expiresIn}}.</p>
  <p style="color: #888; font-size: 12px;">If you did not request a reset, no action is needed.</p>
</div>"#,
    },
    Template {
        name: "notification",
        subject: "{{subject}}",
        html: r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">{{title}}</h2>
  <p>{{message}}</p>
  <p style="color: #888; font-size: 12px;">Sent by {{senderName}}</p>
</div>"#,
    },
];

/// Look up a template by exact, case-sensitive identifier.
pub fn find(name: &str) -> Result<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| TemplateError::NotFound(name.to_string()))
}

/// Identifiers of every registered template.
pub fn names() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.name).collect()
}
