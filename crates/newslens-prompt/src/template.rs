//! MiniJinja-based template implementation
//!
//! [`JinjaTemplate`] wraps a single named MiniJinja template source and renders
//! it with JSON variables. Templates are compiled eagerly at construction so a
//! bad source fails at startup rather than mid-request.

use crate::{PromptError, Result};
use minijinja::Environment;

/// A named prompt template backed by MiniJinja
///
/// # Template Syntax
///
/// Standard Jinja2 syntax:
/// - Variables: `{{ variable }}`
/// - Filters: `{{ name | upper }}`
/// - Conditionals: `{% if condition %}...{% endif %}`
/// - Loops: `{% for item in items %}...{% endfor %}`
///
/// # Examples
///
/// ```
/// use newslens_prompt::JinjaTemplate;
/// use serde_json::json;
///
/// let template = JinjaTemplate::new("greeting", "Hello, {{ name }}!").unwrap();
/// let result = template.render(&json!({ "name": "World" })).unwrap();
/// assert_eq!(result, "Hello, World!");
/// ```
pub struct JinjaTemplate {
    name: String,
    source: String,
}

impl JinjaTemplate {
    /// Create a template from a name and source string
    ///
    /// Returns `PromptError::CompileError` if the source is not valid Jinja.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();

        // Compile once up front to reject bad syntax early
        let mut env = Environment::new();
        env.add_template("probe", &source)
            .map_err(|e| PromptError::CompileError {
                name: name.clone(),
                detail: e.to_string(),
            })?;

        Ok(Self { name, source })
    }

    /// Get the template name/identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw template source (for debugging/inspection)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template with the given JSON variables
    pub fn render(&self, vars: &serde_json::Value) -> Result<String> {
        // Fresh environment per render to avoid lifetime issues
        let mut env = Environment::new();

        env.add_filter("upper", |s: String| s.to_uppercase());
        env.add_filter("lower", |s: String| s.to_lowercase());
        env.add_filter("trim", |s: String| s.trim().to_string());

        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(&self.source, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}
