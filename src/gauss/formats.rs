//! Token formatters
//!
//! A formatter turns a token stream into text: highlighted HTML, a raw `kind<TAB>text` dump,
//! or JSON. Formatters are looked up by name through [`FormatterRegistry`].

pub mod html;
pub mod json;
pub mod raw;

pub use html::{escape_html, HtmlFormatter};
pub use json::JsonFormatter;
pub use raw::RawFormatter;

use crate::gauss::error::FormatError;
use crate::gauss::token::Token;
use std::collections::HashMap;

/// Trait for token formatters
///
/// # Examples
///
/// ```ignore
/// struct CountFormatter;
///
/// impl Formatter for CountFormatter {
///     fn name(&self) -> &str {
///         "count"
///     }
///
///     fn format(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
///         Ok(tokens.len().to_string())
///     }
/// }
/// ```
pub trait Formatter: Send + Sync {
    /// The name of this formatter (e.g., "html", "raw", "json")
    fn name(&self) -> &str;

    /// Optional description of this formatter
    fn description(&self) -> &str {
        ""
    }

    fn format(&self, tokens: &[Token<'_>]) -> Result<String, FormatError>;
}

/// Registry of token formatters
pub struct FormatterRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatterRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formatters
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatterNotFound(name.to_string()))
    }

    /// Check if a formatter exists
    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// List all available formatter names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Format tokens using the named formatter
    pub fn format(&self, tokens: &[Token<'_>], name: &str) -> Result<String, FormatError> {
        self.get(name)?.format(tokens)
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        Self::with_html(HtmlFormatter::default())
    }

    /// Default formatters, with a custom-configured HTML formatter.
    pub fn with_html(html: HtmlFormatter) -> Self {
        let mut registry = Self::new();
        registry.register(html);
        registry.register(RawFormatter);
        registry.register(JsonFormatter);
        registry
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
