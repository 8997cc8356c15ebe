//! HTML highlighting
//!
//! Wraps the token stream in `<div class="highlight"><pre>` and each token in a
//! `<span>` carrying the kind's short CSS class. Adjacent tokens of the same kind are merged
//! into one span and plain text is written without a span.

use super::Formatter;
use crate::gauss::error::FormatError;
use crate::gauss::token::{Token, TokenKind};
use serde::Deserialize;

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `[html]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HtmlConfig {
    /// Class of the wrapping `<div>`.
    pub css_class: String,
    /// Prefix prepended to every token class.
    #[serde(default)]
    pub class_prefix: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            css_class: "highlight".to_string(),
            class_prefix: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    config: HtmlConfig,
}

impl HtmlFormatter {
    pub fn new(config: HtmlConfig) -> Self {
        Self { config }
    }

    fn write_run(&self, out: &mut String, kind: TokenKind, text: &str) {
        let class = kind.css_class();
        if class.is_empty() {
            out.push_str(&escape_html(text));
            return;
        }
        out.push_str("<span class=\"");
        out.push_str(&escape_html(&self.config.class_prefix));
        out.push_str(class);
        out.push_str("\">");
        out.push_str(&escape_html(text));
        out.push_str("</span>");
    }
}

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Highlighted HTML with one span per token run"
    }

    fn format(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        let mut out = format!(
            "<div class=\"{}\"><pre><span></span>",
            escape_html(&self.config.css_class)
        );

        let mut run: Option<(TokenKind, String)> = None;
        for token in tokens {
            match run.as_mut() {
                Some((kind, text)) if *kind == token.kind => text.push_str(token.text),
                _ => {
                    if let Some((kind, text)) = run.take() {
                        self.write_run(&mut out, kind, &text);
                    }
                    run = Some((token.kind, token.text.to_string()));
                }
            }
        }
        if let Some((kind, text)) = run {
            self.write_run(&mut out, kind, &text);
        }

        out.push_str("</pre></div>\n");
        Ok(out)
    }
}
