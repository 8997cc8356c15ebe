//! JSON token dump.

use super::Formatter;
use crate::gauss::error::FormatError;
use crate::gauss::token::Token;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Token array as pretty-printed JSON"
    }

    fn format(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tokens).map_err(|err| FormatError::Serialization(err.to_string()))
    }
}
