//! Raw token dump: one `Token.<Kind>\t"<text>"` line per token.

use super::Formatter;
use crate::gauss::error::FormatError;
use crate::gauss::token::Token;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn name(&self) -> &str {
        "raw"
    }

    fn description(&self) -> &str {
        "One line per token with its kind and quoted text"
    }

    fn format(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        let mut out = String::new();
        for token in tokens {
            writeln!(out, "Token.{}\t{:?}", token.kind, token.text)
                .map_err(|err| FormatError::Serialization(err.to_string()))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauss::lexing::tokenize;

    #[test]
    fn test_raw_lines() {
        let tokens: Vec<_> = tokenize("for i\n").collect();
        let raw = RawFormatter.format(&tokens).unwrap();
        assert_eq!(
            raw,
            "Token.Keyword\t\"for\"\nToken.Text.Whitespace\t\" \"\nToken.Name\t\"i\"\nToken.Text\t\"\\n\"\n"
        );
    }
}
