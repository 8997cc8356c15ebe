//! Error types for the host-side surfaces: registries, formatters, roles and signatures.
//!
//! Tokenization itself never fails, so nothing here is raised by the lexer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no lexer named '{0}'")]
    LexerNotFound(String),

    #[error("no lexer registered for filename '{0}'")]
    NoLexerForFilename(String),

    #[error("no lexer registered for mimetype '{0}'")]
    NoLexerForMimetype(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("formatter '{0}' not found")]
    FormatterNotFound(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("unknown interpreted text role '{0}'")]
    UnknownRole(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature has no function name")]
    MissingName,

    #[error("unbalanced '{0}' in signature")]
    Unbalanced(char),
}

/// Umbrella error for the command-line front end.
#[derive(Debug, Error)]
pub enum GaussDocError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
