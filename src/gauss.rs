//! Main module for GAUSS documentation tooling

pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod registry;
pub mod roles;
pub mod signature;
pub mod token;

pub use error::{FormatError, GaussDocError, RegistryError, RoleError, SignatureError};
pub use lexing::{analyse_text, tokenize, GaussLexer, LexerOptions, Tokens};
pub use registry::{Lexer, LexerRegistry};
pub use token::{Token, TokenKind};
