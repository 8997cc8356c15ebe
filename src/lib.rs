//! # gaussdoc
//!
//! Documentation tooling for the GAUSS language: a syntax-highlighting lexer, HTML rendering of
//! multi-return procedure signatures, and the `menuselection` inline role.
//!
//! The lexer lives in [gauss::lexing]. It converts source text into tokens that together cover
//! the input exactly; the [formatters](gauss::formats) turn those tokens into HTML, a raw dump
//! or JSON.

pub mod gauss;
