//! Token types produced by the GAUSS lexer.
//!
//!     The lexer classifies every character of its input into a [`Token`]. Kinds form a small
//!     closed hierarchy (`Comment.Preproc` is a `Comment`, `Name.Function` is a `Name`, ...) so
//!     formatters can style a whole family at once while still telling leaves apart.
//!
//!     Tokens borrow their lexeme from the source buffer. The byte span is kept next to the text
//!     so callers can map a token back into the original file without recounting.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// Classification tag for a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    Whitespace,
    Error,
    Keyword,
    KeywordDeclaration,
    Name,
    NameFunction,
    NameClass,
    NameLabel,
    NameAttribute,
    Literal,
    String,
    StringEscape,
    NumberInteger,
    NumberFloat,
    NumberHex,
    Operator,
    OperatorWord,
    Punctuation,
    Comment,
    CommentSingle,
    CommentMultiline,
    CommentPreproc,
    CommentPreprocFile,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 24] = [
        TokenKind::Text,
        TokenKind::Whitespace,
        TokenKind::Error,
        TokenKind::Keyword,
        TokenKind::KeywordDeclaration,
        TokenKind::Name,
        TokenKind::NameFunction,
        TokenKind::NameClass,
        TokenKind::NameLabel,
        TokenKind::NameAttribute,
        TokenKind::Literal,
        TokenKind::String,
        TokenKind::StringEscape,
        TokenKind::NumberInteger,
        TokenKind::NumberFloat,
        TokenKind::NumberHex,
        TokenKind::Operator,
        TokenKind::OperatorWord,
        TokenKind::Punctuation,
        TokenKind::Comment,
        TokenKind::CommentSingle,
        TokenKind::CommentMultiline,
        TokenKind::CommentPreproc,
        TokenKind::CommentPreprocFile,
    ];

    /// Dotted display name, e.g. `Comment.PreprocFile`.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Text => "Text",
            TokenKind::Whitespace => "Text.Whitespace",
            TokenKind::Error => "Error",
            TokenKind::Keyword => "Keyword",
            TokenKind::KeywordDeclaration => "Keyword.Declaration",
            TokenKind::Name => "Name",
            TokenKind::NameFunction => "Name.Function",
            TokenKind::NameClass => "Name.Class",
            TokenKind::NameLabel => "Name.Label",
            TokenKind::NameAttribute => "Name.Attribute",
            TokenKind::Literal => "Literal",
            TokenKind::String => "Literal.String",
            TokenKind::StringEscape => "Literal.String.Escape",
            TokenKind::NumberInteger => "Literal.Number.Integer",
            TokenKind::NumberFloat => "Literal.Number.Float",
            TokenKind::NumberHex => "Literal.Number.Hex",
            TokenKind::Operator => "Operator",
            TokenKind::OperatorWord => "Operator.Word",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Comment => "Comment",
            TokenKind::CommentSingle => "Comment.Single",
            TokenKind::CommentMultiline => "Comment.Multiline",
            TokenKind::CommentPreproc => "Comment.Preproc",
            TokenKind::CommentPreprocFile => "Comment.PreprocFile",
        }
    }

    /// Immediate parent in the kind hierarchy. Top-level kinds return `None`.
    pub fn parent(self) -> Option<TokenKind> {
        match self {
            TokenKind::Text
            | TokenKind::Error
            | TokenKind::Keyword
            | TokenKind::Name
            | TokenKind::Literal
            | TokenKind::Operator
            | TokenKind::Punctuation
            | TokenKind::Comment => None,
            TokenKind::Whitespace => Some(TokenKind::Text),
            TokenKind::KeywordDeclaration => Some(TokenKind::Keyword),
            TokenKind::NameFunction
            | TokenKind::NameClass
            | TokenKind::NameLabel
            | TokenKind::NameAttribute => Some(TokenKind::Name),
            TokenKind::String
            | TokenKind::NumberInteger
            | TokenKind::NumberFloat
            | TokenKind::NumberHex => Some(TokenKind::Literal),
            TokenKind::StringEscape => Some(TokenKind::String),
            TokenKind::OperatorWord => Some(TokenKind::Operator),
            TokenKind::CommentSingle
            | TokenKind::CommentMultiline
            | TokenKind::CommentPreproc => Some(TokenKind::Comment),
            TokenKind::CommentPreprocFile => Some(TokenKind::CommentPreproc),
        }
    }

    /// Returns `true` when `self` is `ancestor` or descends from it.
    pub fn is_subtype_of(self, ancestor: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Short CSS class used by the HTML formatter. Plain text carries no class.
    pub fn css_class(self) -> &'static str {
        match self {
            TokenKind::Text => "",
            TokenKind::Whitespace => "w",
            TokenKind::Error => "err",
            TokenKind::Keyword => "k",
            TokenKind::KeywordDeclaration => "kd",
            TokenKind::Name => "n",
            TokenKind::NameFunction => "nf",
            TokenKind::NameClass => "nc",
            TokenKind::NameLabel => "nl",
            TokenKind::NameAttribute => "na",
            TokenKind::Literal => "l",
            TokenKind::String => "s",
            TokenKind::StringEscape => "se",
            TokenKind::NumberInteger => "mi",
            TokenKind::NumberFloat => "mf",
            TokenKind::NumberHex => "mh",
            TokenKind::Operator => "o",
            TokenKind::OperatorWord => "ow",
            TokenKind::Punctuation => "p",
            TokenKind::Comment => "c",
            TokenKind::CommentSingle => "c1",
            TokenKind::CommentMultiline => "cm",
            TokenKind::CommentPreproc => "cp",
            TokenKind::CommentPreprocFile => "cpf",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A classified lexeme borrowed from the source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, start: usize) -> Self {
        Self {
            kind,
            text,
            span: start..start + text.len(),
        }
    }

    /// `(kind, text)` view, handy for comparisons in tests and formatters.
    pub fn pair(&self) -> (TokenKind, &'a str) {
        (self.kind, self.text)
    }
}
