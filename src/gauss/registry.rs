//! Lexer registry for lexer discovery and selection
//!
//! Hosts pick a lexer by name or alias, by filename, by MIME type, or by asking every
//! registered lexer to score a text sample. The GAUSS lexer and a plain-text fallback are
//! registered by default.

use crate::gauss::error::RegistryError;
use crate::gauss::lexing::{GaussLexer, LexerOptions};
use crate::gauss::token::{Token, TokenKind};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// A tokenizer the registry can hand out.
pub trait Lexer: Send + Sync {
    /// Unique display name (e.g. "GAUSS").
    fn name(&self) -> &str;

    /// Short lookup names.
    fn aliases(&self) -> &[&'static str] {
        &[]
    }

    /// Filename globs (`*.e`).
    fn filenames(&self) -> &[&'static str] {
        &[]
    }

    fn mimetypes(&self) -> &[&'static str] {
        &[]
    }

    /// Confidence in `0.0..=1.0` that `text` is in this language, or `None` for no opinion.
    fn analyse_text(&self, _text: &str) -> Option<f32> {
        None
    }

    fn preprocess<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }

    fn tokens<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Token<'a>> + 'a>;
}

impl Lexer for GaussLexer {
    fn name(&self) -> &str {
        GaussLexer::NAME
    }

    fn aliases(&self) -> &[&'static str] {
        GaussLexer::ALIASES
    }

    fn filenames(&self) -> &[&'static str] {
        GaussLexer::FILENAMES
    }

    fn mimetypes(&self) -> &[&'static str] {
        GaussLexer::MIMETYPES
    }

    fn analyse_text(&self, text: &str) -> Option<f32> {
        GaussLexer::analyse_text(self, text)
    }

    fn preprocess<'a>(&self, text: &'a str) -> Cow<'a, str> {
        GaussLexer::preprocess(self, text)
    }

    fn tokens<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Token<'a>> + 'a> {
        Box::new(self.tokenize(text))
    }
}

/// Fallback lexer: the whole input as one text token.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextLexer;

impl Lexer for PlainTextLexer {
    fn name(&self) -> &str {
        "Text only"
    }

    fn aliases(&self) -> &[&'static str] {
        &["text"]
    }

    fn filenames(&self) -> &[&'static str] {
        &["*.txt"]
    }

    fn mimetypes(&self) -> &[&'static str] {
        &["text/plain"]
    }

    fn analyse_text(&self, _text: &str) -> Option<f32> {
        Some(0.01)
    }

    fn tokens<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Token<'a>> + 'a> {
        let token = (!text.is_empty()).then(|| Token::new(TokenKind::Text, text, 0));
        Box::new(token.into_iter())
    }
}

/// Registry of lexers, kept in registration order so ties resolve deterministically.
pub struct LexerRegistry {
    lexers: Vec<Box<dyn Lexer>>,
}

impl LexerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        LexerRegistry { lexers: Vec::new() }
    }

    /// Register a lexer
    ///
    /// If a lexer with the same name already exists, it will be replaced in place.
    pub fn register<L: Lexer + 'static>(&mut self, lexer: L) {
        match self.lexers.iter().position(|l| l.name() == lexer.name()) {
            Some(index) => self.lexers[index] = Box::new(lexer),
            None => self.lexers.push(Box::new(lexer)),
        }
    }

    /// Get a lexer by name or alias (case-insensitive)
    pub fn get(&self, name: &str) -> Result<&dyn Lexer, RegistryError> {
        self.lexers
            .iter()
            .find(|lexer| {
                lexer.name().eq_ignore_ascii_case(name)
                    || lexer.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
            })
            .map(|lexer| lexer.as_ref())
            .ok_or_else(|| RegistryError::LexerNotFound(name.to_string()))
    }

    /// Check if a lexer exists
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// List all lexer names (sorted)
    pub fn list_lexers(&self) -> Vec<String> {
        let mut names: Vec<_> = self.lexers.iter().map(|l| l.name().to_string()).collect();
        names.sort();
        names
    }

    /// Find the lexer whose filename globs match the final component of `path`.
    pub fn for_filename(&self, path: impl AsRef<Path>) -> Result<&dyn Lexer, RegistryError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let lexer = self
            .lexers
            .iter()
            .find(|lexer| lexer.filenames().iter().any(|glob| glob_match(glob, &file_name)))
            .map(|lexer| lexer.as_ref())
            .ok_or_else(|| RegistryError::NoLexerForFilename(path.display().to_string()))?;
        debug!(lexer = lexer.name(), file = %path.display(), "selected lexer by filename");
        Ok(lexer)
    }

    pub fn for_mimetype(&self, mimetype: &str) -> Result<&dyn Lexer, RegistryError> {
        self.lexers
            .iter()
            .find(|lexer| lexer.mimetypes().contains(&mimetype))
            .map(|lexer| lexer.as_ref())
            .ok_or_else(|| RegistryError::NoLexerForMimetype(mimetype.to_string()))
    }

    /// Pick the lexer that scores `text` highest. Lexers without an opinion are skipped.
    pub fn guess(&self, text: &str) -> Option<&dyn Lexer> {
        let mut best: Option<(&dyn Lexer, f32)> = None;
        for lexer in &self.lexers {
            let Some(score) = lexer.analyse_text(text) else {
                continue;
            };
            let score = score.clamp(0.0, 1.0);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((lexer.as_ref(), score));
            }
        }
        if let Some((lexer, score)) = best {
            debug!(lexer = lexer.name(), score, "guessed lexer from content");
        }
        best.map(|(lexer, _)| lexer)
    }

    /// Filename first, then content analysis.
    pub fn select(&self, path: impl AsRef<Path>, text: &str) -> Result<&dyn Lexer, RegistryError> {
        let path = path.as_ref();
        self.for_filename(path).or_else(|err| self.guess(text).ok_or(err))
    }

    /// Create a registry with the default lexers
    pub fn with_defaults() -> Self {
        Self::with_options(LexerOptions::default())
    }

    /// Default lexers, with the GAUSS lexer configured by `options`.
    pub fn with_options(options: LexerOptions) -> Self {
        let mut registry = Self::new();
        registry.register(GaussLexer::with_options(options));
        registry.register(PlainTextLexer);
        registry
    }
}

impl Default for LexerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Shell-style filename match supporting `*` and `?`.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(&ch) if ch == '?' || ch == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    n = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&ch| ch == '*')
}
