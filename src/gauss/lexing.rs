//! GAUSS source tokenization
//!
//!     The lexer is a small interpreter over the rule tables in [rules]. It keeps a cursor and a
//!     stack of [State]s; at each position it tries the rules of the state on top of the stack,
//!     in order, and applies the first one that matches: emit one token (or one per capture
//!     group), advance past the match, and optionally push or pop a state.
//!
//!     Tokenization never fails. When no rule matches, a single character is emitted as
//!     [TokenKind::Text] and the cursor moves on, so every input is covered exactly once and the
//!     concatenated token texts always reproduce the input.
//!
//!     Tokens are produced lazily. Capture groups marked for re-lexing (the parameter list of an
//!     `fn` header, whitespace before a `#` directive) run through a nested lexer over just that
//!     slice, starting from the root state.

pub mod rules;
pub mod words;

pub use rules::State;

use crate::gauss::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rules::{Action, Group, Rule, Transition, RULES};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Input preprocessing knobs. All off by default, which keeps token coverage byte-exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    /// Trim leading and trailing newlines.
    pub strip_newlines: bool,
    /// Trim all leading and trailing whitespace.
    pub strip_all: bool,
    /// Append a final newline when the input lacks one.
    pub ensure_newline: bool,
    /// Expand tabs to this many columns. Zero leaves tabs alone.
    pub tab_size: usize,
}

impl LexerOptions {
    fn is_identity(&self) -> bool {
        *self == LexerOptions::default()
    }
}

/// Lexer for GAUSS source code.
#[derive(Debug, Clone, Default)]
pub struct GaussLexer {
    options: LexerOptions,
}

impl GaussLexer {
    pub const NAME: &'static str = "GAUSS";
    pub const ALIASES: &'static [&'static str] = &["gauss"];
    pub const FILENAMES: &'static [&'static str] = &["*.e", "*.gss", "*.src"];
    pub const MIMETYPES: &'static [&'static str] = &["text/gauss"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LexerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Apply the configured preprocessing. Borrows the input untouched when nothing is enabled.
    pub fn preprocess<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.options.is_identity() {
            return Cow::Borrowed(text);
        }

        let mut text = text.replace("\r\n", "\n").replace('\r', "\n");
        if self.options.strip_all {
            text = text.trim().to_string();
        } else if self.options.strip_newlines {
            text = text.trim_matches('\n').to_string();
        }
        if self.options.tab_size > 0 {
            text = expand_tabs(&text, self.options.tab_size);
        }
        if self.options.ensure_newline && !text.ends_with('\n') {
            text.push('\n');
        }
        Cow::Owned(text)
    }

    /// Tokenize `text` as-is. Call [`GaussLexer::preprocess`] first to honor the options.
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a> {
        Tokens::new(text)
    }

    /// Guess whether `text` is GAUSS. See [`analyse_text`].
    pub fn analyse_text(&self, text: &str) -> Option<f32> {
        analyse_text(text)
    }
}

/// Tokenize `text` with default options.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens::new(text)
}

static END_OF_PROC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:endp|endfor)\s*;").expect("valid end-of-proc pattern"));
static PROC_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*proc ").expect("valid proc pattern"));

/// Score how likely `text` is GAUSS source.
///
/// Returns `Some(0.2)` when a line ends a procedure or loop (`endp;`, `endfor;`) or declares a
/// procedure (`proc ...`), and `None` when there is no signal either way.
pub fn analyse_text(text: &str) -> Option<f32> {
    if END_OF_PROC.is_match(text) || PROC_DECLARATION.is_match(text) {
        Some(0.2)
    } else {
        None
    }
}

fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let width = tab_size - column % tab_size;
                out.extend(std::iter::repeat(' ').take(width));
                column += width;
            }
            '\n' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Lazy token stream over one source buffer.
///
/// Each run owns its cursor and state stack; the rule tables are shared and read-only.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    source: &'a str,
    /// Added to every span, for nested runs over a slice of a larger buffer.
    offset: usize,
    pos: usize,
    stack: Vec<State>,
    pending: VecDeque<Token<'a>>,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::nested(source, 0)
    }

    fn nested(source: &'a str, offset: usize) -> Self {
        Self {
            source,
            offset,
            pos: 0,
            stack: vec![State::Root],
            pending: VecDeque::new(),
        }
    }

    /// Current state stack, bottom first. Never empty.
    pub fn stack(&self) -> &[State] {
        &self.stack
    }

    fn current_state(&self) -> State {
        self.stack.last().copied().unwrap_or(State::Root)
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.source.as_bytes()[self.pos - 1] == b'\n'
    }

    /// Run one rule, or fall back to a single character.
    fn step(&mut self) {
        let source = self.source;
        let rest = &source[self.pos..];
        let state = self.current_state();

        for rule in RULES.rules(state) {
            if rule.line_start && !self.at_line_start() {
                continue;
            }
            let Some(captures) = rule.regex.captures(rest) else {
                continue;
            };
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if whole.is_empty() && !self.transition_changes_stack(rule.transition) {
                continue;
            }
            if let Some(guard) = rule.guard {
                if !guard.admits(source, self.pos, whole.as_str()) {
                    continue;
                }
            }

            self.emit(rule, &captures);
            self.pos += whole.end();
            if let Some(transition) = rule.transition {
                self.apply(transition);
            }
            return;
        }

        self.recover(rest);
    }

    fn emit(&mut self, rule: &Rule, captures: &Captures<'a>) {
        let base = self.offset + self.pos;
        match &rule.action {
            Action::Skip => {}
            Action::Emit(kind) => {
                if let Some(whole) = captures.get(0) {
                    self.pending
                        .push_back(Token::new(*kind, whole.as_str(), base + whole.start()));
                }
            }
            Action::ByGroups(groups) => {
                for (index, group) in groups.iter().enumerate() {
                    let Some(matched) = captures.get(index + 1) else {
                        continue;
                    };
                    if matched.is_empty() {
                        continue;
                    }
                    match group {
                        Group::Emit(kind) => self.pending.push_back(Token::new(
                            *kind,
                            matched.as_str(),
                            base + matched.start(),
                        )),
                        Group::Relex => {
                            let nested = Tokens::nested(matched.as_str(), base + matched.start());
                            self.pending.extend(nested);
                        }
                    }
                }
            }
        }
    }

    fn transition_changes_stack(&self, transition: Option<Transition>) -> bool {
        match transition {
            None => false,
            Some(Transition::Pop) => self.stack.len() > 1,
            Some(_) => true,
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Push(state) => self.stack.push(state),
            Transition::PushCurrent => self.stack.push(self.current_state()),
            Transition::Pop => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
        }
        trace!(?transition, stack = ?self.stack, pos = self.pos, "lexer state change");
    }

    /// No rule matched: emit one character as text. A newline also drops back to the root state.
    fn recover(&mut self, rest: &'a str) {
        let Some(ch) = rest.chars().next() else {
            return;
        };
        if ch == '\n' && self.stack.len() > 1 {
            debug!(stack = ?self.stack, pos = self.pos, "no rule matched at newline, resetting to root");
            self.stack.truncate(1);
        }
        let text = &rest[..ch.len_utf8()];
        self.pending
            .push_back(Token::new(TokenKind::Text, text, self.offset + self.pos));
        self.pos += text.len();
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.pos >= self.source.len() {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for Tokens<'_> {}
