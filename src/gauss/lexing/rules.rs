//! Declarative rule tables for the GAUSS lexer.
//!
//! Each lexer state owns an ordered list of rules. At every cursor position the engine tries
//! the rules of the active state in declaration order and the first match wins, so the order
//! below is part of the grammar, not an implementation detail:
//!
//! 1. numbers before operators (`-1.5` is a float, not minus + float)
//! 2. operators and punctuation before words
//! 3. special multi-token constructs (`struct x`, `for i`, `fn f(x) =`) before word lists
//! 4. word lists (literals, keywords, declarations) before generic identifiers
//!
//! Patterns are plain regexes anchored at the cursor. Rust regexes have no lookaround and
//! the haystack handed to them starts at the cursor, so line-start anchors and the few
//! lookaround conditions are expressed as [`Guard`]s and the `line_start` flag instead.

use super::words::{words_pattern, DECLARATIONS, KEYWORDS, LITERALS};
use crate::gauss::token::TokenKind;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Identifier, as a capture group.
const ID: &str = r"([a-zA-Z_]\w*)";

/// Optional whitespace with at most one block comment (`/* */` or `@ @`).
const WS1: &str = r"\s*(?:/[*].*?[*]/\s*|@.*?@\s*)?";

/// Named lexer modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Root,
    Whitespace,
    Statements,
    Statement,
    String,
    StructMember,
    Macro,
    If0,
}

impl State {
    const COUNT: usize = 8;

    fn index(self) -> usize {
        match self {
            State::Root => 0,
            State::Whitespace => 1,
            State::Statements => 2,
            State::Statement => 3,
            State::String => 4,
            State::StructMember => 5,
            State::Macro => 6,
            State::If0 => 7,
        }
    }

    const ALL: [State; State::COUNT] = [
        State::Root,
        State::Whitespace,
        State::Statements,
        State::Statement,
        State::String,
        State::StructMember,
        State::Macro,
        State::If0,
    ];
}

/// What a matching rule emits.
#[derive(Debug, Clone)]
pub enum Action {
    /// The whole match as a single token.
    Emit(TokenKind),
    /// One entry per capture group, in group order. Empty groups emit nothing.
    ByGroups(Vec<Group>),
    /// Nothing; used by zero-width default transitions.
    Skip,
}

#[derive(Debug, Clone, Copy)]
pub enum Group {
    Emit(TokenKind),
    /// Lex the group text again, from the root state, as an independent buffer.
    Relex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Push(State),
    /// Push another copy of the current state.
    PushCurrent,
    Pop,
}

/// Context conditions a regex alone cannot express here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The character right after the match is not this one.
    NotFollowedBy(char),
    /// The character right before the cursor is this one.
    PrecededBy(char),
    /// The match does not end in a backslash-escaped newline, or in a bare backslash at the end
    /// of input.
    UnescapedFinalNewline,
    /// A match starting with a digit needs a word boundary before the cursor.
    BoundaryBeforeDigit,
}

impl Guard {
    /// Check the guard for `matched`, found at `pos` in `source`.
    pub fn admits(self, source: &str, pos: usize, matched: &str) -> bool {
        match self {
            Guard::NotFollowedBy(ch) => !source[pos + matched.len()..].starts_with(ch),
            Guard::PrecededBy(ch) => source[..pos].ends_with(ch),
            Guard::UnescapedFinalNewline => {
                let body = matched.strip_suffix('\n').unwrap_or(matched);
                !body.ends_with('\\')
            }
            Guard::BoundaryBeforeDigit => match matched.chars().next() {
                Some(first) if first.is_numeric() => !source[..pos]
                    .chars()
                    .next_back()
                    .is_some_and(is_word_char),
                _ => true,
            },
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A compiled rule.
#[derive(Debug)]
pub struct Rule {
    pub regex: Regex,
    pub action: Action,
    pub transition: Option<Transition>,
    pub line_start: bool,
    pub guard: Option<Guard>,
}

/// Rule source before compilation.
struct RuleDef {
    pattern: String,
    action: Action,
    transition: Option<Transition>,
    line_start: bool,
    guard: Option<Guard>,
}

impl RuleDef {
    fn push(mut self, state: State) -> Self {
        self.transition = Some(Transition::Push(state));
        self
    }

    fn push_current(mut self) -> Self {
        self.transition = Some(Transition::PushCurrent);
        self
    }

    fn pop(mut self) -> Self {
        self.transition = Some(Transition::Pop);
        self
    }

    fn at_line_start(mut self) -> Self {
        self.line_start = true;
        self
    }

    fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }
}

enum Entry {
    Rule(RuleDef),
    Include(State),
}

impl From<RuleDef> for Entry {
    fn from(def: RuleDef) -> Self {
        Entry::Rule(def)
    }
}

fn token(pattern: impl Into<String>, kind: TokenKind) -> RuleDef {
    RuleDef {
        pattern: pattern.into(),
        action: Action::Emit(kind),
        transition: None,
        line_start: false,
        guard: None,
    }
}

fn groups(pattern: impl Into<String>, groups: &[Group]) -> RuleDef {
    RuleDef {
        pattern: pattern.into(),
        action: Action::ByGroups(groups.to_vec()),
        transition: None,
        line_start: false,
        guard: None,
    }
}

/// Zero-width rule that only changes state.
fn default(transition: Transition) -> RuleDef {
    RuleDef {
        pattern: String::new(),
        action: Action::Skip,
        transition: Some(transition),
        line_start: false,
        guard: None,
    }
}

fn definitions(state: State) -> Vec<Entry> {
    use Group::{Emit, Relex};
    use TokenKind::*;

    match state {
        State::Whitespace => vec![
            // preprocessor directives at column zero
            token(r"#if\s+0", CommentPreproc).push(State::If0).at_line_start().into(),
            token(r"#", CommentPreproc).push(State::Macro).at_line_start().into(),
            // or behind whitespace / a comment
            groups(format!(r"({WS1})(#if\s+0)"), &[Relex, Emit(CommentPreproc)])
                .push(State::If0)
                .at_line_start()
                .into(),
            groups(format!(r"({WS1})(#)"), &[Relex, Emit(CommentPreproc)])
                .push(State::Macro)
                .at_line_start()
                .into(),
            token(r"\n", Text).into(),
            token(r"\s+", Text).into(),
            token(r"\\\n", Text).into(),
            // a last line without its newline still closes the comment
            token(r"//(\n|[\w\W]*?[^\\]\n|[\w\W]*\z)", CommentSingle).into(),
            token(r"/(\\\n)?[*][\w\W]*?[*](\\\n)?/", CommentMultiline).into(),
            token(r"@[\w\W]*?@", CommentMultiline).into(),
            // unterminated: runs to the end of input
            token(r"/(\\\n)?[*][\w\W]*", CommentMultiline).into(),
        ],
        State::Statements => vec![
            token(r#"""#, String).push(State::String).into(),
            token(r"0x[0-9a-fA-F]+", NumberHex).into(),
            token(r"(\d+\.\d*|\.\d+|\d+)[eE][+-]?\d+", NumberFloat).into(),
            token(r"(-?)((\d+(\.\d*)?|\.\d+)([eE][-+]?\d+)?)", NumberFloat)
                .guard(Guard::BoundaryBeforeDigit)
                .into(),
            token(r"\d+[eE][+-]?[0-9]+", NumberFloat).into(),
            token(r"\d+", NumberInteger).into(),
            token(r"\*/", Error).into(),
            token(r"\.?\$?(?:\.?[ngl]e\b|\.?[gl]t\b)", OperatorWord).into(),
            token(r"\.?(?:and|x?or|not|eqv?)\b", OperatorWord).into(),
            token(r"\.?\$?(?:[~/=!]=|[<>]=?)|%|\$?[|+\-~]", Operator).into(),
            token(r"\.?\*\.?|[+/!|]|\.?[/^']|\*?~|&|\$", Operator).into(),
            token(r"\[|\]|\(|\)|\{|\}|\.|,|=|\?|:|;", Punctuation).into(),
            groups(format!(r"(struct)(\s+){ID}"), &[Emit(Keyword), Emit(Whitespace), Emit(NameClass)])
                .into(),
            groups(
                format!(r"(?:(for|threadfor)\b)(\s*){ID}"),
                &[Emit(Keyword), Emit(Whitespace), Emit(Name)],
            )
            .into(),
            groups(
                format!(r"(fn)(\s+){ID}([^=]*?)(=)"),
                &[
                    Emit(Keyword),
                    Emit(Whitespace),
                    Emit(NameFunction),
                    Relex,
                    Emit(Punctuation),
                ],
            )
            .into(),
            token(words_pattern(LITERALS, r"\b"), Literal).into(),
            token(words_pattern(KEYWORDS, r"\b"), Keyword).into(),
            token(words_pattern(DECLARATIONS, r"\b"), KeywordDeclaration).into(),
            groups(format!(r"{ID}(\s*)(\()"), &[Emit(NameFunction), Emit(Whitespace), Emit(Punctuation)])
                .into(),
            groups(format!(r"(\s*){ID}(:)"), &[Emit(Whitespace), Emit(NameLabel), Emit(Punctuation)])
                .at_line_start()
                .guard(Guard::NotFollowedBy(':'))
                .into(),
            groups(format!(r"{ID}(\.|->){ID}"), &[Emit(Name), Emit(Punctuation), Emit(NameAttribute)])
                .push(State::StructMember)
                .into(),
            token(ID, Name).into(),
        ],
        State::StructMember => vec![
            groups(format!(r"(\.){ID}"), &[Emit(Punctuation), Emit(NameAttribute)]).into(),
            default(Transition::Pop).into(),
        ],
        State::Root => vec![
            Entry::Include(State::Whitespace),
            Entry::Include(State::Statement),
            token(r".", Text).into(),
        ],
        State::Statement => vec![
            Entry::Include(State::Whitespace),
            Entry::Include(State::Statements),
        ],
        State::String => vec![
            token(r#"""#, String).pop().into(),
            token(
                r#"\\([\\abfnrtv"']|x[a-fA-F0-9]{2,4}|u[a-fA-F0-9]{4}|U[a-fA-F0-9]{8}|[0-7]{1,3})"#,
                StringEscape,
            )
            .into(),
            token(r#"[^\\"]+"#, String).into(),
            token(r"\\\n", String).into(),
            token(r"\\", String).into(),
        ],
        State::Macro => vec![
            groups(
                format!(r"(include)({WS1})([^\n]+)"),
                &[Emit(CommentPreproc), Emit(Text), Emit(CommentPreprocFile)],
            )
            .into(),
            token(r"[^/\n]+", CommentPreproc).into(),
            token(r"/[*](.|\n)*?[*]/", CommentMultiline).into(),
            token(r"@(.|\n)*?@", CommentMultiline).into(),
            token(r"//.*?(?:\n|\z)", CommentSingle).pop().into(),
            token(r"/", CommentPreproc).into(),
            // escaped newline continues the directive
            token(r"\n", CommentPreproc).guard(Guard::PrecededBy('\\')).into(),
            token(r"\n", CommentPreproc).pop().into(),
        ],
        State::If0 => vec![
            token(r"\s*#if.*?(?:\n|\z)", CommentPreproc)
                .at_line_start()
                .guard(Guard::UnescapedFinalNewline)
                .push_current()
                .into(),
            token(r"\s*#el(?:se|if).*(?:\n|\z)", CommentPreproc).at_line_start().pop().into(),
            token(r"\s*#endif.*?(?:\n|\z)", CommentPreproc)
                .at_line_start()
                .guard(Guard::UnescapedFinalNewline)
                .pop()
                .into(),
            token(r".*?\n", Comment).into(),
            token(r".+\z", Comment).into(),
        ],
    }
}

/// Compiled rules for every state, with includes flattened.
pub struct RuleTable {
    states: Vec<Vec<Rule>>,
}

impl RuleTable {
    fn build() -> Self {
        let states = State::ALL
            .iter()
            .map(|&state| {
                let mut rules = Vec::new();
                flatten(state, &mut rules);
                rules
            })
            .collect();
        RuleTable { states }
    }

    /// Rules active in `state`, in priority order.
    pub fn rules(&self, state: State) -> &[Rule] {
        &self.states[state.index()]
    }
}

fn flatten(state: State, out: &mut Vec<Rule>) {
    for entry in definitions(state) {
        match entry {
            Entry::Include(included) => flatten(included, out),
            Entry::Rule(def) => out.push(compile(state, def)),
        }
    }
}

fn compile(state: State, def: RuleDef) -> Rule {
    let anchored = format!(r"\A(?:{})", def.pattern);
    let regex = RegexBuilder::new(&anchored)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|err| panic!("invalid {state:?} rule /{}/: {err}", def.pattern));
    Rule {
        regex,
        action: def.action,
        transition: def.transition,
        line_start: def.line_start,
        guard: def.guard,
    }
}

/// The compiled GAUSS grammar, built on first use and shared by every lexer run.
pub static RULES: Lazy<RuleTable> = Lazy::new(RuleTable::build);
