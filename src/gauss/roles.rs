//! Inline markup roles
//!
//!     Menu selections such as `File-->&Open` are written with `-->` between menu levels and an
//!     `&` before the keyboard accelerator. The role turns that text into an inline node whose
//!     accelerator letters are wrapped in their own `accelerator` inline.
//!
//!     Roles are plain functions registered by name in a [`RoleRegistry`]. The small inline
//!     node model here is all a role needs to produce: text leaves and classed inline
//!     containers, rendered to HTML as nested spans.

use crate::gauss::error::RoleError;
use crate::gauss::formats::escape_html;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

pub const MENUSELECTION: &str = "menuselection";
pub const GUILABEL: &str = "guilabel";

/// Inline container with classes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inline {
    pub rawtext: Option<String>,
    pub classes: Vec<String>,
    pub children: Vec<InlineNode>,
}

impl Inline {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Self::default()
        }
    }

    /// Concatenated text of all descendants.
    pub fn astext(&self) -> String {
        self.children.iter().map(InlineNode::astext).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(String),
    Inline(Inline),
}

impl InlineNode {
    pub fn astext(&self) -> String {
        match self {
            InlineNode::Text(text) => text.clone(),
            InlineNode::Inline(inline) => inline.astext(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            InlineNode::Text(text) => out.push_str(&escape_html(text)),
            InlineNode::Inline(inline) => {
                if inline.classes.is_empty() {
                    out.push_str("<span>");
                } else {
                    out.push_str("<span class=\"");
                    out.push_str(&escape_html(&inline.classes.join(" ")));
                    out.push_str("\">");
                }
                for child in &inline.children {
                    child.write_html(out);
                }
                out.push_str("</span>");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Diagnostic returned alongside the produced nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemMessage {
    pub level: MessageLevel,
    pub line: usize,
    pub message: String,
}

/// Context handed to role functions by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inliner {
    /// Role used when the markup names none.
    pub default_role: Option<String>,
    /// Replacement for `-->` in menu selections.
    pub menu_arrow: String,
}

impl Default for Inliner {
    fn default() -> Self {
        Self {
            default_role: None,
            menu_arrow: ">".to_string(),
        }
    }
}

/// `[roles]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RolesConfig {
    pub menu_arrow: String,
    #[serde(default)]
    pub default_role: Option<String>,
}

impl Default for RolesConfig {
    fn default() -> Self {
        let inliner = Inliner::default();
        Self {
            menu_arrow: inliner.menu_arrow,
            default_role: inliner.default_role,
        }
    }
}

impl From<&RolesConfig> for Inliner {
    fn from(config: &RolesConfig) -> Self {
        Self {
            default_role: config.default_role.clone(),
            menu_arrow: config.menu_arrow.clone(),
        }
    }
}

pub type RoleOutput = (Vec<InlineNode>, Vec<SystemMessage>);

/// `(type_name, rawtext, text, lineno, inliner)`
pub type RoleFn = fn(&str, &str, &str, usize, &Inliner) -> RoleOutput;

/// Remove the null-byte escape markers left behind by the markup parser.
pub fn unescape(text: &str) -> String {
    text.replace("\0 ", "").replace("\0\n", "").replace('\0', "")
}

/// Split points: `&` not preceded by `&` and followed by something other than `&` or whitespace.
fn accelerator_splits(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if ch == '&' && prev != Some('&') {
            let splits = matches!(chars.peek(), Some(&(_, next)) if next != '&' && !next.is_whitespace());
            if splits {
                spans.push(&text[start..index]);
                start = index + 1;
            }
        }
        prev = Some(ch);
    }
    spans.push(&text[start..]);
    spans
}

/// Role for `menuselection` and `guilabel`.
pub fn menusel_role(
    typ: &str,
    rawtext: &str,
    text: &str,
    lineno: usize,
    inliner: &Inliner,
) -> RoleOutput {
    let typ = if typ.is_empty() {
        match &inliner.default_role {
            Some(role) => role.to_lowercase(),
            None => {
                let message = SystemMessage {
                    level: MessageLevel::Error,
                    line: lineno,
                    message: "no role name given and no default role is set".to_string(),
                };
                return (Vec::new(), vec![message]);
            }
        }
    } else {
        typ.to_lowercase()
    };

    let mut text = unescape(text);
    if typ == MENUSELECTION {
        text = text.replace("-->", &inliner.menu_arrow);
    }

    let mut node = Inline {
        rawtext: Some(rawtext.to_string()),
        ..Inline::default()
    };
    for (i, span) in accelerator_splits(&text).into_iter().enumerate() {
        let span = span.replace("&&", "&");
        if i == 0 {
            if !span.is_empty() {
                node.children.push(InlineNode::Text(span));
            }
            continue;
        }
        let mut chars = span.chars();
        if let Some(letter) = chars.next() {
            let mut accel = Inline::with_class("accelerator");
            accel.children.push(InlineNode::Text(letter.to_string()));
            node.children.push(InlineNode::Inline(accel));
        }
        let rest = chars.as_str();
        if !rest.is_empty() {
            node.children.push(InlineNode::Text(rest.to_string()));
        }
    }
    node.classes.push(typ);

    (vec![InlineNode::Inline(node)], Vec::new())
}

/// Metadata reported by [`setup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionMetadata {
    pub version: &'static str,
    pub parallel_read_safe: bool,
    pub parallel_write_safe: bool,
}

/// Role functions by lower-cased name.
#[derive(Clone, Default)]
pub struct RoleRegistry {
    roles: HashMap<String, RoleFn>,
}

impl fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleRegistry")
            .field("roles", &self.list_roles())
            .finish()
    }
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        setup(&mut registry);
        registry
    }

    /// Register a role, replacing any with the same name.
    pub fn register_local_role(&mut self, name: &str, role: RoleFn) {
        self.roles.insert(name.to_lowercase(), role);
    }

    pub fn get(&self, name: &str) -> Result<RoleFn, RoleError> {
        self.roles
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| RoleError::UnknownRole(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.roles.contains_key(&name.to_lowercase())
    }

    pub fn list_roles(&self) -> Vec<String> {
        let mut names: Vec<_> = self.roles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Invoke the role `name`; an empty name resolves through the inliner's default role.
    pub fn dispatch(
        &self,
        name: &str,
        rawtext: &str,
        text: &str,
        lineno: usize,
        inliner: &Inliner,
    ) -> Result<RoleOutput, RoleError> {
        let lookup = if name.is_empty() {
            inliner.default_role.as_deref().unwrap_or("")
        } else {
            name
        };
        let role = self.get(lookup)?;
        debug!(role = lookup, line = lineno, "dispatching inline role");
        Ok(role(name, rawtext, text, lineno, inliner))
    }
}

/// Register the menu roles.
pub fn setup(registry: &mut RoleRegistry) -> ExtensionMetadata {
    registry.register_local_role(MENUSELECTION, menusel_role);
    registry.register_local_role(GUILABEL, menusel_role);
    ExtensionMetadata {
        version: "builtin",
        parallel_read_safe: true,
        parallel_write_safe: true,
    }
}
