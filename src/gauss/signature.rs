//! Signature rendering for multi-return procedures
//!
//!     GAUSS procedures may return several values, documented as `{ a, b } = f(x, [y])`. This
//!     module models the pieces of such a signature as small nodes and renders them to HTML with
//!     a visit/depart translator, the way a documentation writer walks its document tree.
//!
//! Separator Placement
//!
//!     Separators are placed so optional elements read naturally. While required elements are
//!     still to come, the separator goes after each element; once none are left, it goes before.
//!     That renders `foo([a, ]b, c[, d])` correctly: the comma sits inside the brackets on
//!     both sides.
//!
//! Traversal State
//!
//!     The per-list counters live in a [`ListContext`] returned by `visit_returnlist` /
//!     `visit_parameterlist` and handed back to every nested visit. A fresh context per list keeps
//!     sibling signatures from seeing each other's counters.

use crate::gauss::error::SignatureError;
use crate::gauss::formats::escape_html;
use serde::Deserialize;

pub const DEFAULT_SEPARATOR: &str = ", ";

/// A single return value or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    /// Render without `<em>`.
    pub noemph: bool,
}

impl Element {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            noemph: false,
        }
    }

    pub fn noemph(mut self) -> Self {
        self.noemph = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNode {
    Element(Element),
    /// Bracketed optional group.
    Optional(Vec<ListNode>),
}

/// Ordered element list with the separator placed between children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementList {
    pub children: Vec<ListNode>,
    pub separator: String,
}

impl ElementList {
    pub fn new(children: Vec<ListNode>) -> Self {
        Self {
            children,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Direct element children; elements inside optional groups don't count.
    fn required_count(&self) -> usize {
        self.children
            .iter()
            .filter(|child| matches!(child, ListNode::Element(_)))
            .count()
    }
}

pub type Return = Element;
pub type ReturnList = ElementList;
pub type Parameter = Element;
pub type ParameterList = ElementList;

/// `returns = name(parameters)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub returns: Option<ReturnList>,
    pub name: String,
    pub parameters: Option<ParameterList>,
}

/// `[signature]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignatureConfig {
    pub separator: String,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl Signature {
    /// Parse `{ a, b } = name(x[, y])`, `a = name(x)` or `name(x)`.
    pub fn parse(text: &str) -> Result<Self, SignatureError> {
        let text = text.trim();
        let (returns, call) = match split_assignment(text)? {
            Some((lhs, rhs)) => {
                let lhs = lhs.trim();
                let lhs = lhs
                    .strip_prefix('{')
                    .and_then(|inner| inner.strip_suffix('}'))
                    .unwrap_or(lhs);
                (Some(ElementList::new(parse_list(lhs)?)), rhs.trim())
            }
            None => (None, text),
        };

        let (name, parameters) = match call.find('(') {
            Some(open) => {
                let inner = call[open + 1..]
                    .trim_end()
                    .strip_suffix(')')
                    .ok_or(SignatureError::Unbalanced('('))?;
                (&call[..open], Some(ElementList::new(parse_list(inner)?)))
            }
            None => (call, None),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(SignatureError::MissingName);
        }
        Ok(Signature {
            returns,
            name: name.to_string(),
            parameters,
        })
    }

    pub fn with_separator(mut self, separator: &str) -> Self {
        if let Some(returns) = self.returns.as_mut() {
            returns.separator = separator.to_string();
        }
        if let Some(parameters) = self.parameters.as_mut() {
            parameters.separator = separator.to_string();
        }
        self
    }
}

/// Split on the first `=` outside brackets.
fn split_assignment(text: &str) -> Result<Option<(&str, &str)>, SignatureError> {
    let mut depth: i32 = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(SignatureError::Unbalanced(ch));
                }
            }
            '=' if depth == 0 => return Ok(Some((&text[..index], &text[index + 1..]))),
            _ => {}
        }
    }
    Ok(None)
}

/// Parse a comma-separated list where `[ ... ]` marks an optional group.
fn parse_list(text: &str) -> Result<Vec<ListNode>, SignatureError> {
    let mut stack: Vec<Vec<ListNode>> = vec![Vec::new()];
    let mut current = String::new();

    fn flush(current: &mut String, level: &mut Vec<ListNode>) {
        let item = current.trim();
        if !item.is_empty() {
            level.push(ListNode::Element(Element::new(item)));
        }
        current.clear();
    }

    for ch in text.chars() {
        match ch {
            '[' => {
                if let Some(level) = stack.last_mut() {
                    flush(&mut current, level);
                }
                stack.push(Vec::new());
            }
            ']' => {
                if stack.len() < 2 {
                    return Err(SignatureError::Unbalanced(']'));
                }
                let mut group = stack.pop().unwrap_or_default();
                flush(&mut current, &mut group);
                if let Some(parent) = stack.last_mut() {
                    parent.push(ListNode::Optional(group));
                }
            }
            ',' => {
                if let Some(level) = stack.last_mut() {
                    flush(&mut current, level);
                }
            }
            _ => current.push(ch),
        }
    }

    if stack.len() != 1 {
        return Err(SignatureError::Unbalanced('['));
    }
    let mut root = stack.pop().unwrap_or_default();
    flush(&mut current, &mut root);
    Ok(root)
}

/// Per-list traversal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContext {
    first: bool,
    optional_level: usize,
    required_left: usize,
    multiple: bool,
    separator: String,
}

impl ListContext {
    fn for_list(list: &ElementList) -> Self {
        Self {
            first: true,
            optional_level: 0,
            required_left: list.required_count(),
            multiple: list.children.len() > 1,
            separator: list.separator.clone(),
        }
    }
}

/// Appends HTML fragments for signature nodes to `body`.
#[derive(Debug, Clone, Default)]
pub struct HtmlTranslator {
    pub body: Vec<String>,
}

impl HtmlTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn astext(&self) -> String {
        self.body.concat()
    }

    pub fn visit_returnlist(&mut self, node: &ReturnList) -> ListContext {
        let ctx = ListContext::for_list(node);
        if ctx.multiple {
            self.body.push("<span class=\"sig-curly\">{</span>&nbsp;".to_string());
        }
        ctx
    }

    pub fn depart_returnlist(&mut self, ctx: ListContext) {
        if ctx.multiple {
            self.body.push("&nbsp;<span class=\"sig-curly\">}</span>".to_string());
        }
        self.body
            .push("&nbsp;<span class=\"sig-equals\">=</span>&nbsp;".to_string());
    }

    pub fn visit_return(&mut self, ctx: &mut ListContext, node: &Return) {
        self.visit_element(ctx, node);
    }

    pub fn depart_return(&mut self, ctx: &ListContext, node: &Return) {
        self.depart_element(ctx, node);
    }

    pub fn visit_parameterlist(&mut self, node: &ParameterList) -> ListContext {
        self.body.push("<span class=\"sig-paren\">(</span>".to_string());
        ListContext::for_list(node)
    }

    pub fn depart_parameterlist(&mut self, _ctx: ListContext) {
        self.body.push("<span class=\"sig-paren\">)</span>".to_string());
    }

    pub fn visit_parameter(&mut self, ctx: &mut ListContext, node: &Parameter) {
        self.visit_element(ctx, node);
    }

    pub fn depart_parameter(&mut self, ctx: &ListContext, node: &Parameter) {
        self.depart_element(ctx, node);
    }

    pub fn visit_optional(&mut self, ctx: &mut ListContext) {
        ctx.optional_level += 1;
        self.body.push("<span class=\"optional\">[</span>".to_string());
    }

    pub fn depart_optional(&mut self, ctx: &mut ListContext) {
        ctx.optional_level = ctx.optional_level.saturating_sub(1);
        self.body.push("<span class=\"optional\">]</span>".to_string());
    }

    pub fn visit_name(&mut self, name: &str) {
        self.body.push(format!(
            "<code class=\"sig-name descname\">{}</code>",
            escape_html(name)
        ));
    }

    fn visit_element(&mut self, ctx: &mut ListContext, node: &Element) {
        if ctx.first {
            ctx.first = false;
        } else if ctx.required_left == 0 {
            self.body.push(ctx.separator.clone());
        }
        if ctx.optional_level == 0 {
            ctx.required_left = ctx.required_left.saturating_sub(1);
        }
        if !node.noemph {
            self.body.push("<em>".to_string());
        }
    }

    fn depart_element(&mut self, ctx: &ListContext, node: &Element) {
        if !node.noemph {
            self.body.push("</em>".to_string());
        }
        if ctx.required_left > 0 {
            self.body.push(ctx.separator.clone());
        }
    }

    /// Walk a return list: `{ a, b } = `.
    pub fn walk_returnlist(&mut self, list: &ReturnList) {
        let mut ctx = self.visit_returnlist(list);
        for child in &list.children {
            self.walk_child(&mut ctx, child);
        }
        self.depart_returnlist(ctx);
    }

    /// Walk a parameter list: `(x, y[, z])`.
    pub fn walk_parameterlist(&mut self, list: &ParameterList) {
        let mut ctx = self.visit_parameterlist(list);
        for child in &list.children {
            self.walk_child(&mut ctx, child);
        }
        self.depart_parameterlist(ctx);
    }

    fn walk_child(&mut self, ctx: &mut ListContext, child: &ListNode) {
        match child {
            ListNode::Element(element) => {
                self.visit_element(ctx, element);
                self.body.push(escape_html(&element.text));
                self.depart_element(ctx, element);
            }
            ListNode::Optional(children) => {
                self.visit_optional(ctx);
                for nested in children {
                    self.walk_child(ctx, nested);
                }
                self.depart_optional(ctx);
            }
        }
    }

    pub fn walk_signature(&mut self, signature: &Signature) {
        if let Some(returns) = &signature.returns {
            self.walk_returnlist(returns);
        }
        self.visit_name(&signature.name);
        if let Some(parameters) = &signature.parameters {
            self.walk_parameterlist(parameters);
        }
    }
}

/// Render a complete signature to an HTML fragment.
pub fn render_signature(signature: &Signature) -> String {
    let mut translator = HtmlTranslator::new();
    translator.walk_signature(signature);
    translator.astext()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(names: &[&str]) -> Vec<ListNode> {
        names
            .iter()
            .map(|name| ListNode::Element(Element::new(*name)))
            .collect()
    }

    fn render_returns(list: &ReturnList) -> String {
        let mut translator = HtmlTranslator::new();
        translator.walk_returnlist(list);
        translator.astext()
    }

    #[test]
    fn test_single_return_has_no_braces() {
        let html = render_returns(&ReturnList::new(elements(&["x"])));
        assert_eq!(html, "<em>x</em>&nbsp;<span class=\"sig-equals\">=</span>&nbsp;");
    }

    #[test]
    fn test_multiple_returns_are_braced() {
        let html = render_returns(&ReturnList::new(elements(&["a", "b"])));
        assert_eq!(
            html,
            "<span class=\"sig-curly\">{</span>&nbsp;<em>a</em>, <em>b</em>&nbsp;<span class=\"sig-curly\">}</span>&nbsp;<span class=\"sig-equals\">=</span>&nbsp;"
        );
    }

    #[test]
    fn test_noemph_return() {
        let list = ReturnList::new(vec![ListNode::Element(Element::new("rv").noemph())]);
        assert_eq!(
            render_returns(&list),
            "rv&nbsp;<span class=\"sig-equals\">=</span>&nbsp;"
        );
    }

    #[test]
    fn test_empty_return_list_still_assigns() {
        let html = render_returns(&ReturnList::new(vec![]));
        assert_eq!(html, "&nbsp;<span class=\"sig-equals\">=</span>&nbsp;");
    }

    #[test]
    fn test_optional_separators() {
        // foo([a, ]b, c[, d])
        let list = ParameterList::new(vec![
            ListNode::Optional(elements(&["a"])),
            ListNode::Element(Element::new("b")),
            ListNode::Element(Element::new("c")),
            ListNode::Optional(elements(&["d"])),
        ]);
        let mut translator = HtmlTranslator::new();
        translator.walk_parameterlist(&list);
        assert_eq!(
            translator.astext(),
            "<span class=\"sig-paren\">(</span>\
             <span class=\"optional\">[</span><em>a</em>, <span class=\"optional\">]</span>\
             <em>b</em>, <em>c</em>\
             <span class=\"optional\">[</span>, <em>d</em><span class=\"optional\">]</span>\
             <span class=\"sig-paren\">)</span>"
        );
    }

    #[test]
    fn test_state_does_not_leak_between_lists() {
        let mut translator = HtmlTranslator::new();
        translator.walk_returnlist(&ReturnList::new(elements(&["a", "b", "c"])));
        translator.body.clear();
        translator.walk_returnlist(&ReturnList::new(elements(&["x"])));
        assert_eq!(
            translator.astext(),
            "<em>x</em>&nbsp;<span class=\"sig-equals\">=</span>&nbsp;"
        );
    }

    #[test]
    fn test_parse_signature() {
        let signature = Signature::parse("{ b, se } = olsqr(y, x[, tol])").unwrap();
        assert_eq!(signature.name, "olsqr");
        assert_eq!(signature.returns, Some(ReturnList::new(elements(&["b", "se"]))));
        let mut params = elements(&["y", "x"]);
        params.push(ListNode::Optional(elements(&["tol"])));
        assert_eq!(signature.parameters, Some(ParameterList::new(params)));
    }

    #[test]
    fn test_parse_without_returns() {
        let signature = Signature::parse("cls").unwrap();
        assert_eq!(signature.returns, None);
        assert_eq!(signature.parameters, None);
        assert_eq!(signature.name, "cls");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Signature::parse("x = (a)"), Err(SignatureError::MissingName));
        assert_eq!(Signature::parse("f(a[, b)"), Err(SignatureError::Unbalanced('[')));
        assert_eq!(Signature::parse("f(a"), Err(SignatureError::Unbalanced('(')));
    }

    #[test]
    fn test_render_signature() {
        let signature = Signature::parse("{ a, b } = f(x)").unwrap();
        assert_eq!(
            render_signature(&signature),
            "<span class=\"sig-curly\">{</span>&nbsp;<em>a</em>, <em>b</em>&nbsp;<span class=\"sig-curly\">}</span>\
             &nbsp;<span class=\"sig-equals\">=</span>&nbsp;\
             <code class=\"sig-name descname\">f</code>\
             <span class=\"sig-paren\">(</span><em>x</em><span class=\"sig-paren\">)</span>"
        );
    }
}
