//! The markup element model produced by lowering.
//!
//! These types describe the JSX tree independently of the host AST so the
//! builders can be written and tested as plain value constructors. The
//! [`jsx`](crate::jsx) module turns them into `swc_ecma_ast` JSX nodes.

use smol_str::SmolStr;
use swc_common::Span;
use swc_ecma_ast::{Expr, Str};

/// Builds a string literal node with no raw source text.
pub fn string_literal(value: &str, span: Span) -> Str {
    Str {
        span,
        value: value.into(),
        raw: None,
    }
}

/// The name of a markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementName {
    /// An intrinsic element from a tag string, e.g. `div`.
    Tag(SmolStr),
    /// A component referenced by identifier, e.g. `Button`.
    Component(SmolStr),
    /// A component referenced by a member path, e.g. `Foo.Bar`.
    Member(Vec<SmolStr>),
}

impl ElementName {
    /// Returns the name as it is written in markup.
    pub fn to_path(&self) -> String {
        match self {
            Self::Tag(name) | Self::Component(name) => name.to_string(),
            Self::Member(segments) => segments.join("."),
        }
    }
}

/// The value of a named attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A string literal, written as `name="value"`.
    Literal(Str),
    /// Any other expression, written as `name={expr}`.
    Expr(Box<Expr>),
}

/// A markup attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// `name="value"` or `name={expr}`.
    Named {
        /// The attribute name.
        name: SmolStr,
        /// The attribute value.
        value: AttrValue,
    },
    /// `{...expr}`.
    Spread(Box<Expr>),
}

impl Attribute {
    /// Creates a named attribute with a string literal value.
    pub fn literal(name: impl Into<SmolStr>, value: Str) -> Self {
        Self::Named {
            name: name.into(),
            value: AttrValue::Literal(value),
        }
    }

    /// Creates a named attribute with an expression value.
    pub fn expr(name: impl Into<SmolStr>, value: Box<Expr>) -> Self {
        Self::Named {
            name: name.into(),
            value: AttrValue::Expr(value),
        }
    }

    /// Returns true for spread attributes.
    pub fn is_spread(&self) -> bool {
        matches!(self, Self::Spread(_))
    }

    /// Returns the attribute name, or `None` for spreads.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name.as_str()),
            Self::Spread(_) => None,
        }
    }
}

/// A child of a markup element.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupChild {
    /// Text from a string literal.
    Text(Str),
    /// A nested element lowered from a builder call.
    Element(MarkupElement),
    /// An expression passed through unchanged as `{expr}`.
    Expr(Box<Expr>),
}

/// A markup element under construction.
///
/// The element is self-closing exactly when it has no children; there is no
/// separate flag that could disagree with the child list.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupElement {
    name: ElementName,
    attributes: Vec<Attribute>,
    children: Vec<MarkupChild>,
    span: Span,
}

impl MarkupElement {
    /// Creates a self-closing element with no attributes.
    pub fn new(name: ElementName, span: Span) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            span,
        }
    }

    /// Returns the element name.
    pub fn name(&self) -> &ElementName {
        &self.name
    }

    /// Returns the attributes in emission order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the children in emission order.
    pub fn children(&self) -> &[MarkupChild] {
        &self.children
    }

    /// Returns the span of the call this element was lowered from.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns whether the element renders as `<name />`.
    pub fn is_self_closing(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends attributes after the existing ones.
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Closes the element around `children`.
    ///
    /// `children` must not be empty: an element closed around nothing would
    /// be self-closing again.
    pub fn close_around(mut self, children: Vec<MarkupChild>) -> Self {
        debug_assert!(
            !children.is_empty(),
            "closing <{}> around an empty child list",
            self.name.to_path()
        );
        self.children.extend(children);
        self
    }

    /// Splits the element into its parts.
    pub fn into_parts(self) -> (ElementName, Vec<Attribute>, Vec<MarkupChild>, Span) {
        (self.name, self.attributes, self.children, self.span)
    }
}
