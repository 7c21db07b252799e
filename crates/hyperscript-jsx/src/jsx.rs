//! Conversion of markup elements into `swc_ecma_ast` JSX nodes.

use crate::markup::{AttrValue, Attribute, ElementName, MarkupChild, MarkupElement};
use crate::util::str_value;
use smol_str::SmolStr;
use swc_common::{SyntaxContext, DUMMY_SP};
use swc_ecma_ast::{
    Expr, Ident, IdentName, JSXAttr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue,
    JSXClosingElement, JSXElement, JSXElementChild, JSXElementName, JSXExpr, JSXExprContainer,
    JSXMemberExpr, JSXObject, JSXOpeningElement, JSXText, Lit, SpreadElement, Str,
};

/// Converts a markup element into a JSX expression.
pub fn to_jsx_expr(element: MarkupElement) -> Expr {
    Expr::JSXElement(Box::new(to_jsx_element(element)))
}

/// Converts a markup element into a JSX element.
///
/// The element gets the span of the call it was lowered from.
pub fn to_jsx_element(element: MarkupElement) -> JSXElement {
    let (name, attributes, children, span) = element.into_parts();
    let name = element_name(&name);
    let mut jsx_children: Vec<JSXElementChild> = Vec::with_capacity(children.len());
    for child in children {
        // Adjacent JSX text would merge into a single child.
        let follows_text = matches!(jsx_children.last(), Some(JSXElementChild::JSXText(_)));
        jsx_children.push(jsx_child(child, follows_text));
    }
    let children = jsx_children;
    let self_closing = children.is_empty();

    let closing = (!self_closing).then(|| JSXClosingElement {
        span: DUMMY_SP,
        name: name.clone(),
    });

    JSXElement {
        span,
        opening: JSXOpeningElement {
            name,
            span: DUMMY_SP,
            attrs: attributes.into_iter().map(jsx_attribute).collect(),
            self_closing,
            type_args: None,
        },
        children,
        closing,
    }
}

fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

fn element_name(name: &ElementName) -> JSXElementName {
    match name {
        ElementName::Tag(name) | ElementName::Component(name) => {
            JSXElementName::Ident(ident(name))
        }
        ElementName::Member(path) => match jsx_object(path) {
            JSXObject::JSXMemberExpr(member) => JSXElementName::JSXMemberExpr(*member),
            JSXObject::Ident(root) => JSXElementName::Ident(root),
        },
    }
}

fn jsx_object(path: &[SmolStr]) -> JSXObject {
    match path {
        [init @ .., prop] if !init.is_empty() => {
            JSXObject::JSXMemberExpr(Box::new(JSXMemberExpr {
                span: DUMMY_SP,
                obj: jsx_object(init),
                prop: IdentName::new(prop.as_str().into(), DUMMY_SP),
            }))
        }
        _ => JSXObject::Ident(ident(path.first().map_or("", SmolStr::as_str))),
    }
}

fn jsx_attribute(attribute: Attribute) -> JSXAttrOrSpread {
    match attribute {
        Attribute::Spread(expr) => JSXAttrOrSpread::SpreadElement(SpreadElement {
            dot3_token: DUMMY_SP,
            expr,
        }),
        Attribute::Named { name, value } => JSXAttrOrSpread::JSXAttr(JSXAttr {
            span: DUMMY_SP,
            name: JSXAttrName::Ident(IdentName::new(name.as_str().into(), DUMMY_SP)),
            value: Some(attribute_value(value)),
        }),
    }
}

fn attribute_value(value: AttrValue) -> JSXAttrValue {
    match value {
        AttrValue::Literal(s) if str_value(&s).is_some_and(is_attribute_string_safe) => {
            JSXAttrValue::Str(Str { raw: None, ..s })
        }
        AttrValue::Literal(s) => {
            JSXAttrValue::JSXExprContainer(container(Box::new(Expr::Lit(Lit::Str(s)))))
        }
        AttrValue::Expr(expr) => JSXAttrValue::JSXExprContainer(container(expr)),
    }
}

fn jsx_child(child: MarkupChild, follows_text: bool) -> JSXElementChild {
    match child {
        MarkupChild::Element(element) => {
            JSXElementChild::JSXElement(Box::new(to_jsx_element(element)))
        }
        MarkupChild::Text(s) => {
            let text = str_value(&s)
                .filter(|value| !follows_text && is_text_safe(value))
                .map(str::to_string);
            match text {
                Some(text) => JSXElementChild::JSXText(JSXText {
                    span: DUMMY_SP,
                    value: text.as_str().into(),
                    raw: text.into(),
                }),
                None => {
                    JSXElementChild::JSXExprContainer(container(Box::new(Expr::Lit(Lit::Str(s)))))
                }
            }
        }
        MarkupChild::Expr(expr) => JSXElementChild::JSXExprContainer(container(expr)),
    }
}

fn container(expr: Box<Expr>) -> JSXExprContainer {
    JSXExprContainer {
        span: DUMMY_SP,
        expr: JSXExpr::Expr(expr),
    }
}

/// Whether a string reads back unchanged when written as JSX text.
///
/// JSX text has no escapes, trims whitespace around line breaks and reserves
/// braces and angle brackets; `&` would start an HTML entity.
pub fn is_text_safe(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && !value
            .chars()
            .any(|c| c.is_control() || matches!(c, '{' | '}' | '<' | '>' | '&'))
}

/// Whether a string reads back unchanged as a quoted JSX attribute value.
pub fn is_attribute_string_safe(value: &str) -> bool {
    !(value.contains('"') && value.contains('\''))
        && !value
            .chars()
            .any(|c| c.is_control() || matches!(c, '\\' | '&' | '\u{2028}' | '\u{2029}'))
}
