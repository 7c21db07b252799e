//! Builder-call lowering.
//!
//! Turns one classified builder call into a [`MarkupElement`], recursing into
//! nested builder calls found in children arrays.

use crate::attributes::build_attributes;
use crate::classify::{classify, CallShape, Rejection, SecondArg, TagRef};
use crate::context::TraversalContext;
use crate::markup::{string_literal, Attribute, ElementName, MarkupChild, MarkupElement};
use crate::util::{as_builder_call, peel_parens};
use swc_common::{Span, DUMMY_SP};
use swc_ecma_ast::{CallExpr, Expr, Lit};
use tracing::trace;

/// Lowers a builder call, or returns why it cannot be.
///
/// Nested builder calls that are refused become expression children; only the
/// outermost call can fail.
pub fn lower_call(call: &CallExpr, ctx: &TraversalContext) -> Result<MarkupElement, Rejection> {
    match classify(call, ctx.builder()) {
        CallShape::NotTransformable(rejection) => {
            trace!(reason = rejection.as_str(), "call not transformable");
            Err(rejection)
        }
        CallShape::SingleTag(tag) => {
            trace!("single tag");
            Ok(open_element(tag, call.span, ctx))
        }
        CallShape::TagWithPropsOrChild { tag, second } => {
            trace!("tag with props or child");
            let element = open_element(tag, call.span, ctx);
            Ok(match second {
                SecondArg::Props(props) => element.with_attributes(build_attributes(props)),
                SecondArg::Spread(expr) => element.with_attributes([spread(expr)]),
                SecondArg::Child(expr) => inject_children(element, [expr], ctx),
            })
        }
        CallShape::TagWithPropsAndChildren {
            tag,
            second,
            children,
        } => {
            trace!(children = children.len(), "tag with props and children");
            let mut element = open_element(tag, call.span, ctx);
            let mut arguments = Vec::with_capacity(children.len() + 1);
            match second {
                SecondArg::Props(props) => {
                    element = element.with_attributes(build_attributes(props));
                }
                SecondArg::Spread(expr) => element = element.with_attributes([spread(expr)]),
                SecondArg::Child(expr) => arguments.push(expr),
            }
            arguments.extend(children);
            Ok(inject_children(element, arguments, ctx))
        }
    }
}

/// Creates the bare element for a tag, with descriptor attributes first.
fn open_element(tag: TagRef, span: Span, ctx: &TraversalContext) -> MarkupElement {
    match tag {
        TagRef::Descriptor(descriptor) => {
            let mut attributes = Vec::with_capacity(2);
            if let Some(class_name) = descriptor.class_name {
                attributes.push(Attribute::literal(
                    ctx.class_attribute(),
                    string_literal(&class_name, DUMMY_SP),
                ));
            }
            if let Some(id) = descriptor.id {
                attributes.push(Attribute::literal("id", string_literal(&id, DUMMY_SP)));
            }
            MarkupElement::new(ElementName::Tag(descriptor.tag), span).with_attributes(attributes)
        }
        TagRef::Component(name) => MarkupElement::new(ElementName::Component(name), span),
        TagRef::Member(path) => MarkupElement::new(ElementName::Member(path), span),
    }
}

fn spread(expr: &Expr) -> Attribute {
    Attribute::Spread(Box::new(expr.clone()))
}

/// Attaches the children produced by each children argument, in order.
///
/// An element that ends up with no children stays self-closing.
fn inject_children<'a>(
    element: MarkupElement,
    arguments: impl IntoIterator<Item = &'a Expr>,
    ctx: &TraversalContext,
) -> MarkupElement {
    let mut children = Vec::new();
    for argument in arguments {
        lower_children(argument, ctx, &mut children);
    }
    if children.is_empty() {
        element
    } else {
        element.close_around(children)
    }
}

/// Lowers one children argument.
pub fn lower_children(argument: &Expr, ctx: &TraversalContext, out: &mut Vec<MarkupChild>) {
    match peel_parens(argument) {
        Expr::Array(array) if array.elems.iter().flatten().all(|elem| elem.spread.is_none()) => {
            out.extend(
                array
                    .elems
                    .iter()
                    .flatten()
                    .map(|elem| lower_child(&elem.expr, ctx)),
            );
        }
        // A single argument lowers like a one-element array, so a lone
        // builder call becomes an element instead of an inert expression.
        _ => out.push(lower_child(argument, ctx)),
    }
}

fn lower_child(expr: &Expr, ctx: &TraversalContext) -> MarkupChild {
    if let Some(call) = as_builder_call(expr, ctx.builder()) {
        return match lower_call(call, ctx) {
            Ok(element) => MarkupChild::Element(element),
            Err(_) => MarkupChild::Expr(Box::new(expr.clone())),
        };
    }
    match peel_parens(expr) {
        Expr::Lit(Lit::Str(s)) => MarkupChild::Text(s.clone()),
        _ => MarkupChild::Expr(Box::new(expr.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::AttrValue;
    use crate::options::TransformOptions;
    use crate::test_utils::parse_expr;
    use crate::util::str_value;
    use pretty_assertions::assert_eq;

    fn lower(source: &str) -> Result<MarkupElement, Rejection> {
        lower_with(source, &TransformOptions::default())
    }

    fn lower_with(source: &str, options: &TransformOptions) -> Result<MarkupElement, Rejection> {
        let ctx = TraversalContext::new(options, false);
        let expr = parse_expr(source);
        match peel_parens(&expr) {
            Expr::Call(call) => lower_call(call, &ctx),
            other => panic!("expected a call, got {:?}", other),
        }
    }

    fn literal_attributes(element: &MarkupElement) -> Vec<(String, String)> {
        element
            .attributes()
            .iter()
            .filter_map(|attribute| match attribute {
                Attribute::Named {
                    name,
                    value: AttrValue::Literal(s),
                } => Some((name.to_string(), str_value(s)?.to_string())),
                _ => None,
            })
            .collect()
    }

    fn child_kinds(element: &MarkupElement) -> Vec<&'static str> {
        element
            .children()
            .iter()
            .map(|child| match child {
                MarkupChild::Text(_) => "text",
                MarkupChild::Element(_) => "element",
                MarkupChild::Expr(_) => "expr",
            })
            .collect()
    }

    #[test]
    fn test_single_tag_is_self_closing() {
        let element = lower("h('h1')").unwrap();
        assert_eq!(element.name(), &ElementName::Tag("h1".into()));
        assert!(element.attributes().is_empty());
        assert!(element.is_self_closing());
    }

    #[test]
    fn test_descriptor_attributes_precede_props() {
        let element = lower("h('a#home.nav.active', { href: '/' })").unwrap();
        assert_eq!(
            literal_attributes(&element),
            vec![
                ("className".to_string(), "nav active".to_string()),
                ("id".to_string(), "home".to_string()),
                ("href".to_string(), "/".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_empty_descriptor_attributes() {
        let element = lower("h('div')").unwrap();
        assert!(element.attributes().is_empty());
    }

    #[test]
    fn test_class_attribute_is_configurable() {
        let options = TransformOptions {
            class_attribute: "class".into(),
            ..TransformOptions::default()
        };
        let element = lower_with("h('.box')", &options).unwrap();
        assert_eq!(element.attributes()[0].name(), Some("class"));
    }

    #[test]
    fn test_nested_call_with_text() {
        let element = lower("h('div', {id: 'x'}, [h('span', 'hi')])").unwrap();
        assert!(!element.is_self_closing());
        assert_eq!(element.attributes().len(), 1);
        match element.children() {
            [MarkupChild::Element(span)] => {
                assert_eq!(span.name(), &ElementName::Tag("span".into()));
                assert!(!span.is_self_closing());
                assert!(
                    matches!(span.children(), [MarkupChild::Text(s)] if str_value(s) == Some("hi"))
                );
            }
            other => panic!("unexpected children {:?}", other),
        }
    }

    #[test]
    fn test_component_with_spread_props() {
        let element = lower("h(Comp, {...spreadMe, foo: 'bar'})").unwrap();
        assert_eq!(element.name(), &ElementName::Component("Comp".into()));
        assert!(element.is_self_closing());
        let names: Vec<_> = element.attributes().iter().map(Attribute::name).collect();
        assert_eq!(names, vec![None, Some("foo")]);
    }

    #[test]
    fn test_conditional_second_argument_is_child() {
        let element = lower("h('div', condition ? 'a' : 'b')").unwrap();
        assert!(element.attributes().is_empty());
        assert_eq!(child_kinds(&element), vec!["expr"]);
    }

    #[test]
    fn test_spread_shaped_second_argument() {
        let element = lower("h(Button, getProps())").unwrap();
        assert!(element.is_self_closing());
        assert!(element.attributes()[0].is_spread());
    }

    #[test]
    fn test_array_order_is_preserved() {
        let element = lower("h('ul', [h('li', 'a'), h('li', 'b'), 'tail'])").unwrap();
        assert_eq!(child_kinds(&element), vec!["element", "element", "text"]);
    }

    #[test]
    fn test_refused_nested_call_is_placeholder() {
        let element = lower("h('div', [h(obj[computedKey]), h('p')])").unwrap();
        assert_eq!(child_kinds(&element), vec!["expr", "element"]);
    }

    #[test]
    fn test_refused_top_level_call() {
        assert_eq!(lower("h(obj[computedKey])"), Err(Rejection::ComputedMember));
    }

    #[test]
    fn test_lone_builder_call_collapses_to_element() {
        let element = lower("h('div', h('span'))").unwrap();
        assert_eq!(child_kinds(&element), vec!["element"]);

        let element = lower("h('div', {}, (h('span')))").unwrap();
        assert_eq!(child_kinds(&element), vec!["element"]);
    }

    #[test]
    fn test_second_argument_redirected_to_children() {
        let element = lower("h('p', 'Hello ', name, '!')").unwrap();
        assert!(element.attributes().is_empty());
        assert_eq!(child_kinds(&element), vec!["text", "expr", "text"]);

        let element = lower("h('p', props, 'text')").unwrap();
        assert!(element.attributes()[0].is_spread());
        assert_eq!(child_kinds(&element), vec!["text"]);
    }

    #[test]
    fn test_array_with_spread_is_kept_whole() {
        let element = lower("h('ul', {}, [first, ...rest])").unwrap();
        assert_eq!(child_kinds(&element), vec!["expr"]);
    }

    #[test]
    fn test_holes_and_empty_arrays() {
        let element = lower("h('ul', {}, [a, , b])").unwrap();
        assert_eq!(child_kinds(&element), vec!["expr", "expr"]);

        let element = lower("h('ul', {}, [])").unwrap();
        assert!(element.is_self_closing());
    }

    #[test]
    fn test_member_component() {
        let element = lower("h(Foo.Bar, 'x')").unwrap();
        assert_eq!(
            element.name(),
            &ElementName::Member(vec!["Foo".into(), "Bar".into()])
        );
    }
}
