//! Props object to attribute list conversion.

use crate::markup::{AttrValue, Attribute};
use crate::util::{peel_parens, str_value};
use swc_common::DUMMY_SP;
use swc_ecma_ast::{Expr, Lit, ObjectLit, Prop, PropName, PropOrSpread};

/// Converts a props object into attributes, preserving declaration order.
pub fn build_attributes(props: &ObjectLit) -> Vec<Attribute> {
    props.props.iter().map(build_attribute).collect()
}

fn build_attribute(entry: &PropOrSpread) -> Attribute {
    let prop = match entry {
        PropOrSpread::Spread(spread) => return Attribute::Spread(spread.expr.clone()),
        PropOrSpread::Prop(prop) => prop,
    };

    match prop.as_ref() {
        Prop::Shorthand(ident) => {
            Attribute::expr(ident.sym.as_str(), Box::new(Expr::Ident(ident.clone())))
        }
        Prop::KeyValue(kv) => match attribute_name(&kv.key) {
            Some(name) => Attribute::Named {
                name: name.into(),
                value: attribute_value(&kv.value),
            },
            None => single_entry_spread(prop.as_ref()),
        },
        // Methods and accessors have no attribute form; keep them as written.
        Prop::Assign(_) | Prop::Getter(_) | Prop::Setter(_) | Prop::Method(_) => {
            single_entry_spread(prop.as_ref())
        }
    }
}

/// Returns the attribute name for a property key, if it can be written as one.
fn attribute_name(key: &PropName) -> Option<&str> {
    let name = match key {
        PropName::Ident(ident) => ident.sym.as_str(),
        PropName::Str(s) => str_value(s)?,
        PropName::Computed(computed) => match peel_parens(&computed.expr) {
            Expr::Lit(Lit::Str(s)) => str_value(s)?,
            _ => return None,
        },
        PropName::Num(_) | PropName::BigInt(_) => return None,
    };
    is_jsx_attribute_name(name).then_some(name)
}

fn attribute_value(value: &Expr) -> AttrValue {
    match peel_parens(value) {
        Expr::Lit(Lit::Str(s)) => AttrValue::Literal(s.clone()),
        _ => AttrValue::Expr(Box::new(value.clone())),
    }
}

/// Wraps one property in an object literal and spreads it.
fn single_entry_spread(prop: &Prop) -> Attribute {
    Attribute::Spread(Box::new(Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props: vec![PropOrSpread::Prop(Box::new(prop.clone()))],
    })))
}

/// Returns whether `name` is a plain (non-namespaced) JSX attribute name.
pub fn is_jsx_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-'))
}
