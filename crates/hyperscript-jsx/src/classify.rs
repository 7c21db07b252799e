//! Call signature classification.
//!
//! Decides which construction path a builder call takes, or why it cannot be
//! rewritten. Only statically known tags and components qualify; every other
//! first-argument shape is refused with a [`Rejection`].

use crate::tag::TagDescriptor;
use crate::util::{is_builder_callee, peel_parens, str_value};
use smol_str::SmolStr;
use swc_ecma_ast::{CallExpr, Expr, Lit, MemberExpr, MemberProp, ObjectLit, Tpl};

/// Why a builder call was left as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// `h()`
    NoArguments,
    /// `h(...args)` or a spread in any argument position.
    SpreadArgument,
    /// `h<Props>(...)`
    TypeArguments,
    /// `` h(`${tag}`) ``
    InterpolatedTemplate,
    /// `h(components[name])`
    ComputedMember,
    /// `h(prefix + 'div')`
    BinaryTag,
    /// `h(pick())`
    CallTag,
    /// `h(cond ? A : B)`
    ConditionalTag,
    /// `h(component)`: JSX would read a lowercase name as an intrinsic tag.
    LowercaseComponent,
    /// `h('Button')`: JSX would read a capitalised name as a variable.
    CapitalizedTagString,
    /// A tag string whose tag part is not a JSX element name.
    InvalidTagName,
    /// Any other first-argument shape.
    UnsupportedTag,
}

impl Rejection {
    /// Returns a short machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::NoArguments => "no-arguments",
            Rejection::SpreadArgument => "spread-argument",
            Rejection::TypeArguments => "type-arguments",
            Rejection::InterpolatedTemplate => "interpolated-template",
            Rejection::ComputedMember => "computed-member",
            Rejection::BinaryTag => "binary-tag",
            Rejection::CallTag => "call-tag",
            Rejection::ConditionalTag => "conditional-tag",
            Rejection::LowercaseComponent => "lowercase-component",
            Rejection::CapitalizedTagString => "capitalized-tag-string",
            Rejection::InvalidTagName => "invalid-tag-name",
            Rejection::UnsupportedTag => "unsupported-tag",
        }
    }

    /// Returns a human-readable explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::NoArguments => "call has no arguments",
            Rejection::SpreadArgument => "arguments are spread",
            Rejection::TypeArguments => "call has explicit type arguments",
            Rejection::InterpolatedTemplate => "tag is a template literal with interpolations",
            Rejection::ComputedMember => "component is a computed member access",
            Rejection::BinaryTag => "tag is a binary expression",
            Rejection::CallTag => "tag is the result of a call",
            Rejection::ConditionalTag => "tag is a conditional expression",
            Rejection::LowercaseComponent => "component identifier starts with a lowercase letter",
            Rejection::CapitalizedTagString => "tag string starts with an uppercase letter",
            Rejection::InvalidTagName => "tag string is not a valid element name",
            Rejection::UnsupportedTag => "tag is not a string, identifier or member path",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// A statically known first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRef {
    /// A tag descriptor string such as `'li#item.active'`.
    Descriptor(TagDescriptor),
    /// A component identifier such as `Button`.
    Component(SmolStr),
    /// A component member path such as `Foo.Bar`.
    Member(Vec<SmolStr>),
}

/// The role of the second argument.
#[derive(Debug, Clone, Copy)]
pub enum SecondArg<'a> {
    /// An object literal whose entries become attributes.
    Props(&'a ObjectLit),
    /// A value spread onto the element.
    Spread(&'a Expr),
    /// A child (or children argument) of the element.
    Child(&'a Expr),
}

/// The construction path for a builder call.
#[derive(Debug, Clone)]
pub enum CallShape<'a> {
    /// `h(tag)`
    SingleTag(TagRef),
    /// `h(tag, propsOrChild)`
    TagWithPropsOrChild {
        /// The element tag or component.
        tag: TagRef,
        /// The second argument.
        second: SecondArg<'a>,
    },
    /// `h(tag, props, children...)`
    TagWithPropsAndChildren {
        /// The element tag or component.
        tag: TagRef,
        /// The second argument.
        second: SecondArg<'a>,
        /// Arguments three and onwards, each a children argument.
        children: Vec<&'a Expr>,
    },
    /// The call cannot be rewritten.
    NotTransformable(Rejection),
}

/// Classifies a builder call.
pub fn classify<'a>(call: &'a CallExpr, builder: &str) -> CallShape<'a> {
    if call.type_args.is_some() {
        return CallShape::NotTransformable(Rejection::TypeArguments);
    }
    let Some(first) = call.args.first() else {
        return CallShape::NotTransformable(Rejection::NoArguments);
    };
    if call.args.iter().any(|arg| arg.spread.is_some()) {
        return CallShape::NotTransformable(Rejection::SpreadArgument);
    }

    let tag = match classify_tag(&first.expr) {
        Ok(tag) => tag,
        Err(rejection) => return CallShape::NotTransformable(rejection),
    };

    match call.args.as_slice() {
        [_] => CallShape::SingleTag(tag),
        [_, second] => CallShape::TagWithPropsOrChild {
            tag,
            second: classify_second(&second.expr, builder),
        },
        [_, second, rest @ ..] => CallShape::TagWithPropsAndChildren {
            tag,
            second: classify_second(&second.expr, builder),
            children: rest.iter().map(|arg| arg.expr.as_ref()).collect(),
        },
        [] => CallShape::NotTransformable(Rejection::NoArguments),
    }
}

/// Classifies the first argument of a builder call.
pub fn classify_tag(expr: &Expr) -> Result<TagRef, Rejection> {
    match peel_parens(expr) {
        Expr::Lit(Lit::Str(s)) => {
            let value = str_value(s).ok_or(Rejection::UnsupportedTag)?;
            descriptor_tag(value)
        }
        Expr::Tpl(tpl) => descriptor_tag(static_template(tpl)?),
        Expr::Ident(ident) => {
            let name = ident.sym.as_str();
            if name.starts_with(|c: char| c.is_ascii_lowercase()) {
                Err(Rejection::LowercaseComponent)
            } else {
                Ok(TagRef::Component(SmolStr::new(name)))
            }
        }
        Expr::Member(member) => member_path(member).map(TagRef::Member),
        Expr::Bin(_) => Err(Rejection::BinaryTag),
        Expr::Call(_) => Err(Rejection::CallTag),
        Expr::Cond(_) => Err(Rejection::ConditionalTag),
        _ => Err(Rejection::UnsupportedTag),
    }
}

/// Folds an interpolation-free template literal into its text.
fn static_template(tpl: &Tpl) -> Result<&str, Rejection> {
    if !tpl.exprs.is_empty() {
        return Err(Rejection::InterpolatedTemplate);
    }
    match tpl.quasis.as_slice() {
        [quasi] if !quasi.raw.as_str().contains('\\') => Ok(quasi.raw.as_str()),
        _ => Err(Rejection::UnsupportedTag),
    }
}

fn descriptor_tag(value: &str) -> Result<TagRef, Rejection> {
    let descriptor = TagDescriptor::parse(value);
    if !is_jsx_tag_name(&descriptor.tag) {
        return Err(Rejection::InvalidTagName);
    }
    if descriptor.tag.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Err(Rejection::CapitalizedTagString);
    }
    Ok(TagRef::Descriptor(descriptor))
}

/// Collects `Foo.Bar.Baz` into its segments.
fn member_path(member: &MemberExpr) -> Result<Vec<SmolStr>, Rejection> {
    let prop = match &member.prop {
        MemberProp::Ident(ident) => SmolStr::new(ident.sym.as_str()),
        MemberProp::Computed(_) => return Err(Rejection::ComputedMember),
        MemberProp::PrivateName(_) => return Err(Rejection::UnsupportedTag),
    };

    let mut path = match peel_parens(&member.obj) {
        Expr::Ident(ident) => vec![SmolStr::new(ident.sym.as_str())],
        Expr::Member(inner) => member_path(inner)?,
        _ => return Err(Rejection::UnsupportedTag),
    };
    path.push(prop);
    Ok(path)
}

fn classify_second<'a>(expr: &'a Expr, builder: &str) -> SecondArg<'a> {
    match peel_parens(expr) {
        Expr::Object(props) => SecondArg::Props(props),
        _ if is_spread_shaped(expr, builder) => SecondArg::Spread(expr),
        _ => SecondArg::Child(expr),
    }
}

/// The spread-versus-child policy for a non-object second argument.
///
/// A call that is not itself a builder call, a bare identifier, a member
/// expression or a type assertion (`as`, `<T>x`, `as const`, `satisfies`) is
/// spread onto the element as props.
/// Everything else (literals, arrays, builder calls, conditionals, ...) is
/// rendered as a child. The boundary is heuristic: `h('p', text)` with a
/// string variable is spread even though a child was meant.
pub fn is_spread_shaped(expr: &Expr, builder: &str) -> bool {
    match peel_parens(expr) {
        Expr::Call(call) => !is_builder_callee(&call.callee, builder),
        Expr::Ident(_)
        | Expr::Member(_)
        | Expr::TsAs(_)
        | Expr::TsTypeAssertion(_)
        | Expr::TsConstAssertion(_)
        | Expr::TsSatisfies(_) => true,
        _ => false,
    }
}

/// Returns whether `name` can be written as an intrinsic JSX element name.
fn is_jsx_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}
