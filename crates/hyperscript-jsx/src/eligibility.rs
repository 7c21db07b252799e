//! Call-site eligibility.
//!
//! A builder call is rewritten by the traversal only when it sits directly in
//! one of the containers below. Calls anywhere else are consumed as data (an
//! argument to another function, a default export, ...) and stay calls.

/// The syntactic slot holding a candidate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// `return h(...)`
    Return,
    /// `c ? h(...) : h(...)`
    Conditional,
    /// `() => h(...)`
    ArrowBody,
    /// `c && h(...)`, `c || h(...)`
    Logical,
    /// `{ key: h(...) }`
    PropertyValue,
    /// `const x = h(...)`
    VarInit,
    /// `h(...);`
    ExprStatement,
    /// `<div>{h(...)}</div>`
    JsxExprContainer,
    /// `x = h(...)`
    AssignRight,
    /// `[h(...)]`
    ArrayElement,
    /// `f(h(...))`
    CallArgument,
    /// `export default h(...)`
    ExportDefault,
}

impl Container {
    /// Whether a builder call directly in this slot is a top-level call.
    pub fn admits_top_level_call(self) -> bool {
        !matches!(self, Container::CallArgument | Container::ExportDefault)
    }

    /// Returns a short name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Container::Return => "return",
            Container::Conditional => "conditional",
            Container::ArrowBody => "arrow-body",
            Container::Logical => "logical",
            Container::PropertyValue => "property-value",
            Container::VarInit => "var-init",
            Container::ExprStatement => "expression-statement",
            Container::JsxExprContainer => "jsx-expression",
            Container::AssignRight => "assignment",
            Container::ArrayElement => "array-element",
            Container::CallArgument => "call-argument",
            Container::ExportDefault => "export-default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligible_containers() {
        let eligible = [
            Container::Return,
            Container::Conditional,
            Container::ArrowBody,
            Container::Logical,
            Container::PropertyValue,
            Container::VarInit,
            Container::ExprStatement,
            Container::JsxExprContainer,
            Container::AssignRight,
            Container::ArrayElement,
        ];
        assert!(eligible.iter().all(|c| c.admits_top_level_call()));
    }

    #[test]
    fn test_ineligible_containers() {
        assert!(!Container::CallArgument.admits_top_level_call());
        assert!(!Container::ExportDefault.admits_top_level_call());
    }
}
