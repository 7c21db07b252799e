//! Hyperscript to JSX rewriting for `swc_ecma_ast` modules.
//!
//! This crate rewrites calls in the hyperscript convention,
//! `h(tagOrComponent, propsOrChild?, ...children)`, into JSX elements:
//! - `h('li#item.active', 'Hi')` becomes `<li className="active" id="item">Hi</li>`
//! - `h(Button, {...props, kind: 'primary'})` becomes `<Button {...props} kind="primary"/>`
//! - nested calls in children arrays become nested elements
//!
//! Calls whose shape cannot be proven statically (computed tags, conditional
//! components, spread arguments, ...) are left as written and reported.
//!
//! # Example
//!
//! ```ignore
//! use hyperscript_jsx::{transform_module, TransformOptions};
//!
//! let report = transform_module(&mut module, &TransformOptions::default());
//! for skipped in &report.skipped {
//!     println!("{:?}: {}", skipped.span, skipped.reason);
//! }
//! ```

pub mod attributes;
pub mod classify;
pub mod context;
pub mod eligibility;
pub mod jsx;
pub mod lower;
pub mod markup;
mod options;
pub mod prune;
pub mod tag;
mod transform;
mod util;

#[cfg(test)]
mod test_utils;

pub use classify::{CallShape, Rejection};
pub use context::TraversalContext;
pub use markup::{AttrValue, Attribute, ElementName, MarkupChild, MarkupElement};
pub use options::TransformOptions;
pub use tag::TagDescriptor;
pub use transform::{transform_module, SkipReason, SkippedCall, TransformReport};
