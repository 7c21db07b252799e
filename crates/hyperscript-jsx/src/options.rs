//! Transform configuration.

use smol_str::SmolStr;

/// Options for [`transform_module`](crate::transform_module).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TransformOptions {
    /// Identifier bound to the builder function.
    pub builder: SmolStr,
    /// Only transform modules that import or require the builder from one of
    /// [`import_sources`](Self::import_sources).
    pub require_import: bool,
    /// Module specifiers that provide the builder.
    pub import_sources: Vec<SmolStr>,
    /// Attribute name emitted for tag-descriptor classes.
    pub class_attribute: SmolStr,
    /// Remove the builder import or `require` once no reference is left.
    pub prune_import: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            builder: SmolStr::new_static("h"),
            require_import: false,
            import_sources: vec![SmolStr::new_static("react-hyperscript")],
            class_attribute: SmolStr::new_static("className"),
            prune_import: false,
        }
    }
}
