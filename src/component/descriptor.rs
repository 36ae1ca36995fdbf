//! Component descriptor normalization
//!
//! A [`RawComponentSpec`] is merged with the defaults and with the style
//! extension inherited from its parent library into a [`DescriptorDraft`].
//! The draft becomes a [`ComponentDescriptor`] once it has a test pattern,
//! either its own or one derived from the library directory.

use crate::config::{
    Pattern, RawComponentSpec, DEFAULT_ASSETS_RULE, DEFAULT_COMPONENT_RULE,
    DEFAULT_STYLE_EXTENSION, STYLE_BASE_MODULE,
};
use crate::error::LoaderError;

/// Normalized per-component configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    /// Library this descriptor was declared for, if any
    pub library_ref: Option<String>,
    /// Base style module as written in the spec, without extension
    pub base_style_file: Option<String>,
    /// Files this descriptor applies to
    pub test_pattern: Pattern,
    /// Asset index files among the matched ones
    pub assets_rule: Pattern,
    /// Component entry files among the matched ones
    pub component_rule: Pattern,
    /// Stylesheet extension
    pub style_extension: String,
    /// `./style/index.<ext>`, resolved against each component file's directory
    pub resolved_style_path: String,
    /// `<baseStyle>.<ext>`, resolved against the declaring directory
    pub resolved_base_style_path: Option<String>,
}

/// A descriptor under construction
#[derive(Debug, Clone)]
pub struct DescriptorDraft {
    pub library_ref: Option<String>,
    pub base_style_file: Option<String>,
    pub test_pattern: Option<Pattern>,
    pub assets_rule: Pattern,
    pub component_rule: Pattern,
    pub style_extension: String,
    pub resolved_style_path: String,
    pub resolved_base_style_path: Option<String>,
}

impl DescriptorDraft {
    /// Merge `spec` over the defaults and the parent's style extension.
    /// Values set on the spec win.
    pub fn normalize(
        spec: &RawComponentSpec,
        parent_style: Option<&str>,
    ) -> Result<Self, LoaderError> {
        let style_extension = non_empty(spec.style.as_deref())
            .or(parent_style)
            .unwrap_or(DEFAULT_STYLE_EXTENSION)
            .to_string();

        let base_style_file = non_empty(spec.base_style.as_deref()).map(str::to_string);
        let resolved_base_style_path = base_style_file
            .as_ref()
            .map(|base| format!("{}.{}", base, style_extension));

        let assets_rule = match &spec.assets_rule {
            Some(rule) => rule.clone(),
            None => Pattern::new(DEFAULT_ASSETS_RULE)?,
        };
        let component_rule = match &spec.component_rule {
            Some(rule) => rule.clone(),
            None => Pattern::new(DEFAULT_COMPONENT_RULE)?,
        };

        Ok(Self {
            library_ref: non_empty(spec.lib.as_deref()).map(str::to_string),
            base_style_file,
            test_pattern: spec.test.clone(),
            assets_rule,
            component_rule,
            resolved_style_path: format!("{}.{}", STYLE_BASE_MODULE, style_extension),
            style_extension,
            resolved_base_style_path,
        })
    }

    /// Freeze the draft; `None` if it never received a test pattern
    pub fn finish(self) -> Option<ComponentDescriptor> {
        let test_pattern = self.test_pattern?;
        Some(ComponentDescriptor {
            library_ref: self.library_ref,
            base_style_file: self.base_style_file,
            test_pattern,
            assets_rule: self.assets_rule,
            component_rule: self.component_rule,
            style_extension: self.style_extension,
            resolved_style_path: self.resolved_style_path,
            resolved_base_style_path: self.resolved_base_style_path,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
