//! Per-file transformation
//!
//! Given the descriptor that applies to a file, decides whether the file is
//! an asset index (syntactic rewrite), a component entry (style injection) or
//! neither (passthrough).

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::component::descriptor::ComponentDescriptor;
use crate::diagnostics::{Diagnostics, LoaderWarning, ResolutionTarget};
use crate::host::LoaderHost;
use crate::transform::assets::rewrite_asset_exports;
use crate::transform::inject::{Placement, StyleInjector};

static DEFAULT_REEXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"export\s*\{\s*default(?:\s+as\s+[\w$]+)?\s*\}\s*from\s*['"][^'"]+['"]"#)
        .expect("valid re-export pattern")
});

/// How a matched file is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Asset,
    Component,
    Other,
}

impl FileKind {
    /// Asset rule is checked first; an asset index is never a component
    pub fn classify(descriptor: &ComponentDescriptor, path: &Path) -> Self {
        if descriptor.assets_rule.is_match(path) {
            FileKind::Asset
        } else if descriptor.component_rule.is_match(path) {
            FileKind::Component
        } else {
            FileKind::Other
        }
    }
}

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// No descriptor, or a matched file that is neither asset nor component
    Passthrough,
    /// Asset constant exports rewritten into re-exports
    AssetsRewritten,
    /// Component stylesheet appended
    StyleInjected,
    /// Component stylesheet could not be resolved; source unchanged
    StyleSkipped,
    /// Base styles prepended to the base-style target
    BaseStylesPrepended,
}

/// Output of one transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub code: String,
    pub kind: TransformKind,
}

impl Transformed {
    pub fn new(code: impl Into<String>, kind: TransformKind) -> Self {
        Self {
            code: code.into(),
            kind,
        }
    }

    pub fn passthrough(source: &str) -> Self {
        Self::new(source, TransformKind::Passthrough)
    }
}

/// Applies a descriptor to one file
pub struct Transformer<'a> {
    host: &'a dyn LoaderHost,
    diagnostics: Diagnostics<'a>,
}

impl<'a> Transformer<'a> {
    pub fn new(host: &'a dyn LoaderHost) -> Self {
        Self {
            host,
            diagnostics: Diagnostics::new(host),
        }
    }

    pub async fn transform(
        &self,
        source: &str,
        resource_path: &Path,
        descriptor: Option<&ComponentDescriptor>,
    ) -> Transformed {
        let Some(descriptor) = descriptor else {
            return Transformed::passthrough(source);
        };

        match FileKind::classify(descriptor, resource_path) {
            FileKind::Asset => {
                debug!("Rewriting asset exports in {:?}", resource_path);
                Transformed::new(rewrite_asset_exports(source), TransformKind::AssetsRewritten)
            }
            FileKind::Component => {
                self.inject_component_style(source, resource_path, descriptor)
                    .await
            }
            FileKind::Other => Transformed::passthrough(source),
        }
    }

    async fn inject_component_style(
        &self,
        source: &str,
        resource_path: &Path,
        descriptor: &ComponentDescriptor,
    ) -> Transformed {
        let context = resource_path.parent().unwrap_or_else(|| Path::new(""));
        let style_request = descriptor.resolved_style_path.as_str();

        let resolved = match self.host.resolve(context, style_request).await {
            Ok(path) => path,
            Err(e) => {
                self.diagnostics.resolution_failure(
                    ResolutionTarget::StyleModule,
                    style_request,
                    context,
                    e,
                );
                return Transformed::new(source, TransformKind::StyleSkipped);
            }
        };

        self.host.add_dependency(&resolved);
        if DEFAULT_REEXPORT.is_match(source) {
            self.diagnostics.warn(LoaderWarning::FragileReexport {
                resource: resource_path.to_path_buf(),
            });
        }

        debug!("Injecting {} into {:?}", style_request, resource_path);
        Transformed::new(
            StyleInjector::inject(source, &[style_request], Placement::Append),
            TransformKind::StyleInjected,
        )
    }
}
