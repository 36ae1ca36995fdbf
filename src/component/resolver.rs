//! Component configuration resolution
//!
//! Turns the raw component specs into the ordered override table and the
//! aggregated base-style list. Library references are expanded depth-first
//! through the library's `package.json`, which may declare further component
//! specs scoped to the library's directory.
//!
//! Resolution never fails because something could not be found: a missing
//! base style or library manifest is reported as a development diagnostic and
//! the affected piece is skipped.

use futures::future::{BoxFuture, FutureExt};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::component::descriptor::DescriptorDraft;
use crate::component::manifest::MANIFEST_FILE;
use crate::component::matcher::OverrideTable;
use crate::config::{Pattern, RawComponentSpec};
use crate::diagnostics::{Diagnostic, Diagnostics, ResolutionTarget};
use crate::error::LoaderError;
use crate::host::LoaderHost;

/// Result of resolving a component configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    /// Descriptors in ascending override priority
    pub descriptors: OverrideTable,
    /// Absolute base-style paths in ascending override priority
    pub base_styles: Vec<PathBuf>,
}

/// Accumulator threaded through the depth-first expansion
#[derive(Default)]
struct Expansion {
    resolved: ResolvedConfig,
    /// Manifests currently being expanded, outermost first
    stack: Vec<PathBuf>,
}

/// Resolves raw component specs against a host
pub struct ConfigResolver<'a> {
    host: &'a dyn LoaderHost,
    diagnostics: Diagnostics<'a>,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(host: &'a dyn LoaderHost) -> Self {
        Self {
            host,
            diagnostics: Diagnostics::new(host),
        }
    }

    /// Resolve `specs` with top-level requests relative to `base_dir`
    pub async fn resolve(
        &self,
        specs: &[RawComponentSpec],
        base_dir: &Path,
    ) -> Result<ResolvedConfig, LoaderError> {
        let mut expansion = Expansion::default();
        self.expand(&mut expansion, specs, base_dir, None).await?;

        let resolved = expansion.resolved;
        debug!(
            "Resolved {} component descriptors and {} base styles from {:?}",
            resolved.descriptors.len(),
            resolved.base_styles.len(),
            base_dir
        );
        Ok(resolved)
    }

    fn expand<'s>(
        &'s self,
        out: &'s mut Expansion,
        specs: &'s [RawComponentSpec],
        context: &'s Path,
        parent_style: Option<&'s str>,
    ) -> BoxFuture<'s, Result<(), LoaderError>> {
        async move {
            for (index, spec) in specs.iter().enumerate() {
                let mut draft = DescriptorDraft::normalize(spec, parent_style)?;

                if let Some(request) = &draft.resolved_base_style_path {
                    match self.host.resolve(context, request).await {
                        Ok(path) => out.resolved.base_styles.push(path),
                        Err(e) => self.diagnostics.resolution_failure(
                            ResolutionTarget::BaseStyle,
                            request,
                            context,
                            e,
                        ),
                    }
                }

                if let Some(lib) = draft.library_ref.clone() {
                    self.expand_library(out, &mut draft, &lib, context).await?;
                }

                // Appended after its own expansion, so a library entry
                // outranks the specs its manifest declared
                match draft.finish() {
                    Some(descriptor) => out.resolved.descriptors.push(descriptor),
                    None => self.diagnostics.report(Diagnostic::UnmatchableSpec { index }),
                }
            }
            Ok(())
        }
        .boxed()
    }

    async fn expand_library(
        &self,
        out: &mut Expansion,
        draft: &mut DescriptorDraft,
        lib: &str,
        context: &Path,
    ) -> Result<(), LoaderError> {
        let request = format!("{}/{}", lib, MANIFEST_FILE);
        let manifest_path = match self.host.resolve(context, &request).await {
            Ok(path) => path,
            Err(e) => {
                self.diagnostics
                    .resolution_failure(ResolutionTarget::Manifest, &request, context, e);
                return Ok(());
            }
        };
        let manifest = match self.host.read_manifest(&manifest_path).await {
            Ok(manifest) => manifest,
            Err(e) => {
                self.diagnostics
                    .resolution_failure(ResolutionTarget::Manifest, &request, context, e);
                return Ok(());
            }
        };

        let lib_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        draft.test_pattern = Some(Pattern::for_directory(&lib_dir)?);

        let nested = manifest.component_specs();
        if nested.is_empty() {
            return Ok(());
        }
        if out.stack.contains(&manifest_path) {
            self.diagnostics.report(Diagnostic::ExpansionCycle {
                manifest: manifest_path,
            });
            return Ok(());
        }

        debug!(
            "Expanding {} component specs from {:?}",
            nested.len(),
            manifest_path
        );
        out.stack.push(manifest_path);
        let result = self
            .expand(out, nested, &lib_dir, Some(&draft.style_extension))
            .await;
        out.stack.pop();
        result
    }
}
