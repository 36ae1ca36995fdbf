//! Loader entry point
//!
//! Every file goes through [`StyleLoader::run`], which always completes
//! asynchronously with a [`Transformed`] result, whatever the branch taken.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::cache::DescriptorCache;
use crate::component::resolver::{ConfigResolver, ResolvedConfig};
use crate::config::LoaderOptions;
use crate::diagnostics::Diagnostics;
use crate::error::LoaderError;
use crate::host::LoaderHost;
use crate::transform::inject::{Placement, StyleInjector};
use crate::transform::transformer::{TransformKind, Transformed, Transformer};

/// Per-build loader
pub struct StyleLoader {
    options: LoaderOptions,
    cache: Arc<DescriptorCache>,
}

impl StyleLoader {
    /// Loader backed by the process-wide descriptor cache
    pub fn new(options: LoaderOptions) -> Self {
        Self::with_cache(options, DescriptorCache::global())
    }

    /// Loader backed by its own descriptor cache
    pub fn with_cache(options: LoaderOptions, cache: Arc<DescriptorCache>) -> Self {
        Self { options, cache }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn cache(&self) -> &Arc<DescriptorCache> {
        &self.cache
    }

    /// Resolved descriptors, resolving them on first use.
    ///
    /// Top-level requests resolve from `rootDir`, or else from the directory
    /// of `resource_path`.
    pub async fn descriptors(
        &self,
        resource_path: &Path,
        host: &dyn LoaderHost,
    ) -> Result<Arc<ResolvedConfig>, LoaderError> {
        let diagnostics = Diagnostics::new(host);
        self.cache
            .get_or_resolve(&self.options, &diagnostics, move || async move {
                let base_dir = self.base_dir(resource_path);
                ConfigResolver::new(host)
                    .resolve(&self.options.components, &base_dir)
                    .await
            })
            .await
    }

    /// Transform one file
    pub async fn run(
        &self,
        source: &str,
        resource_path: &Path,
        host: &dyn LoaderHost,
    ) -> Result<Transformed, LoaderError> {
        let resolved = self.descriptors(resource_path, host).await?;

        if self.options.is_base_style_target(resource_path) {
            debug!(
                "Prepending {} base styles to {:?}",
                resolved.base_styles.len(),
                resource_path
            );
            for style in &resolved.base_styles {
                host.add_dependency(style);
            }
            return Ok(Transformed::new(
                StyleInjector::inject(source, &resolved.base_styles, Placement::Prepend),
                TransformKind::BaseStylesPrepended,
            ));
        }

        let descriptor = resolved.descriptors.lookup(resource_path);
        Ok(Transformer::new(host)
            .transform(source, resource_path, descriptor)
            .await)
    }

    fn base_dir(&self, resource_path: &Path) -> PathBuf {
        match &self.options.root_dir {
            Some(root) => root.clone(),
            None => resource_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}
