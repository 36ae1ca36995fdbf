//! Host build pipeline contract
//!
//! The loader never touches module resolution, manifests or the dependency
//! graph directly. It consumes these capabilities from the host through the
//! traits below, so any bundler integration (or the bundled filesystem
//! implementation in [`fs`]) can drive it.

pub mod fs;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::component::manifest::PackageManifest;
use crate::config::Mode;
use crate::diagnostics::{Diagnostic, LoaderWarning};
use crate::error::LoaderError;

pub use fs::{FsHost, FsManifestReader, FsResolver};

/// Asynchronous name-to-absolute-path resolution scoped to a directory
#[async_trait]
pub trait ModuleResolver: Send + Sync {
    /// Resolve `request` as if imported from a file inside `context`
    async fn resolve(&self, context: &Path, request: &str) -> Result<PathBuf, LoaderError>;
}

/// Reads library manifests found through [`ModuleResolver`]
#[async_trait]
pub trait ManifestReader: Send + Sync {
    async fn read_manifest(&self, path: &Path) -> Result<PackageManifest, LoaderError>;
}

/// Per-build callbacks into the host
pub trait BuildContext: Send + Sync {
    /// Development or production build
    fn mode(&self) -> Mode;

    /// Register `path` as a build dependency of the file being transformed
    fn add_dependency(&self, path: &Path);

    /// Attach an advisory warning to the file being transformed
    fn emit_warning(&self, warning: LoaderWarning);

    /// Receive a development-mode diagnostic
    fn report_diagnostic(&self, diagnostic: Diagnostic);
}

/// Everything a transformation needs from the host
pub trait LoaderHost: ModuleResolver + ManifestReader + BuildContext {}

impl<T: ModuleResolver + ManifestReader + BuildContext> LoaderHost for T {}
