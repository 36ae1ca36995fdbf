//! Filesystem-backed host
//!
//! Resolves requests the way Node does for the cases the loader produces:
//! relative and absolute paths, extension and `index` probing, and bare
//! package names looked up through ancestor `node_modules` directories.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

use crate::component::manifest::PackageManifest;
use crate::config::Mode;
use crate::diagnostics::{Diagnostic, LoaderWarning};
use crate::error::LoaderError;
use crate::host::{BuildContext, ManifestReader, ModuleResolver};

/// Extensions probed when a request names no existing file
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".mjs", ".jsx", ".ts", ".tsx", ".json"];

/// Node-style resolver over the real filesystem
#[derive(Debug, Clone)]
pub struct FsResolver {
    extensions: Vec<String>,
}

impl Default for FsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FsResolver {
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the probed extensions (each including its leading dot)
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    fn candidates(context: &Path, request: &str) -> Vec<PathBuf> {
        let request_path = Path::new(request);
        if request_path.is_absolute() {
            return vec![normalize_path(request_path)];
        }
        if request.starts_with("./") || request.starts_with("../") || request == "." || request == ".." {
            return vec![normalize_path(&context.join(request_path))];
        }
        context
            .ancestors()
            .filter(|dir| dir.file_name().map_or(true, |name| name != "node_modules"))
            .map(|dir| dir.join("node_modules").join(request_path))
            .collect()
    }

    async fn probe(&self, base: &Path) -> Option<PathBuf> {
        if is_file(base).await {
            return Some(base.to_path_buf());
        }
        for ext in &self.extensions {
            let candidate = with_suffix(base, ext);
            if is_file(&candidate).await {
                return Some(candidate);
            }
        }
        if is_dir(base).await {
            for ext in &self.extensions {
                let candidate = base.join(format!("index{}", ext));
                if is_file(&candidate).await {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

#[async_trait]
impl ModuleResolver for FsResolver {
    async fn resolve(&self, context: &Path, request: &str) -> Result<PathBuf, LoaderError> {
        for candidate in Self::candidates(context, request) {
            trace!("Probing {:?} for '{}'", candidate, request);
            if let Some(found) = self.probe(&candidate).await {
                return Ok(found);
            }
        }
        Err(LoaderError::not_found(request, context))
    }
}

/// Reads `package.json` files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestReader;

#[async_trait]
impl ManifestReader for FsManifestReader {
    async fn read_manifest(&self, path: &Path) -> Result<PackageManifest, LoaderError> {
        PackageManifest::from_file(path).await
    }
}

/// Standalone host: filesystem resolution plus in-memory records of
/// dependencies, warnings and diagnostics
#[derive(Debug, Default)]
pub struct FsHost {
    resolver: FsResolver,
    manifests: FsManifestReader,
    mode: Mode,
    dependencies: Mutex<Vec<PathBuf>>,
    warnings: Mutex<Vec<LoaderWarning>>,
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl FsHost {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_resolver(mut self, resolver: FsResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Drain the dependencies registered so far
    pub fn take_dependencies(&self) -> Vec<PathBuf> {
        std::mem::take(&mut *lock(&self.dependencies))
    }

    /// Drain the warnings emitted so far
    pub fn take_warnings(&self) -> Vec<LoaderWarning> {
        std::mem::take(&mut *lock(&self.warnings))
    }

    /// Drain the diagnostics reported so far
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *lock(&self.diagnostics))
    }
}

#[async_trait]
impl ModuleResolver for FsHost {
    async fn resolve(&self, context: &Path, request: &str) -> Result<PathBuf, LoaderError> {
        self.resolver.resolve(context, request).await
    }
}

#[async_trait]
impl ManifestReader for FsHost {
    async fn read_manifest(&self, path: &Path) -> Result<PackageManifest, LoaderError> {
        self.manifests.read_manifest(path).await
    }
}

impl BuildContext for FsHost {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn add_dependency(&self, path: &Path) {
        lock(&self.dependencies).push(path.to_path_buf());
    }

    fn emit_warning(&self, warning: LoaderWarning) {
        lock(&self.warnings).push(warning);
    }

    fn report_diagnostic(&self, diagnostic: Diagnostic) {
        lock(&self.diagnostics).push(diagnostic);
    }
}

// Records stay usable even if a panicking thread held the lock
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Lexically remove `.` and `..` components
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
