//! Shared test host
//!
//! An in-memory [`LoaderHost`] with a fixed resolution table, canned
//! manifests, optional latency, and records of everything the loader reports.

#![allow(dead_code)]

use async_trait::async_trait;
use component_style_loader::{
    BuildContext, Diagnostic, LoaderError, LoaderWarning, ManifestReader, Mode, ModuleResolver,
    PackageManifest,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct MockHost {
    mode: Mode,
    resolutions: HashMap<(PathBuf, String), PathBuf>,
    manifests: HashMap<PathBuf, PackageManifest>,
    latency: Option<Duration>,
    resolve_calls: Mutex<Vec<(PathBuf, String)>>,
    manifest_reads: AtomicUsize,
    dependencies: Mutex<Vec<PathBuf>>,
    warnings: Mutex<Vec<LoaderWarning>>,
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MockHost {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            resolutions: HashMap::new(),
            manifests: HashMap::new(),
            latency: None,
            resolve_calls: Mutex::new(Vec::new()),
            manifest_reads: AtomicUsize::new(0),
            dependencies: Mutex::new(Vec::new()),
            warnings: Mutex::new(Vec::new()),
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    pub fn development() -> Self {
        Self::new(Mode::Development)
    }

    pub fn production() -> Self {
        Self::new(Mode::Production)
    }

    /// `request` imported from `context` resolves to `resolved`
    pub fn with_file(mut self, context: &str, request: &str, resolved: &str) -> Self {
        self.resolutions.insert(
            (PathBuf::from(context), request.to_string()),
            PathBuf::from(resolved),
        );
        self
    }

    /// `lib/package.json` resolves from `context` to `<lib_dir>/package.json`,
    /// whose content is `manifest_json`
    pub fn with_library(mut self, context: &str, lib: &str, lib_dir: &str, manifest_json: &str) -> Self {
        let manifest_path = Path::new(lib_dir).join("package.json");
        self.resolutions.insert(
            (PathBuf::from(context), format!("{}/package.json", lib)),
            manifest_path.clone(),
        );
        let manifest = PackageManifest::from_json(&manifest_path, manifest_json)
            .expect("test manifest must parse");
        self.manifests.insert(manifest_path, manifest);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn resolve_calls(&self) -> Vec<(PathBuf, String)> {
        self.resolve_calls.lock().unwrap().clone()
    }

    pub fn resolve_count(&self, request: &str) -> usize {
        self.resolve_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, r)| r == request)
            .count()
    }

    pub fn manifest_reads(&self) -> usize {
        self.manifest_reads.load(Ordering::SeqCst)
    }

    pub fn dependencies(&self) -> Vec<PathBuf> {
        self.dependencies.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<LoaderWarning> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModuleResolver for MockHost {
    async fn resolve(&self, context: &Path, request: &str) -> Result<PathBuf, LoaderError> {
        self.resolve_calls
            .lock()
            .unwrap()
            .push((context.to_path_buf(), request.to_string()));
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.resolutions
            .get(&(context.to_path_buf(), request.to_string()))
            .cloned()
            .ok_or_else(|| LoaderError::not_found(request, context))
    }
}

#[async_trait]
impl ManifestReader for MockHost {
    async fn read_manifest(&self, path: &Path) -> Result<PackageManifest, LoaderError> {
        self.manifest_reads.fetch_add(1, Ordering::SeqCst);
        self.manifests
            .get(path)
            .cloned()
            .ok_or_else(|| LoaderError::Manifest {
                path: path.to_path_buf(),
                reason: "no such manifest".to_string(),
            })
    }
}

impl BuildContext for MockHost {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn add_dependency(&self, path: &Path) {
        self.dependencies.lock().unwrap().push(path.to_path_buf());
    }

    fn emit_warning(&self, warning: LoaderWarning) {
        self.warnings.lock().unwrap().push(warning);
    }

    fn report_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic);
    }
}
