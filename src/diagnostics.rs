//! Non-fatal diagnostics
//!
//! Resolution failures degrade to "leave this piece unchanged" and are only
//! surfaced in development builds. The fragile re-export warning is advisory
//! and always emitted.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::Mode;
use crate::host::LoaderHost;

/// What a failed resolution was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTarget {
    /// A component's `./style/index.<ext>` module
    StyleModule,
    /// A spec's `baseStyle` file
    BaseStyle,
    /// A library's `package.json`
    Manifest,
}

impl fmt::Display for ResolutionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionTarget::StyleModule => write!(f, "style module"),
            ResolutionTarget::BaseStyle => write!(f, "base style"),
            ResolutionTarget::Manifest => write!(f, "library manifest"),
        }
    }
}

/// Development-only diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Style file, base-style file or manifest not found or unreadable
    ResolutionFailure {
        target: ResolutionTarget,
        request: String,
        context: PathBuf,
        reason: String,
    },
    /// Library expansion reached a manifest already being expanded
    ExpansionCycle { manifest: PathBuf },
    /// A spec ended up with no test pattern and can never match a file
    UnmatchableSpec { index: usize },
    /// Options differ from the ones the cached descriptors were resolved with
    StaleOptions,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ResolutionFailure {
                target,
                request,
                context,
                reason,
            } => write!(
                f,
                "{} '{}' is not resolved from {:?}: {}",
                target, request, context, reason
            ),
            Diagnostic::ExpansionCycle { manifest } => {
                write!(f, "library manifest {:?} is already being expanded", manifest)
            }
            Diagnostic::UnmatchableSpec { index } => write!(
                f,
                "component spec #{} has no test pattern and no resolvable lib",
                index
            ),
            Diagnostic::StaleOptions => write!(
                f,
                "loader options changed after component descriptors were cached; \
                 the first resolution stays in effect"
            ),
        }
    }
}

/// Advisory warning attached to a transformed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderWarning {
    /// The file re-exports a default export, which may bypass the injected
    /// stylesheet's cascade position
    FragileReexport { resource: PathBuf },
}

impl fmt::Display for LoaderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderWarning::FragileReexport { resource } => write!(
                f,
                "{:?}: `export {{ default }} from '...'` may lose the injected style; \
                 use `import A from '...'; export default A;` instead",
                resource
            ),
        }
    }
}

/// Development-mode gate in front of a host's diagnostics channel
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    mode: Mode,
    sink: &'a dyn LoaderHost,
}

impl<'a> Diagnostics<'a> {
    pub fn new(sink: &'a dyn LoaderHost) -> Self {
        Self {
            mode: sink.mode(),
            sink,
        }
    }

    /// Report a diagnostic; dropped outside development builds
    pub fn report(&self, diagnostic: Diagnostic) {
        if !self.mode.is_development() {
            return;
        }
        warn!("{}", diagnostic);
        self.sink.report_diagnostic(diagnostic);
    }

    pub fn resolution_failure(
        &self,
        target: ResolutionTarget,
        request: &str,
        context: &Path,
        reason: impl fmt::Display,
    ) {
        self.report(Diagnostic::ResolutionFailure {
            target,
            request: request.to_string(),
            context: context.to_path_buf(),
            reason: reason.to_string(),
        });
    }

    /// Advisory warnings are not gated by mode
    pub fn warn(&self, warning: LoaderWarning) {
        warn!("{}", warning);
        self.sink.emit_warning(warning);
    }
}
