//! Stylesheet statement injection
//!
//! Builds one import (or require) statement per stylesheet and places the
//! block before or after the untouched source text.
//!
//! Input paths are ordered by ascending override priority. Statements are
//! emitted in the reverse of that order, so the block always lists the
//! highest-priority path first. The block is never interleaved with the
//! source: it is concatenated in front of it ([`Placement::Prepend`], the
//! base-style target) or behind it ([`Placement::Append`], component files).

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// Known false positives: the idioms inside comments or string literals,
// e.g. `// require('x')`, also classify the file as legacy.
static LEGACY_MODULE_IDIOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"module\.exports|exports\.|require\([^()\n]+\)").expect("valid dialect pattern")
});

/// Module convention a source file is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `require(...)` / `module.exports`
    LegacyModule,
    /// `import` / `export`
    StaticModule,
}

impl Dialect {
    /// Bounded text heuristic, not a parse: any export-assignment,
    /// property-export or same-line `require(...)` marks the file legacy
    pub fn detect(source: &str) -> Self {
        if LEGACY_MODULE_IDIOM.is_match(source) {
            Dialect::LegacyModule
        } else {
            Dialect::StaticModule
        }
    }

    /// One statement loading `path`, surrounded by newlines
    pub fn statement(self, path: &str) -> String {
        let literal = quote(path);
        match self {
            Dialect::LegacyModule => format!("\nrequire({});\n", literal),
            Dialect::StaticModule => format!("\nimport {};\n", literal),
        }
    }
}

/// Where the statement block goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prepend,
    Append,
}

/// Stateless stylesheet injector
pub struct StyleInjector;

impl StyleInjector {
    /// Statement block for `styles` (ascending priority), emitted in reverse
    pub fn block<P: AsRef<Path>>(dialect: Dialect, styles: &[P]) -> String {
        styles
            .iter()
            .rev()
            .map(|style| dialect.statement(&style.as_ref().to_string_lossy()))
            .collect()
    }

    /// Inject `styles` into `source` in the dialect detected from `source`
    pub fn inject<P: AsRef<Path>>(source: &str, styles: &[P], placement: Placement) -> String {
        let block = Self::block(Dialect::detect(source), styles);
        match placement {
            Placement::Prepend => format!("{}{}", block, source),
            Placement::Append => format!("{}{}", source, block),
        }
    }
}

fn quote(path: &str) -> String {
    format!("'{}'", path.replace('\\', "\\\\").replace('\'', "\\'"))
}
