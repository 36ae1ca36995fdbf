//! Configuration for the component style loader
//!
//! Handles per-build loader options, raw component specs, and config-file loading.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LoaderError;

/// Module every component's stylesheet is expected at, relative to its entry file
pub const STYLE_BASE_MODULE: &str = "./style/index";

/// Stylesheet extension used when a spec does not name one
pub const DEFAULT_STYLE_EXTENSION: &str = "css";

/// Files under an `assets/` directory whose exports are asset paths
pub const DEFAULT_ASSETS_RULE: &str = r"assets/index\.(js|mjs|ts|jsx|tsx)$";

/// Component entry files that receive a stylesheet import
pub const DEFAULT_COMPONENT_RULE: &str = r"/index\.(js|mjs|ts|jsx|tsx)$";

/// A compiled path pattern
///
/// Serializes as its source text. Two patterns are equal when their sources are.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern from its source text
    pub fn new(source: &str) -> Result<Self, LoaderError> {
        Regex::new(source)
            .map(Pattern)
            .map_err(|e| LoaderError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            })
    }

    /// Pattern matching `dir` itself and every path below it
    pub fn for_directory(dir: &Path) -> Result<Self, LoaderError> {
        let escaped = regex::escape(&dir.to_string_lossy());
        Self::new(&format!(r"^{}(?:[/\\]|$)", escaped))
    }

    /// Check a file path against the pattern
    pub fn is_match(&self, path: &Path) -> bool {
        self.0.is_match(&path.to_string_lossy())
    }

    /// Pattern source text
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Build mode reported by the host
///
/// Non-fatal diagnostics are only surfaced in development builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        matches!(self, Mode::Development)
    }
}

/// One component entry as written in the build options or a package manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawComponentSpec {
    /// Package whose manifest scopes (and may extend) this entry
    pub lib: Option<String>,
    /// Base stylesheet module, without extension
    pub base_style: Option<String>,
    /// Which files this entry applies to
    pub test: Option<Pattern>,
    /// Which matched files are asset index files
    pub assets_rule: Option<Pattern>,
    /// Which matched files are component entry files
    pub component_rule: Option<Pattern>,
    /// Stylesheet extension (`css`, `less`, `scss`, ...)
    pub style: Option<String>,
}

impl RawComponentSpec {
    pub fn with_lib(mut self, lib: impl Into<String>) -> Self {
        self.lib = Some(lib.into());
        self
    }

    pub fn with_base_style(mut self, base_style: impl Into<String>) -> Self {
        self.base_style = Some(base_style.into());
        self
    }

    pub fn with_test(mut self, test: Pattern) -> Self {
        self.test = Some(test);
        self
    }

    pub fn with_assets_rule(mut self, rule: Pattern) -> Self {
        self.assets_rule = Some(rule);
        self
    }

    pub fn with_component_rule(mut self, rule: Pattern) -> Self {
        self.component_rule = Some(rule);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Per-build loader options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    /// Component specs, in ascending override priority
    #[serde(default)]
    pub components: Vec<RawComponentSpec>,

    /// Absolute path of the file that receives every base style
    #[serde(default)]
    pub base_style_target: Option<PathBuf>,

    /// Directory top-level `lib` and `baseStyle` entries resolve from.
    /// Defaults to the directory of the first transformed file.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
}

impl LoaderOptions {
    pub fn new(components: Vec<RawComponentSpec>) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    pub fn with_base_style_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.base_style_target = Some(target.into());
        self
    }

    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Whether `path` is the designated base-style target
    pub fn is_base_style_target(&self, path: &Path) -> bool {
        self.base_style_target.as_deref() == Some(path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "component_style_loader=debug"); RUST_LOG wins
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,
}

/// Complete config file for the `style-inject` tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderConfig {
    #[serde(flatten)]
    pub options: LoaderOptions,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl LoaderConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LoaderConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LoaderConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, picking the format from the file extension (JSON by default)
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            _ => Self::from_json_file(path),
        }
    }
}
