//! Component Style Loader - source transform stage for component libraries
//!
//! This crate plugs into a host build pipeline and rewrites component source
//! files in two ways:
//!
//! 1. Asset index files: `export const LOGO = './logo.svg'` becomes
//!    `export { default as LOGO } from './logo.svg'`.
//! 2. Component entry files: an import (or require) of the component's
//!    `./style/index.<ext>` stylesheet is appended, and the one designated
//!    base-style target receives every base stylesheet up front.
//!
//! Which files are affected is driven by a list of component specs. A spec
//! that names a library is scoped to that library's directory, and the
//! library's `package.json` may declare further specs, expanded recursively.
//!
//! ## Architecture
//!
//! - **config**: loader options, raw component specs, config files
//! - **component**: descriptor normalization, library expansion, override table
//! - **cache**: single-flight, process-wide memoized resolution
//! - **transform**: asset rewrite, dialect detection, style injection
//! - **loader**: per-file entry point with one async contract for every outcome
//! - **host**: traits the build pipeline implements, plus a filesystem host
//!
//! ## Example
//!
//! ```rust,no_run
//! use component_style_loader::{FsHost, LoaderOptions, Mode, RawComponentSpec, StyleLoader};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), component_style_loader::LoaderError> {
//! let options = LoaderOptions::new(vec![RawComponentSpec::default()
//!     .with_lib("ui-kit")
//!     .with_style("less")])
//! .with_root_dir("/app");
//!
//! let loader = StyleLoader::new(options);
//! let host = FsHost::new(Mode::Development);
//! let output = loader
//!     .run(
//!         "export default Button;\n",
//!         Path::new("/app/node_modules/ui-kit/button/index.js"),
//!         &host,
//!     )
//!     .await?;
//! println!("{}", output.code);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod component;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod loader;
pub mod transform;
pub mod utils;

pub use cache::DescriptorCache;
pub use component::{ComponentDescriptor, ConfigResolver, OverrideTable, PackageManifest, ResolvedConfig};
pub use config::{LoaderConfig, LoaderOptions, LoggingConfig, Mode, Pattern, RawComponentSpec};
pub use diagnostics::{Diagnostic, LoaderWarning, ResolutionTarget};
pub use error::LoaderError;
pub use host::{BuildContext, FsHost, FsResolver, LoaderHost, ManifestReader, ModuleResolver};
pub use loader::StyleLoader;
pub use transform::{Dialect, Placement, StyleInjector, TransformKind, Transformed};
