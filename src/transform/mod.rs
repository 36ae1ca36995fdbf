//! Source transformations
//!
//! Bounded pattern recognition over source text; nothing here parses the
//! language.

pub mod assets;
pub mod inject;
pub mod transformer;

pub use assets::rewrite_asset_exports;
pub use inject::{Dialect, Placement, StyleInjector};
pub use transformer::{FileKind, TransformKind, Transformed, Transformer};
