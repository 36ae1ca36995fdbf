//! Component configuration
//!
//! Normalizes raw component specs, expands library references through their
//! package manifests, and answers "which descriptor applies to this file".

pub mod descriptor;
pub mod manifest;
pub mod matcher;
pub mod resolver;

pub use descriptor::{ComponentDescriptor, DescriptorDraft};
pub use manifest::PackageManifest;
pub use matcher::OverrideTable;
pub use resolver::{ConfigResolver, ResolvedConfig};
