//! Override table lookup
//!
//! Descriptors are stored in ascending override priority: a descriptor
//! declared (or expanded from a library) later overrides every earlier one
//! whose pattern also matches. Lookup is therefore a left fold over the table
//! that keeps the last match, which is the same as the first match scanning
//! from the end.

use std::path::Path;

use crate::component::descriptor::ComponentDescriptor;

/// Ordered descriptor list with last-match-wins lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTable {
    entries: Vec<ComponentDescriptor>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor with higher priority than all current entries
    pub fn push(&mut self, descriptor: ComponentDescriptor) {
        self.entries.push(descriptor);
    }

    /// The highest-priority descriptor whose test pattern matches `path`
    pub fn lookup(&self, path: &Path) -> Option<&ComponentDescriptor> {
        self.entries
            .iter()
            .rev()
            .find(|descriptor| descriptor.test_pattern.is_match(path))
    }

    /// Entries in ascending priority
    pub fn entries(&self) -> &[ComponentDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ComponentDescriptor> for OverrideTable {
    fn from_iter<T: IntoIterator<Item = ComponentDescriptor>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
