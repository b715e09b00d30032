//! Bundled Resource Model
//!
//! Extra files and folders the user wants shipped alongside the executable.
//! The `ResourceList` is the single backing store for both the build
//! configuration and the list shown in the UI, so a removal can never leave
//! the two out of step.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether a resource is a single file or a directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    File,
    Directory,
}

impl ResourceKind {
    /// Prefix used for the display row of a resource
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::File => "FILE: ",
            ResourceKind::Directory => "DIR:  ",
        }
    }
}

/// A file or directory to bundle with the produced executable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Path as chosen by the user
    pub source: PathBuf,
    /// File or directory
    pub kind: ResourceKind,
}

impl Resource {
    pub fn file(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            kind: ResourceKind::File,
        }
    }

    pub fn directory(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            kind: ResourceKind::Directory,
        }
    }

    /// Classify a path by what is currently on disk; anything that is not a
    /// directory (including a missing path) is treated as a file.
    pub fn detect(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        if source.is_dir() {
            Self::directory(source)
        } else {
            Self::file(source)
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == ResourceKind::Directory
    }

    /// Row shown in the resource list, e.g. `DIR:  /path/to/assets`
    pub fn display_row(&self) -> String {
        format!("{}{}", self.kind.label(), self.source.display())
    }
}

/// Ordered, de-duplicated list of resources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    entries: Vec<Resource>,
}

impl ResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource unless one with the same source path is present.
    ///
    /// Returns `true` if the resource was added.
    pub fn add(&mut self, resource: Resource) -> bool {
        if self.contains(&resource.source) {
            debug!("Skipping duplicate resource {}", resource.source.display());
            return false;
        }
        self.entries.push(resource);
        true
    }

    /// Add several resources, returning how many were actually new
    pub fn extend<I>(&mut self, resources: I) -> usize
    where
        I: IntoIterator<Item = Resource>,
    {
        resources
            .into_iter()
            .map(|resource| self.add(resource))
            .filter(|added| *added)
            .count()
    }

    /// Remove the entry at `index`; later entries shift down by one
    pub fn remove(&mut self, index: usize) -> Option<Resource> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Remove every listed index (duplicates and out-of-range indices are
    /// ignored), highest first so the remaining indices stay valid.
    pub fn remove_many(&mut self, indices: &[usize]) -> Vec<Resource> {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.entries.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut removed: Vec<Resource> = sorted
            .into_iter()
            .rev()
            .map(|i| self.entries.remove(i))
            .collect();
        removed.reverse();
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, source: &Path) -> bool {
        self.entries.iter().any(|r| r.source == source)
    }

    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.entries.iter()
    }

    /// Source paths in insertion order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|r| r.source.clone()).collect()
    }

    /// Display rows in insertion order, one per entry
    pub fn display_rows(&self) -> Vec<String> {
        self.entries.iter().map(Resource::display_row).collect()
    }
}

impl<'a> IntoIterator for &'a ResourceList {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Resource> for ResourceList {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut list = ResourceList::new();
        list.extend(iter);
        list
    }
}
