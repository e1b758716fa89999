use std::fmt;

use serde::Serialize;

use super::{Directory, DirectoryKind};

/// Index of a directory within its [`Metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DirectoryId(pub(crate) usize);

impl DirectoryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DirectoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Every directory found in one file, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    directories: Vec<Directory>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory and return its id.
    pub fn add_directory(&mut self, directory: Directory) -> DirectoryId {
        self.directories.push(directory);
        DirectoryId(self.directories.len() - 1)
    }

    pub fn directory(&self, id: DirectoryId) -> Option<&Directory> {
        self.directories.get(id.0)
    }

    pub fn directory_mut(&mut self, id: DirectoryId) -> Option<&mut Directory> {
        self.directories.get_mut(id.0)
    }

    #[inline]
    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    /// Directories paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (DirectoryId, &Directory)> {
        self.directories
            .iter()
            .enumerate()
            .map(|(i, d)| (DirectoryId(i), d))
    }

    pub fn directories_of_kind(&self, kind: DirectoryKind) -> impl Iterator<Item = &Directory> {
        self.directories.iter().filter(move |d| d.kind() == kind)
    }

    pub fn first_directory_of_kind(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories_of_kind(kind).next()
    }

    pub fn contains_directory_of_kind(&self, kind: DirectoryKind) -> bool {
        self.first_directory_of_kind(kind).is_some()
    }

    #[inline]
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Whether any directory recorded an error.
    pub fn has_errors(&self) -> bool {
        self.directories.iter().any(Directory::has_errors)
    }

    /// Every recorded error, prefixed with its directory name.
    pub fn errors(&self) -> Vec<String> {
        self.directories
            .iter()
            .flat_map(|d| d.errors().iter().map(move |e| format!("[{}] {}", d.name(), e)))
            .collect()
    }

    pub fn parent_of(&self, id: DirectoryId) -> Option<&Directory> {
        let parent = self.directory(id)?.parent()?;
        self.directory(parent)
    }
}

// =============================================================================
// Tests
// =============================================================================
