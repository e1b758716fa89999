use tracing::warn;

use crate::model::{Directory, DirectoryId, DirectoryKind, Metadata, TagValue};

/// Shared state for handlers that turn IFDs into [`Directory`] values.
///
/// Keeps the directory currently being filled and a stack of the ones it
/// interrupted. Handlers push a directory when the reader is about to enter
/// an IFD and call [`ending_ifd`](Self::ending_ifd) when it leaves one.
pub struct DirectoryTiffHandler<'m> {
    metadata: &'m mut Metadata,
    current: Option<DirectoryId>,
    stack: Vec<DirectoryId>,
    /// Parent for directories pushed while nothing is current
    root_parent: Option<DirectoryId>,
}

impl<'m> DirectoryTiffHandler<'m> {
    pub fn new(metadata: &'m mut Metadata, root_parent: Option<DirectoryId>) -> Self {
        Self {
            metadata,
            current: None,
            stack: Vec::new(),
            root_parent,
        }
    }

    /// Add a new directory, make it current and remember the previous one.
    pub fn push_directory(&mut self, kind: DirectoryKind) -> DirectoryId {
        let mut directory = Directory::new(kind);
        directory.set_parent(self.current.or(self.root_parent));
        let id = self.metadata.add_directory(directory);
        if let Some(previous) = self.current.replace(id) {
            self.stack.push(previous);
        }
        id
    }

    /// Return to the directory that was current before the last push.
    pub fn ending_ifd(&mut self) {
        self.current = self.stack.pop();
    }

    #[inline]
    pub fn current(&self) -> Option<DirectoryId> {
        self.current
    }

    pub fn current_kind(&self) -> Option<DirectoryKind> {
        self.current_directory().map(Directory::kind)
    }

    pub fn current_directory(&self) -> Option<&Directory> {
        self.metadata.directory(self.current?)
    }

    pub fn metadata(&self) -> &Metadata {
        &*self.metadata
    }

    pub fn set(&mut self, tag: u16, value: TagValue) {
        match self.current.and_then(|id| self.metadata.directory_mut(id)) {
            Some(directory) => directory.set_value(u32::from(tag), value),
            None => warn!(tag = format_args!("0x{tag:04X}"), "tag value outside any directory dropped"),
        }
    }

    pub fn warn(&mut self, message: &str) {
        self.add_error(message);
    }

    pub fn error(&mut self, message: &str) {
        self.add_error(message);
    }

    fn add_error(&mut self, message: &str) {
        let id = self.error_target();
        if let Some(directory) = self.metadata.directory_mut(id) {
            directory.add_error(message);
        }
    }

    /// The current directory, else the first `Error` directory, else a
    /// newly pushed `Error` directory.
    fn error_target(&mut self) -> DirectoryId {
        if let Some(id) = self.current {
            return id;
        }
        let existing = self
            .metadata
            .iter()
            .find(|(_, d)| d.kind() == DirectoryKind::Error)
            .map(|(id, _)| id);
        match existing {
            Some(id) => id,
            None => self.push_directory(DirectoryKind::Error),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
