//! Per-descriptor pending state

use std::collections::HashMap;

use crate::descriptor::Descriptor;
use crate::pending::PendingBuffer;

/// Map from descriptor to the bytes buffered for it
///
/// Entries exist only while a descriptor has something pending. An entry
/// whose buffer drains to empty is removed so its memory is released.
#[derive(Debug, Default)]
pub struct Registry {
    states: HashMap<Descriptor, PendingBuffer>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the state for `fd` out of the registry, creating an empty one
    ///
    /// The caller hands it back with [`Registry::store`] once done.
    pub fn checkout(&mut self, fd: Descriptor) -> PendingBuffer {
        match self.states.remove(&fd) {
            Some(pending) => pending,
            None => {
                log::trace!("{fd}: new reader state");
                PendingBuffer::new()
            }
        }
    }

    /// Put state back; an empty buffer releases the entry instead
    pub fn store(&mut self, fd: Descriptor, pending: PendingBuffer) {
        if pending.is_empty() {
            log::trace!("{fd}: reader state released");
            return;
        }
        self.states.insert(fd, pending);
    }

    /// Drop whatever is pending for `fd`
    pub fn discard(&mut self, fd: Descriptor) -> bool {
        let removed = self.states.remove(&fd).is_some();
        if removed {
            log::debug!("{fd}: pending state discarded");
        }
        removed
    }

    /// Bytes pending for `fd`
    pub fn pending_len(&self, fd: Descriptor) -> usize {
        self.states.get(&fd).map_or(0, PendingBuffer::len)
    }

    /// Number of descriptors with pending bytes
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether nothing is pending anywhere
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
