//! Byte sources addressed by descriptor
//!
//! [`ByteSource`] is the `read(fd, buf)` primitive the line reader drains.
//! [`SourceTable`] is the stock implementation: a descriptor table owning
//! arbitrary readers, with descriptors allocated the way an OS allocates them
//! (lowest free number first).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;

use crate::descriptor::Descriptor;

/// First descriptor handed out by [`SourceTable::insert`]
const FIRST_FREE_DESCRIPTOR: i32 = 3;

/// Failure reported by a [`ByteSource`]
#[derive(Error, Debug)]
pub enum SourceError {
    /// The descriptor does not name a readable stream
    #[error("{0} is not open for reading")]
    BadDescriptor(Descriptor),

    /// The stream exists but reading from it failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Anything that can fill a buffer from a descriptor
pub trait ByteSource {
    /// Read up to `buf.len()` bytes from `fd`
    ///
    /// Returns the number of bytes written into `buf`; zero means the stream
    /// is exhausted.
    fn read(&mut self, fd: Descriptor, buf: &mut [u8]) -> Result<usize, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, fd: Descriptor, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(fd, buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, fd: Descriptor, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(fd, buf)
    }
}

/// Descriptor table owning the readers it serves
#[derive(Default)]
pub struct SourceTable {
    streams: BTreeMap<Descriptor, Box<dyn Read + Send>>,
}

impl std::fmt::Debug for SourceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTable")
            .field("descriptors", &self.streams.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SourceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reader under the lowest free descriptor (from 3 upwards)
    pub fn insert<R: Read + Send + 'static>(&mut self, reader: R) -> Descriptor {
        let fd = self.lowest_free();
        self.streams.insert(fd, Box::new(reader));
        fd
    }

    /// Register a reader under an explicit descriptor
    ///
    /// Returns the reader previously registered there, if any.
    pub fn insert_at<R: Read + Send + 'static>(
        &mut self,
        fd: Descriptor,
        reader: R,
    ) -> Option<Box<dyn Read + Send>> {
        self.streams.insert(fd, Box::new(reader))
    }

    /// Open a file for reading and register it
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> io::Result<Descriptor> {
        let file = File::open(path)?;
        Ok(self.insert(file))
    }

    /// Remove and drop the reader behind `fd`
    pub fn close(&mut self, fd: Descriptor) -> bool {
        self.streams.remove(&fd).is_some()
    }

    /// Whether `fd` is registered
    pub fn contains(&self, fd: Descriptor) -> bool {
        self.streams.contains_key(&fd)
    }

    /// Number of registered readers
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether no readers are registered
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    fn lowest_free(&self) -> Descriptor {
        let mut candidate = FIRST_FREE_DESCRIPTOR;
        for fd in self
            .streams
            .range(Descriptor::new(FIRST_FREE_DESCRIPTOR)..)
            .map(|(fd, _)| fd.as_raw())
        {
            if fd != candidate {
                break;
            }
            candidate += 1;
        }
        Descriptor::new(candidate)
    }
}

impl ByteSource for SourceTable {
    fn read(&mut self, fd: Descriptor, buf: &mut [u8]) -> Result<usize, SourceError> {
        let stream = self
            .streams
            .get_mut(&fd)
            .ok_or(SourceError::BadDescriptor(fd))?;
        Ok(Read::read(stream, buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_lowest_free_descriptor_reused() {
        let mut table = SourceTable::new();
        let a = table.insert(Cursor::new(b"a".to_vec()));
        let b = table.insert(Cursor::new(b"b".to_vec()));
        let c = table.insert(Cursor::new(b"c".to_vec()));
        assert_eq!((a.as_raw(), b.as_raw(), c.as_raw()), (3, 4, 5));

        assert!(table.close(b));
        let d = table.insert(Cursor::new(b"d".to_vec()));
        assert_eq!(d, b);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_stdio_slots_not_allocated() {
        let mut table = SourceTable::new();
        table.insert_at(Descriptor::STDIN, Cursor::new(Vec::new()));
        let fd = table.insert(Cursor::new(Vec::new()));
        assert_eq!(fd.as_raw(), 3);
        assert!(table.contains(Descriptor::STDIN));
    }

    #[test]
    fn test_read_unknown_descriptor() {
        let mut table = SourceTable::new();
        let mut buf = [0u8; 4];
        let err = table.read(Descriptor::new(9), &mut buf).unwrap_err();
        assert!(matches!(err, SourceError::BadDescriptor(fd) if fd.as_raw() == 9));
    }

    #[test]
    fn test_read_through_table() {
        let mut table = SourceTable::new();
        let fd = table.insert(Cursor::new(b"hello".to_vec()));
        let mut buf = [0u8; 3];
        assert_eq!(table.read(fd, &mut buf).unwrap(), 3);
        assert_eq!(&buf, b"hel");
        assert!(!table.close(Descriptor::new(99)));
    }
}
