//! Pending bytes held between calls, and the chunked fill loop
//!
//! Both readers share this: [`LineReader`](crate::LineReader) keeps one
//! buffer per descriptor, [`LineStream`](crate::LineStream) keeps exactly one.

use std::collections::TryReserveError;

use memchr::memchr;

use crate::error::ReadError;
use crate::line::Line;

/// Failure while filling a pending buffer
#[derive(Debug)]
pub(crate) enum FillError<E> {
    /// The read callback failed
    Read(E),
    /// Growing the chunk or pending buffer failed
    Alloc {
        additional: usize,
        source: TryReserveError,
    },
}

impl<E> FillError<E> {
    fn alloc(additional: usize, source: TryReserveError) -> Self {
        FillError::Alloc { additional, source }
    }
}

impl FillError<std::io::Error> {
    pub(crate) fn into_read_error(self) -> ReadError {
        match self {
            FillError::Read(err) => ReadError::Io(err),
            FillError::Alloc { additional, source } => ReadError::Alloc { additional, source },
        }
    }
}

/// Bytes consumed from a stream but not yet returned as part of a line
///
/// Lines are taken from the front by advancing `start`; the consumed prefix
/// is dropped the next time bytes are appended, so taking a line never moves
/// the bytes behind it.
#[derive(Debug, Default)]
pub struct PendingBuffer {
    data: Vec<u8>,
    start: usize,
}

impl PendingBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.data.len() - self.start
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.start == self.data.len()
    }

    /// Buffered bytes, oldest first
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[self.start..]
    }

    /// Offset of the first buffered `\n`
    pub fn newline_position(&self) -> Option<usize> {
        memchr(b'\n', self.as_bytes())
    }

    /// Append bytes, reporting allocation failure instead of aborting
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), TryReserveError> {
        if self.start > 0 {
            self.data.drain(..self.start);
            self.start = 0;
        }
        self.data.try_reserve(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Drop everything buffered and release the allocation
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.start = 0;
    }

    /// Read chunks through `read` until a newline is buffered or the stream ends
    ///
    /// Returns without reading when a complete line is already pending. A read
    /// of zero bytes ends the loop; the bytes gathered so far stay buffered.
    pub(crate) fn fill_until_newline<E, F>(
        &mut self,
        chunk_len: usize,
        mut read: F,
    ) -> Result<(), FillError<E>>
    where
        F: FnMut(&mut [u8]) -> Result<usize, E>,
    {
        if self.newline_position().is_some() {
            return Ok(());
        }

        let mut chunk = zeroed_chunk(chunk_len).map_err(|e| FillError::alloc(chunk_len, e))?;

        loop {
            let read_len = read(&mut chunk).map_err(FillError::Read)?;
            if read_len == 0 {
                break;
            }

            let fresh = &chunk[..read_len];
            self.append(fresh)
                .map_err(|e| FillError::alloc(read_len, e))?;

            if memchr(b'\n', fresh).is_some() {
                break;
            }
        }

        Ok(())
    }

    /// Split off the next line
    ///
    /// The line runs through the first `\n`, or covers everything buffered
    /// when there is none. Returns `None` when the buffer is empty.
    pub fn take_line(&mut self) -> Option<Line> {
        if self.is_empty() {
            return None;
        }

        let end = match self.newline_position() {
            Some(offset) => self.start + offset + 1,
            None => self.data.len(),
        };

        let line = self.data[self.start..end].to_vec();
        self.start = end;
        if self.is_empty() {
            self.clear();
        }
        Some(Line::new(line))
    }
}

/// Zero-filled read buffer of `len` bytes
///
/// The size is checked with a fallible reservation first. The buffer itself
/// comes from the zeroing allocator, so pages a read never reaches stay
/// uncommitted.
fn zeroed_chunk(len: usize) -> Result<Vec<u8>, TryReserveError> {
    Vec::<u8>::new().try_reserve_exact(len)?;
    Ok(vec![0; len])
}
