//! Single-stream line reader
//!
//! The one-descriptor counterpart of [`LineReader`](crate::LineReader): no
//! registry, a single pending buffer, identical line semantics.

use std::io::{self, Read};

use crate::config::defaults;
use crate::error::Result;
use crate::line::Line;
use crate::pending::PendingBuffer;

/// Line reader bound to exactly one stream
#[derive(Debug)]
pub struct LineStream<R> {
    inner: R,
    chunk_size: i64,
    pending: PendingBuffer,
    done: bool,
}

impl<R: Read> LineStream<R> {
    /// Wrap `inner` using the default chunk size
    pub fn new(inner: R) -> Self {
        Self::with_chunk_size(inner, defaults::CHUNK_SIZE)
    }

    /// Wrap `inner`, reading `chunk_size` bytes at a time
    ///
    /// A non-positive chunk size makes every call report end of data.
    pub fn with_chunk_size(inner: R, chunk_size: i64) -> Self {
        Self {
            inner,
            chunk_size,
            pending: PendingBuffer::new(),
            done: false,
        }
    }

    /// Return the next line, or `None` once the stream is exhausted
    ///
    /// On error the pending bytes are dropped; a later call starts from
    /// whatever the stream yields next.
    pub fn read_line(&mut self) -> Result<Option<Line>> {
        if self.chunk_size <= 0 {
            return Ok(None);
        }
        let Ok(chunk_len) = usize::try_from(self.chunk_size) else {
            return Ok(None);
        };

        let inner = &mut self.inner;
        let filled = self.pending.fill_until_newline(chunk_len, |buf| loop {
            match inner.read(buf) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                other => break other,
            }
        });

        if let Err(err) = filled {
            let err = err.into_read_error();
            log::warn!(
                "stream read failed, discarding {} pending bytes: {err}",
                self.pending.len()
            );
            self.pending.clear();
            return Err(err);
        }

        Ok(self.pending.take_line())
    }

    /// Bytes held between calls
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Reference to the wrapped stream
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutable reference to the wrapped stream
    ///
    /// Reading from it directly skips past anything already pending.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the stream, dropping any pending bytes
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for LineStream<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for LineStream<R> {}
