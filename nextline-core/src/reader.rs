//! Multi-descriptor line reader
//!
//! [`LineReader`] returns one line per call for any number of descriptors,
//! keeping the bytes it over-read for each descriptor until the next call on
//! that same descriptor.
//!
//! Outcomes of [`LineReader::read_line`]:
//!
//! | situation                                      | result        | pending state |
//! |------------------------------------------------|---------------|---------------|
//! | a line is available                            | `Ok(Some(_))` | remainder kept |
//! | stream exhausted, nothing pending              | `Ok(None)`    | released      |
//! | chunk size ≤ 0 or descriptor out of range      | `Ok(None)`    | untouched     |
//! | source does not know the descriptor            | `Ok(None)`    | released      |
//! | read or allocation failure                     | `Err(_)`      | released      |

use std::io;
use std::path::Path;

use crate::config::ReaderConfig;
use crate::descriptor::Descriptor;
use crate::error::{ReadError, Result};
use crate::line::Line;
use crate::pending::FillError;
use crate::registry::Registry;
use crate::source::{ByteSource, SourceError, SourceTable};

/// Line reader over every descriptor of a [`ByteSource`]
#[derive(Debug)]
pub struct LineReader<S> {
    config: ReaderConfig,
    source: S,
    registry: Registry,
}

impl<S: ByteSource + Default> Default for LineReader<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: ByteSource> LineReader<S> {
    /// Create a reader with the default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(ReaderConfig::default(), source)
    }

    /// Create a reader with a custom configuration
    ///
    /// The configuration is used as given; run [`ReaderConfig::validate`] or
    /// the builder first to enforce its limits.
    pub fn with_config(config: ReaderConfig, source: S) -> Self {
        Self {
            config,
            source,
            registry: Registry::new(),
        }
    }

    /// Return the next line from `fd`
    ///
    /// See the module docs for how each outcome affects the descriptor's
    /// pending bytes.
    pub fn read_line(&mut self, fd: Descriptor) -> Result<Option<Line>> {
        let Some(chunk_len) = self.config.chunk_len() else {
            return Ok(None);
        };

        if !self.config.admits(fd) {
            log::debug!("{fd}: outside the trackable range, ignoring");
            return Ok(None);
        }

        let mut pending = self.registry.checkout(fd);
        let source = &mut self.source;

        let filled = pending.fill_until_newline(chunk_len, |buf| loop {
            match source.read(fd, buf) {
                Err(SourceError::Io(err)) if err.kind() == io::ErrorKind::Interrupted => continue,
                other => break other,
            }
        });

        match filled {
            Ok(()) => {}
            Err(FillError::Read(SourceError::BadDescriptor(_))) => {
                if !pending.is_empty() {
                    log::debug!(
                        "{fd}: no longer readable, dropping {} pending bytes",
                        pending.len()
                    );
                }
                return Ok(None);
            }
            Err(FillError::Read(SourceError::Io(err))) => {
                log::warn!(
                    "{fd}: read failed, discarding {} pending bytes: {err}",
                    pending.len()
                );
                return Err(ReadError::Io(err));
            }
            Err(FillError::Alloc { additional, source }) => {
                log::warn!("{fd}: could not reserve {additional} more bytes, discarding state");
                return Err(ReadError::Alloc { additional, source });
            }
        }

        let line = pending.take_line();
        self.registry.store(fd, pending);
        Ok(line)
    }

    /// Iterate over the remaining lines of `fd`
    pub fn lines(&mut self, fd: Descriptor) -> Lines<'_, S> {
        Lines {
            reader: self,
            fd,
            done: false,
        }
    }

    /// Drop pending bytes for `fd`, e.g. after the caller closed it
    pub fn forget(&mut self, fd: Descriptor) -> bool {
        self.registry.discard(fd)
    }

    /// Bytes held for `fd` between calls
    pub fn pending_len(&self, fd: Descriptor) -> usize {
        self.registry.pending_len(fd)
    }

    /// Number of descriptors that currently hold pending bytes
    pub fn tracked(&self) -> usize {
        self.registry.len()
    }

    /// Active configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Underlying byte source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Underlying byte source, mutably
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the reader, returning the byte source
    pub fn into_source(self) -> S {
        self.source
    }
}

impl LineReader<SourceTable> {
    /// Open `path` in the descriptor table
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> io::Result<Descriptor> {
        self.source.open(path)
    }

    /// Close `fd` in the descriptor table and forget its pending bytes
    pub fn close(&mut self, fd: Descriptor) -> bool {
        self.registry.discard(fd);
        self.source.close(fd)
    }
}

/// Iterator over the lines of one descriptor
///
/// Yields each line, then stops after end of data or after the first error.
#[derive(Debug)]
pub struct Lines<'a, S> {
    reader: &'a mut LineReader<S>,
    fd: Descriptor,
    done: bool,
}

impl<S: ByteSource> Iterator for Lines<'_, S> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_line(self.fd) {
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

impl<S: ByteSource> std::iter::FusedIterator for Lines<'_, S> {}
