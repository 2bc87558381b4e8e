//! Incremental line reading over descriptors
//!
//! Reads a descriptor in fixed-size chunks and hands back one line per call.
//! Bytes read past the end of a line are kept per descriptor and served on
//! the next call for that descriptor, so any number of streams can be read
//! in any interleaving without their contents mixing.
//!
//! # Architecture
//!
//! - [`ByteSource`]: the `read(fd, buf)` primitive; [`SourceTable`] is a
//!   descriptor table over any [`std::io::Read`] implementors
//! - [`Registry`]: pending bytes per descriptor, dropped once drained
//! - [`LineReader`]: the line-at-a-time algorithm over a registry
//! - [`LineStream`]: the same algorithm for a single stream
//!
//! # Example
//!
//! ```rust
//! use nextline_core::{LineReader, ReaderConfig, SourceTable};
//! use std::io::Cursor;
//!
//! let config = ReaderConfig::builder().chunk_size(4).build().unwrap();
//! let mut reader = LineReader::with_config(config, SourceTable::new());
//!
//! let a = reader.source_mut().insert(Cursor::new(b"first\nsecond\n".to_vec()));
//! let b = reader.source_mut().insert(Cursor::new(b"other".to_vec()));
//!
//! assert_eq!(reader.read_line(a).unwrap().unwrap(), "first\n");
//! assert_eq!(reader.read_line(b).unwrap().unwrap(), "other");
//! assert_eq!(reader.read_line(a).unwrap().unwrap(), "second\n");
//! assert!(reader.read_line(a).unwrap().is_none());
//! assert!(reader.read_line(b).unwrap().is_none());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod line;
pub mod pending;
pub mod reader;
pub mod registry;
pub mod source;
pub mod stream;

pub use config::{defaults, ReaderConfig, ReaderConfigBuilder};
pub use descriptor::Descriptor;
pub use error::{ConfigError, ReadError, Result};
pub use line::Line;
pub use pending::PendingBuffer;
pub use reader::{LineReader, Lines};
pub use registry::Registry;
pub use source::{ByteSource, SourceError, SourceTable};
pub use stream::LineStream;
