//! Descriptor handles

use std::fmt;

/// Opaque handle identifying an open, readable byte stream
///
/// Mirrors the integer descriptors handed out by an operating system:
/// `0..=2` are conventionally the standard streams and negative values never
/// name a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Descriptor(i32);

impl Descriptor {
    /// Standard input
    pub const STDIN: Descriptor = Descriptor(0);

    /// Wrap a raw descriptor number
    pub const fn new(raw: i32) -> Self {
        Descriptor(raw)
    }

    /// Raw descriptor number
    pub const fn as_raw(self) -> i32 {
        self.0
    }

    /// Position of this descriptor in a zero-based table, if it can have one
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl From<i32> for Descriptor {
    fn from(raw: i32) -> Self {
        Descriptor(raw)
    }
}

impl From<Descriptor> for i32 {
    fn from(fd: Descriptor) -> Self {
        fd.0
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fd {}", self.0)
    }
}
