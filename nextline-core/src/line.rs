//! Owned lines returned by the readers

use std::borrow::Cow;
use std::ops::Deref;
use std::str::Utf8Error;

/// One line of input, trailing `\n` included when the stream had one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line(Vec<u8>);

impl Line {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Line(bytes)
    }

    /// Raw bytes, newline included
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the line into its raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes, newline included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Lines handed out by the readers are never empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the line ended with `\n` (false only for a final unterminated line)
    pub fn has_newline(&self) -> bool {
        self.0.last() == Some(&b'\n')
    }

    /// Bytes without the trailing `\n`
    pub fn content(&self) -> &[u8] {
        match self.0.split_last() {
            Some((b'\n', rest)) => rest,
            _ => &self.0,
        }
    }

    /// View as UTF-8 text
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    /// View as text, replacing invalid UTF-8 sequences
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl Deref for Line {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Line> for Vec<u8> {
    fn from(line: Line) -> Self {
        line.0
    }
}

impl PartialEq<[u8]> for Line {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<&[u8]> for Line {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Line {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.0 == other[..]
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminated_line() {
        let line = Line::new(b"hello\n".to_vec());
        assert!(line.has_newline());
        assert_eq!(line.content(), b"hello");
        assert_eq!(line.len(), 6);
        assert_eq!(line, "hello\n");
    }

    #[test]
    fn test_unterminated_line() {
        let line = Line::new(b"tail".to_vec());
        assert!(!line.has_newline());
        assert_eq!(line.content(), b"tail");
    }

    #[test]
    fn test_bare_newline_has_empty_content() {
        let line = Line::new(b"\n".to_vec());
        assert!(line.has_newline());
        assert!(line.content().is_empty());
        assert!(!line.is_empty());
    }

    #[test]
    fn test_crlf_is_not_normalized() {
        let line = Line::new(b"dos\r\n".to_vec());
        assert_eq!(line.content(), b"dos\r");
    }

    #[test]
    fn test_invalid_utf8() {
        let line = Line::new(vec![0xff, b'a', b'\n']);
        assert!(line.to_str().is_err());
        assert_eq!(line.to_string_lossy(), "\u{fffd}a\n");
    }
}
