//! Input pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Pattern that stands for standard input
pub const STDIN_PATTERN: &str = "-";

/// A resolved input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A regular file
    File(PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str(STDIN_PATTERN),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve input patterns to sources, keeping the order they were given in
///
/// Each pattern must match at least one file. Matches of one pattern come
/// out sorted; an input named twice is read once.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<InputSource>> {
    let mut inputs = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        if pattern == STDIN_PATTERN {
            if seen.insert(InputSource::Stdin) {
                inputs.push(InputSource::Stdin);
            }
            continue;
        }

        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        let mut matched = Vec::new();
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                matched.push(path);
            }
        }

        if matched.is_empty() {
            return Err(CliError::FileNotFound(pattern.clone()).into());
        }

        matched.sort();
        for path in matched {
            let source = InputSource::File(path);
            if seen.insert(source.clone()) {
                inputs.push(source);
            }
        }
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pattern(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_glob_matches_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("c.log"), "c").unwrap();

        let inputs = resolve_inputs(&[pattern(&dir, "*.txt")]).unwrap();
        assert_eq!(
            inputs,
            vec![
                InputSource::File(dir.path().join("a.txt")),
                InputSource::File(dir.path().join("b.txt")),
            ]
        );
    }

    #[test]
    fn test_pattern_order_kept_and_duplicates_dropped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("z.txt"), "z").unwrap();

        let inputs = resolve_inputs(&[
            pattern(&dir, "z.txt"),
            "-".to_string(),
            pattern(&dir, "*.txt"),
            "-".to_string(),
        ])
        .unwrap();

        assert_eq!(
            inputs,
            vec![
                InputSource::File(dir.path().join("z.txt")),
                InputSource::Stdin,
                InputSource::File(dir.path().join("a.txt")),
            ]
        );
    }

    #[test]
    fn test_missing_file() {
        let err = resolve_inputs(&["/nonexistent/file.txt".to_string()]).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_inputs(&["[invalid".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid file pattern"));
    }

    #[test]
    fn test_display() {
        assert_eq!(InputSource::Stdin.to_string(), "-");
        assert_eq!(
            InputSource::File(PathBuf::from("dir/f.txt")).to_string(),
            "dir/f.txt"
        );
    }
}
