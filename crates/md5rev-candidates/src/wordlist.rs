//! Word-list candidates

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::CandidateError;

/// Lines of a word-list file, in file order, duplicates kept
#[derive(Debug, Clone, Default)]
pub struct WordList {
    path: Option<PathBuf>,
    words: Vec<String>,
}

impl WordList {
    /// Read a word list, one candidate per line with trailing whitespace removed.
    ///
    /// The file is read in full and closed before this returns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CandidateError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            let path = path.to_path_buf();
            if source.kind() == io::ErrorKind::NotFound {
                CandidateError::WordListNotFound { path, source }
            } else {
                CandidateError::WordListUnreadable { path, source }
            }
        })?;

        let words: Vec<String> = contents
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect();

        info!("Loaded {} words from {}", words.len(), path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            words,
        })
    }

    /// Build an in-memory list, lines are taken as-is
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: None,
            words: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_strips_line_endings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "foo\nbar\n").unwrap();

        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.words(), ["foo", "bar"]);
    }

    #[test]
    fn test_load_keeps_order_and_duplicates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "b  \r\na\t\nb\n\nc").unwrap();

        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.words(), ["b", "a", "b", "", "c"]);
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordList::load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, CandidateError::WordListNotFound { .. }));
        assert!(err.is_resource_error());
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0xff, 0xfe, 0x0a]).unwrap();

        let err = WordList::load(file.path()).unwrap_err();
        assert!(matches!(err, CandidateError::WordListUnreadable { .. }));
    }
}
