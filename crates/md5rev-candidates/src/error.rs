//! Candidate generation errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("Candidate length must be at least 1")]
    ZeroLength,
    #[error("Alphabet is empty")]
    EmptyAlphabet,
    #[error("Prefix length ({prefix_len}) must be less than target length ({length})")]
    PrefixTooLong { prefix_len: usize, length: usize },
    #[error("Keyspace {alphabet_len}^{positions} is too large to enumerate")]
    KeyspaceOverflow { alphabet_len: usize, positions: usize },
    #[error("Word list file '{}' not found", .path.display())]
    WordListNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Word list file '{}' could not be read: {source}", .path.display())]
    WordListUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CandidateError {
    /// Whether this is a resource error (word list missing or unreadable)
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            CandidateError::WordListNotFound { .. } | CandidateError::WordListUnreadable { .. }
        )
    }
}
