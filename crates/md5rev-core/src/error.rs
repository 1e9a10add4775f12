//! Search errors

use thiserror::Error;

use md5rev_candidates::CandidateError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid length range {min}-{max} (lengths start at 1 and min must not exceed max)")]
    InvalidRange { min: usize, max: usize },
    #[error(transparent)]
    Candidates(#[from] CandidateError),
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    /// Word list missing or unreadable
    pub fn is_resource_error(&self) -> bool {
        matches!(self, SearchError::Candidates(e) if e.is_resource_error())
    }
}
