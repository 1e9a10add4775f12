//! md5rev Core Engine
//!
//! Multi-threaded search for a plaintext whose iterated MD5 digest equals
//! a target, over generated keyspaces or word lists.

mod error;
mod matcher;
mod search;
mod stats;

pub use error::SearchError;
pub use matcher::{HashMatcher, Hit, SearchTarget};
pub use search::{Md5Search, PartialDecision, SearchConfig, SearchOutcome, SearchResult};
pub use stats::{Phase, SearchStats};

// Re-exports for convenience
pub use md5rev_candidates::{
    format_count, format_duration, range_size, Alphabet, CandidateError, CandidateSource,
    Keyspace, Materialized, WordList,
};
pub use md5rev_crypto::{md5_hex, md5_iter};
