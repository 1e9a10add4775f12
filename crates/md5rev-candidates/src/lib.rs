//! md5rev Candidate Generation
//!
//! Alphabets, lazily enumerated keyspaces and word lists: everything that
//! produces the ordered sequence of plaintexts a search will try.

mod alphabet;
mod error;
mod keyspace;
mod sizing;
mod source;
mod wordlist;

pub use alphabet::Alphabet;
pub use error::CandidateError;
pub use keyspace::{shard_range, Candidates, Keyspace, Materialized, PROGRESS_INTERVAL};
pub use sizing::{estimate_seconds, format_count, format_duration, range_size};
pub use source::CandidateSource;
pub use wordlist::WordList;
