//! Indexed candidate sources

use std::borrow::Cow;
use std::ops::Range;

use crate::keyspace::shard_range;
use crate::{Keyspace, WordList};

/// A finite, ordered, randomly addressable sequence of candidates.
///
/// Workers scan disjoint index ranges of a source in parallel; index order
/// is the order a sequential scan would use.
pub trait CandidateSource: Send + Sync {
    /// Number of candidates
    fn len(&self) -> u128;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidates with indices in `range`, in order (clamped to the source)
    fn range(&self, range: Range<u128>) -> Box<dyn Iterator<Item = Cow<'_, str>> + '_>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;

    /// Contiguous index range of worker `worker` out of `workers`
    fn shard(&self, worker: usize, workers: usize) -> Range<u128> {
        shard_range(self.len(), worker, workers)
    }
}

impl CandidateSource for Keyspace {
    fn len(&self) -> u128 {
        self.size()
    }

    fn range(&self, range: Range<u128>) -> Box<dyn Iterator<Item = Cow<'_, str>> + '_> {
        Box::new(self.iter_range(range).map(Cow::Owned))
    }

    fn describe(&self) -> String {
        if self.prefix().is_empty() {
            format!("length {} over {} chars", self.length(), self.alphabet().len())
        } else {
            format!(
                "length {} over {} chars, prefix '{}'",
                self.length(),
                self.alphabet().len(),
                self.prefix()
            )
        }
    }
}

impl CandidateSource for [String] {
    fn len(&self) -> u128 {
        <[String]>::len(self) as u128
    }

    fn range(&self, range: Range<u128>) -> Box<dyn Iterator<Item = Cow<'_, str>> + '_> {
        let len = <[String]>::len(self);
        let end = usize::try_from(range.end).unwrap_or(usize::MAX).min(len);
        let start = usize::try_from(range.start).unwrap_or(usize::MAX).min(end);
        Box::new(self[start..end].iter().map(|s| Cow::Borrowed(s.as_str())))
    }

    fn describe(&self) -> String {
        format!("{} listed candidates", <[String]>::len(self))
    }
}

impl CandidateSource for Vec<String> {
    fn len(&self) -> u128 {
        CandidateSource::len(self.as_slice())
    }

    fn range(&self, range: Range<u128>) -> Box<dyn Iterator<Item = Cow<'_, str>> + '_> {
        CandidateSource::range(self.as_slice(), range)
    }

    fn describe(&self) -> String {
        self.as_slice().describe()
    }
}

impl CandidateSource for WordList {
    fn len(&self) -> u128 {
        self.words().len() as u128
    }

    fn range(&self, range: Range<u128>) -> Box<dyn Iterator<Item = Cow<'_, str>> + '_> {
        CandidateSource::range(self.words(), range)
    }

    fn describe(&self) -> String {
        match self.path() {
            Some(path) => format!("{} words from {}", self.words().len(), path.display()),
            None => format!("{} words", self.words().len()),
        }
    }
}
