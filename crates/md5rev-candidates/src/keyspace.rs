//! Cartesian-power keyspace over an alphabet
//!
//! Every index in `0..size` maps to exactly one candidate by mixed-radix
//! decoding, with the right-most position varying fastest. This is the
//! same order as a nested loop (or `itertools::product`) over the
//! alphabet, so index 0 is the first candidate a sequential scan tries.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::{Alphabet, CandidateError};

/// Candidates between progress callbacks during materialization
pub const PROGRESS_INTERVAL: usize = 1 << 16;

/// All candidates of one length, optionally behind a fixed prefix
#[derive(Debug, Clone)]
pub struct Keyspace {
    alphabet: Alphabet,
    prefix: String,
    length: usize,
    /// Free positions after the prefix
    positions: usize,
    size: u128,
}

/// Result of an eager enumeration
#[derive(Debug, Clone, Default)]
pub struct Materialized {
    /// Candidates produced, in keyspace order
    pub candidates: Vec<String>,
    /// Set when the cancellation flag stopped enumeration early
    pub interrupted: bool,
}

impl Keyspace {
    /// Create the keyspace of `length`-character candidates.
    ///
    /// Fails before any enumeration if the prefix is not strictly shorter
    /// than `length`.
    pub fn new(
        length: usize,
        alphabet: Alphabet,
        prefix: Option<&str>,
    ) -> Result<Self, CandidateError> {
        if length == 0 {
            return Err(CandidateError::ZeroLength);
        }
        if alphabet.is_empty() {
            return Err(CandidateError::EmptyAlphabet);
        }

        let prefix = prefix.unwrap_or_default().to_string();
        let prefix_len = prefix.chars().count();
        if prefix_len >= length {
            return Err(CandidateError::PrefixTooLong { prefix_len, length });
        }

        let positions = length - prefix_len;
        let size = u32::try_from(positions)
            .ok()
            .and_then(|exp| (alphabet.len() as u128).checked_pow(exp))
            .ok_or(CandidateError::KeyspaceOverflow {
                alphabet_len: alphabet.len(),
                positions,
            })?;

        Ok(Self {
            alphabet,
            prefix,
            length,
            positions,
            size,
        })
    }

    /// Number of candidates
    pub fn size(&self) -> u128 {
        self.size
    }

    /// Total candidate length in characters, prefix included
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Decode the candidate at `index` without touching any other index
    pub fn candidate_at(&self, index: u128) -> Option<String> {
        let digits = self.decode(index)?;
        Some(self.render(&digits))
    }

    /// Iterate the whole keyspace
    pub fn iter(&self) -> Candidates<'_> {
        self.iter_range(0..self.size)
    }

    /// Iterate the candidates with indices in `range` (clamped to the keyspace)
    pub fn iter_range(&self, range: Range<u128>) -> Candidates<'_> {
        let end = range.end.min(self.size);
        let start = range.start.min(end);
        let digits = self
            .decode(start)
            .unwrap_or_else(|| vec![0; self.positions]);

        Candidates {
            keyspace: self,
            digits,
            remaining: end - start,
        }
    }

    /// Contiguous index range of worker `worker` out of `workers`.
    ///
    /// Shards cover the keyspace exactly once; the first `size % workers`
    /// shards get one extra candidate.
    pub fn shard(&self, worker: usize, workers: usize) -> Range<u128> {
        shard_range(self.size, worker, workers)
    }

    /// Enumerate every candidate into memory, checking `cancel` between candidates.
    ///
    /// When the flag is raised the candidates produced so far are returned
    /// with `interrupted` set; it is up to the caller to use or drop them.
    pub fn materialize(&self, cancel: &AtomicBool) -> Materialized {
        self.materialize_with_progress(cancel, |_| {})
    }

    /// Same as [`Keyspace::materialize`], reporting the running count every
    /// [`PROGRESS_INTERVAL`] candidates and once at the end
    pub fn materialize_with_progress<F>(&self, cancel: &AtomicBool, mut on_progress: F) -> Materialized
    where
        F: FnMut(usize),
    {
        let capacity = usize::try_from(self.size).unwrap_or(usize::MAX).min(1 << 24);
        let mut candidates = Vec::with_capacity(capacity);

        for candidate in self.iter() {
            if candidates.len() % PROGRESS_INTERVAL == 0 {
                on_progress(candidates.len());
            }
            if cancel.load(Ordering::Relaxed) {
                debug!(
                    generated = candidates.len(),
                    total = %self.size,
                    "enumeration interrupted"
                );
                return Materialized {
                    candidates,
                    interrupted: true,
                };
            }
            candidates.push(candidate);
        }
        on_progress(candidates.len());

        Materialized {
            candidates,
            interrupted: false,
        }
    }

    fn decode(&self, mut index: u128) -> Option<Vec<usize>> {
        if index >= self.size {
            return None;
        }
        let base = self.alphabet.len() as u128;
        let mut digits = vec![0usize; self.positions];
        for digit in digits.iter_mut().rev() {
            *digit = (index % base) as usize;
            index /= base;
        }
        Some(digits)
    }

    fn render(&self, digits: &[usize]) -> String {
        let chars = self.alphabet.chars();
        let mut out = String::with_capacity(self.prefix.len() + digits.len() * 4);
        out.push_str(&self.prefix);
        out.extend(digits.iter().map(|&d| chars[d]));
        out
    }
}

impl<'a> IntoIterator for &'a Keyspace {
    type Item = String;
    type IntoIter = Candidates<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split `0..size` into `workers` contiguous ranges and return the `worker`-th
pub fn shard_range(size: u128, worker: usize, workers: usize) -> Range<u128> {
    let workers = workers.max(1) as u128;
    let worker = (worker as u128).min(workers);
    let chunk = size / workers;
    let extra = size % workers;

    let start = worker * chunk + worker.min(extra);
    let len = if worker < extra { chunk + 1 } else { chunk };
    let end = (start + len).min(size);
    start.min(size)..end
}

/// Forward-only iterator over a keyspace range.
///
/// Advances by odometer increment, so each step costs one string build
/// rather than a full index decode.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    keyspace: &'a Keyspace,
    digits: Vec<usize>,
    remaining: u128,
}

impl Candidates<'_> {
    /// Candidates left in this iterator
    pub fn remaining(&self) -> u128 {
        self.remaining
    }

    fn advance(&mut self) {
        let base = self.keyspace.alphabet.len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let candidate = self.keyspace.render(&self.digits);
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
