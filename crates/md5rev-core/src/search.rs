//! Hash search engine

use std::ops::Range;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, RecvTimeoutError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use md5rev_candidates::{shard_range, Alphabet, CandidateSource, Keyspace, Materialized, WordList};
use md5rev_crypto::md5_hex;

use crate::matcher::{HashMatcher, Hit, SearchTarget};
use crate::stats::{Phase, SearchStats};
use crate::SearchError;

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of threads (0 = auto)
    pub threads: usize,
    /// Candidates per worker per round
    pub batch_size: usize,
    /// Maximum time in seconds (0 = unlimited)
    pub max_time_secs: u64,
    /// Maximum candidates tested (0 = unlimited)
    pub max_candidates: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: 0, // Auto-detect
            batch_size: 4096,
            max_time_secs: 0,
            max_candidates: 0,
        }
    }
}

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The recovered plaintext
    pub word: String,
    /// Repetition count that reached the target
    pub collisions: u32,
    /// Target digest
    pub target: String,
    /// Single-round MD5 of `word`, for reference
    pub digest: String,
    /// Total candidates tested
    pub candidates_tested: u64,
    /// Time taken in seconds
    pub time_secs: f64,
    /// Candidates per second achieved
    pub candidates_per_second: f64,
}

/// How a run ended
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(SearchResult),
    /// Every candidate and repetition count was tried
    Exhausted { candidates_tested: u64, time_secs: f64 },
    /// Cancelled, or a time/candidate limit was hit
    Stopped { candidates_tested: u64, time_secs: f64 },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            SearchOutcome::Found(result) => Some(result),
            _ => None,
        }
    }

    pub fn candidates_tested(&self) -> u64 {
        match self {
            SearchOutcome::Found(result) => result.candidates_tested,
            SearchOutcome::Exhausted { candidates_tested, .. }
            | SearchOutcome::Stopped { candidates_tested, .. } => *candidates_tested,
        }
    }

    pub fn time_secs(&self) -> f64 {
        match self {
            SearchOutcome::Found(result) => result.time_secs,
            SearchOutcome::Exhausted { time_secs, .. }
            | SearchOutcome::Stopped { time_secs, .. } => *time_secs,
        }
    }
}

/// What to do with candidates left by an interrupted enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialDecision {
    /// Scan what was generated, then carry on with the next length
    Continue,
    /// End the whole run
    Abort,
}

enum ScanEnd {
    Hit(Hit),
    Exhausted,
    Stopped,
}

/// Iterated-MD5 search engine.
///
/// A stop request (from [`SearchStats::stop`], an interrupt or a limit)
/// is sticky: once stopped, later runs on the same engine end immediately.
pub struct Md5Search {
    matcher: HashMatcher,
    config: SearchConfig,
    threads: usize,
    pool: rayon::ThreadPool,
    stats: Arc<SearchStats>,
}

impl Md5Search {
    /// Create a new search
    pub fn new(target: SearchTarget, config: SearchConfig) -> Result<Self, SearchError> {
        let threads = if config.threads == 0 {
            num_cpus::get()
        } else {
            config.threads
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;

        Ok(Self {
            matcher: HashMatcher::new(target),
            config,
            threads,
            pool,
            stats: SearchStats::new(),
        })
    }

    pub fn target(&self) -> &SearchTarget {
        self.matcher.target()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Worker threads in use
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Shared statistics; also the handle for stopping a running search
    pub fn stats(&self) -> Arc<SearchStats> {
        Arc::clone(&self.stats)
    }

    /// Build the keyspace of every length in `min_length..=max_length`.
    ///
    /// Nothing is enumerated; this only validates the parameters.
    pub fn plan_lengths(
        &self,
        min_length: usize,
        max_length: usize,
        alphabet: &Alphabet,
        prefix: Option<&str>,
    ) -> Result<Vec<Keyspace>, SearchError> {
        if min_length == 0 || min_length > max_length {
            return Err(SearchError::InvalidRange {
                min: min_length,
                max: max_length,
            });
        }

        let keyspaces = (min_length..=max_length)
            .map(|length| Keyspace::new(length, alphabet.clone(), prefix))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keyspaces)
    }

    /// Search every length in `min_length..=max_length`, shortest first.
    ///
    /// Each keyspace is scanned lazily; the first match ends the run.
    pub fn run_lengths(
        &self,
        min_length: usize,
        max_length: usize,
        alphabet: &Alphabet,
        prefix: Option<&str>,
    ) -> Result<SearchOutcome, SearchError> {
        let keyspaces = self.plan_lengths(min_length, max_length, alphabet, prefix)?;
        self.stats.begin();

        for keyspace in &keyspaces {
            info!(
                "Processing length {}: {} candidates",
                keyspace.length(),
                keyspace.size()
            );
            self.stats.begin_source(keyspace.length(), keyspace.size());

            match self.scan(keyspace) {
                ScanEnd::Hit(hit) => return Ok(self.found(hit)),
                ScanEnd::Stopped => return Ok(self.stopped()),
                ScanEnd::Exhausted => {
                    info!("No match at length {}", keyspace.length());
                }
            }
        }

        Ok(self.exhausted())
    }

    /// Search every length, enumerating each keyspace into memory before scanning it.
    ///
    /// An interrupt during enumeration ([`SearchStats::interrupt`]) stops
    /// only the enumeration; `decide` is then shown the partial candidates
    /// and chooses whether to scan them or end the run.
    pub fn run_lengths_eager<D>(
        &self,
        min_length: usize,
        max_length: usize,
        alphabet: &Alphabet,
        prefix: Option<&str>,
        decide: D,
    ) -> Result<SearchOutcome, SearchError>
    where
        D: FnMut(&Keyspace, &Materialized) -> PartialDecision,
    {
        self.eager_lengths(min_length, max_length, alphabet, prefix, decide, |_| {})
    }

    /// Body of [`Md5Search::run_lengths_eager`]; `on_generated` sees every
    /// progress report of the enumeration
    fn eager_lengths<D, G>(
        &self,
        min_length: usize,
        max_length: usize,
        alphabet: &Alphabet,
        prefix: Option<&str>,
        mut decide: D,
        mut on_generated: G,
    ) -> Result<SearchOutcome, SearchError>
    where
        D: FnMut(&Keyspace, &Materialized) -> PartialDecision,
        G: FnMut(usize),
    {
        let keyspaces = self.plan_lengths(min_length, max_length, alphabet, prefix)?;
        self.stats.begin();

        for keyspace in &keyspaces {
            if !self.stats.is_running() {
                return Ok(self.stopped());
            }

            info!("Processing length: {}", keyspace.length());
            self.stats.begin_source(keyspace.length(), keyspace.size());
            self.stats.set_generated(0);
            // An interrupt that landed after the previous enumeration finished is stale
            self.stats.enumeration_cancel.store(false, Ordering::Relaxed);
            self.stats.set_phase(Phase::Generating);

            let materialized = keyspace
                .materialize_with_progress(&self.stats.enumeration_cancel, |generated| {
                    self.stats.set_generated(generated as u64);
                    on_generated(generated);
                });
            if materialized.interrupted {
                self.stats.set_phase(Phase::AwaitingDecision);
                info!(
                    "Enumeration interrupted after {} of {} candidates",
                    materialized.candidates.len(),
                    keyspace.size()
                );
                if decide(keyspace, &materialized) == PartialDecision::Abort {
                    self.stats.stop();
                    return Ok(self.stopped());
                }
            }
            self.stats.set_phase(Phase::Scanning);

            info!("Total candidates: {}", materialized.candidates.len());
            self.stats
                .begin_source(keyspace.length(), materialized.candidates.len() as u128);

            match self.scan(&materialized.candidates) {
                ScanEnd::Hit(hit) => return Ok(self.found(hit)),
                ScanEnd::Stopped => return Ok(self.stopped()),
                ScanEnd::Exhausted => {
                    info!("No match at length {}", keyspace.length());
                }
            }
        }

        Ok(self.exhausted())
    }

    /// Load a word list and scan it in file order
    pub fn run_wordlist(&self, path: impl AsRef<Path>) -> Result<SearchOutcome, SearchError> {
        self.stats.begin();
        self.stats.set_phase(Phase::LoadingList);

        let list = match WordList::load(path) {
            Ok(list) => list,
            Err(e) => {
                self.stats.set_phase(Phase::Done);
                return Err(e.into());
            }
        };

        Ok(self.scan_all(&list))
    }

    /// Scan any candidate source in index order
    pub fn scan_source(&self, source: &dyn CandidateSource) -> SearchOutcome {
        self.stats.begin();
        self.scan_all(source)
    }

    /// Scan a whole source within the current run, keeping its clock and counters
    fn scan_all(&self, source: &dyn CandidateSource) -> SearchOutcome {
        info!("Scanning {}", source.describe());
        self.stats.begin_source(0, source.len());

        match self.scan(source) {
            ScanEnd::Hit(hit) => self.found(hit),
            ScanEnd::Stopped => self.stopped(),
            ScanEnd::Exhausted => self.exhausted(),
        }
    }

    /// Run `run` on a helper thread and call `callback` every `interval` until it returns
    pub fn with_progress<R, F, C>(&self, interval: Duration, run: F, mut callback: C) -> R
    where
        R: Send,
        F: FnOnce(&Self) -> R + Send,
        C: FnMut(&SearchStats),
    {
        let (done_tx, done_rx) = bounded::<()>(1);

        thread::scope(|scope| {
            let handle = scope.spawn(move || {
                let result = run(self);
                let _ = done_tx.send(());
                result
            });

            loop {
                callback(&*self.stats);
                match done_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            }

            match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        })
    }

    fn scan(&self, source: &dyn CandidateSource) -> ScanEnd {
        self.stats.set_phase(Phase::Scanning);

        let total = source.len();
        let round = (self.threads as u128) * (self.config.batch_size.max(1) as u128);
        let mut offset = 0u128;

        while offset < total {
            if self.limit_reached() {
                info!("Search limit reached, stopping");
                self.stats.stop();
            }
            if !self.stats.is_running() {
                return ScanEnd::Stopped;
            }

            let end = offset.saturating_add(round).min(total);
            if let Some(hit) = self.scan_round(source, offset..end) {
                return ScanEnd::Hit(hit);
            }
            offset = end;
        }

        if self.stats.is_running() {
            ScanEnd::Exhausted
        } else {
            ScanEnd::Stopped
        }
    }

    /// Scan one window with every worker on its own contiguous shard.
    ///
    /// A worker gives up once a lower shard has matched, so the lowest-index
    /// match of the window is always found.
    fn scan_round(&self, source: &dyn CandidateSource, window: Range<u128>) -> Option<Hit> {
        let threads = self.threads;
        let first_hit_shard = AtomicUsize::new(usize::MAX);
        let (tx, rx) = unbounded::<Hit>();
        let window_len = window.end - window.start;

        self.pool.install(|| {
            (0..threads).into_par_iter().for_each_with(tx, |tx, worker| {
                let shard = shard_range(window_len, worker, threads);
                let start = window.start + shard.start;
                let end = window.start + shard.end;
                let mut tested = 0u64;

                for (offset, candidate) in source.range(start..end).enumerate() {
                    if first_hit_shard.load(Ordering::Relaxed) < worker || !self.stats.is_running() {
                        break;
                    }
                    tested += 1;

                    if let Some(collisions) = self.matcher.matches(&candidate) {
                        first_hit_shard.fetch_min(worker, Ordering::Relaxed);
                        let _ = tx.send(Hit {
                            index: start + offset as u128,
                            word: candidate.into_owned(),
                            collisions,
                        });
                        break;
                    }
                }

                self.stats.add_candidates(tested);
            });
        });

        let hit = rx.try_iter().min_by_key(|hit| hit.index);
        if let Some(hit) = &hit {
            debug!(index = %hit.index, collisions = hit.collisions, "match in round");
        }
        hit
    }

    fn limit_reached(&self) -> bool {
        let max_candidates = self.config.max_candidates;
        let max_time = self.config.max_time_secs;

        (max_candidates > 0 && self.stats.total_candidates() >= max_candidates)
            || (max_time > 0 && self.stats.elapsed().as_secs() >= max_time)
    }

    fn found(&self, hit: Hit) -> SearchOutcome {
        self.stats.mark_found();
        self.stats.set_phase(Phase::Done);

        let time_secs = self.stats.elapsed().as_secs_f64();
        info!(
            "Found: {} with {} collisions in {:.2}s",
            hit.word, hit.collisions, time_secs
        );

        SearchOutcome::Found(SearchResult {
            digest: md5_hex(hit.word.as_bytes()),
            word: hit.word,
            collisions: hit.collisions,
            target: self.matcher.target().hash.clone(),
            candidates_tested: self.stats.total_candidates(),
            time_secs,
            candidates_per_second: self.stats.candidates_per_second(),
        })
    }

    fn exhausted(&self) -> SearchOutcome {
        self.stats.set_phase(Phase::Done);
        SearchOutcome::Exhausted {
            candidates_tested: self.stats.total_candidates(),
            time_secs: self.stats.elapsed().as_secs_f64(),
        }
    }

    fn stopped(&self) -> SearchOutcome {
        self.stats.set_phase(Phase::Done);
        SearchOutcome::Stopped {
            candidates_tested: self.stats.total_candidates(),
            time_secs: self.stats.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5rev_candidates::{CandidateError, PROGRESS_INTERVAL};
    use md5rev_crypto::md5_iter;
    use std::io::Write;

    fn search(target: SearchTarget, threads: usize, batch_size: usize) -> Md5Search {
        let config = SearchConfig {
            threads,
            batch_size,
            ..Default::default()
        };
        Md5Search::new(target, config).unwrap()
    }

    #[test]
    fn test_find_plain_md5_across_lengths() {
        let target = SearchTarget::new(md5_hex(b"ba1"));
        let search = search(target.clone(), 4, 3);
        let alphabet = Alphabet::new("ab12").unwrap();

        let outcome = search.run_lengths(1, 4, &alphabet, None).unwrap();
        let result = outcome.result().unwrap();
        assert_eq!(result.word, "ba1");
        assert_eq!(result.collisions, 1);
        assert_eq!(result.digest, target.hash);
        assert_eq!(result.target, target.hash);
    }

    #[test]
    fn test_find_iterated_md5() {
        let target = SearchTarget::new(md5_iter("abc", 3)).with_max_collisions(3);
        let search = search(target, 3, 5);
        let alphabet = Alphabet::new("abc").unwrap();

        let outcome = search.run_lengths(3, 3, &alphabet, None).unwrap();
        let result = outcome.result().unwrap();
        assert_eq!(result.word, "abc");
        assert_eq!(result.collisions, 3);
        assert_eq!(result.digest, md5_iter("abc", 1));
    }

    #[test]
    fn test_find_with_prefix() {
        let target = SearchTarget::new(md5_hex(b"pw42"));
        let search = search(target, 2, 7);
        let alphabet = Alphabet::new("0123456789").unwrap();

        let outcome = search.run_lengths(3, 5, &alphabet, Some("pw")).unwrap();
        assert_eq!(outcome.result().unwrap().word, "pw42");
        // all of length 3 (10) plus the first 43 of length 4
        assert!(outcome.candidates_tested() >= 53);
    }

    #[test]
    fn test_exhaustion_counts_every_candidate() {
        let search = search(SearchTarget::new("0".repeat(32)), 4, 2);
        let alphabet = Alphabet::new("ab").unwrap();

        let outcome = search.run_lengths(1, 3, &alphabet, None).unwrap();
        assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
        assert_eq!(outcome.candidates_tested(), 2 + 4 + 8);
    }

    #[test]
    fn test_first_in_order_wins_across_workers() {
        let digest_of_a = md5_iter("a", 1);
        let mut words: Vec<String> = (0..400).map(|i| format!("w{}", i)).collect();
        words[10] = "a".to_string();
        words[350] = digest_of_a;

        let target = SearchTarget::new(md5_iter("a", 2)).with_max_collisions(2);
        for threads in [1, 2, 4, 8] {
            let search = search(target.clone(), threads, 100);
            let outcome = search.scan_source(&words);
            let result = outcome.result().unwrap();
            assert_eq!(result.word, "a", "threads = {}", threads);
            assert_eq!(result.collisions, 2);
        }
    }

    #[test]
    fn test_prefix_too_long_rejected_before_work() {
        let search = search(SearchTarget::new(md5_hex(b"abc")), 2, 10);
        let alphabet = Alphabet::new("abc").unwrap();

        let err = search.run_lengths(2, 4, &alphabet, Some("abc")).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Candidates(CandidateError::PrefixTooLong { .. })
        ));
        assert_eq!(search.stats().total_candidates(), 0);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let search = search(SearchTarget::new(md5_hex(b"abc")), 1, 10);
        let alphabet = Alphabet::new("abc").unwrap();

        assert!(matches!(
            search.run_lengths(3, 2, &alphabet, None),
            Err(SearchError::InvalidRange { min: 3, max: 2 })
        ));
        assert!(matches!(
            search.run_lengths(0, 2, &alphabet, None),
            Err(SearchError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_wordlist_found() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "foo\nbar\npassword\nbaz\n").unwrap();

        let search = search(SearchTarget::new("5f4dcc3b5aa765d61d8327deb882cf99"), 2, 1);
        let outcome = search.run_wordlist(file.path()).unwrap();
        let result = outcome.result().unwrap();
        assert_eq!(result.word, "password");
        assert_eq!(result.collisions, 1);
    }

    #[test]
    fn test_wordlist_exhausted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "foo\nbar\n").unwrap();

        let search = search(SearchTarget::new("5f4dcc3b5aa765d61d8327deb882cf99"), 2, 1);
        let outcome = search.run_wordlist(file.path()).unwrap();
        assert!(matches!(outcome, SearchOutcome::Exhausted { candidates_tested: 2, .. }));
    }

    #[test]
    fn test_missing_wordlist_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let search = search(SearchTarget::new(md5_hex(b"x")), 1, 1);

        let err = search.run_wordlist(dir.path().join("nope.txt")).unwrap_err();
        assert!(err.is_resource_error());
        assert_eq!(search.stats().phase(), Phase::Done);
    }

    #[test]
    fn test_candidate_limit_stops() {
        let config = SearchConfig {
            threads: 2,
            batch_size: 100,
            max_candidates: 1000,
            ..Default::default()
        };
        let search = Md5Search::new(SearchTarget::new("0".repeat(32)), config).unwrap();
        let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap();

        let outcome = search.run_lengths(5, 5, &alphabet, None).unwrap();
        assert!(matches!(outcome, SearchOutcome::Stopped { .. }));
        assert!(outcome.candidates_tested() >= 1000);
        assert!(outcome.candidates_tested() < 26u64.pow(5));
    }

    #[test]
    fn test_stop_before_run() {
        let search = search(SearchTarget::new(md5_hex(b"a")), 2, 10);
        search.stats().stop();

        let alphabet = Alphabet::new("ab").unwrap();
        let outcome = search.run_lengths(1, 2, &alphabet, None).unwrap();
        assert!(matches!(outcome, SearchOutcome::Stopped { candidates_tested: 0, .. }));
    }

    #[test]
    fn test_eager_run_matches_lazy_run() {
        let target = SearchTarget::new(md5_iter("cab", 2)).with_max_collisions(2);
        let search = search(target, 4, 4);
        let alphabet = Alphabet::new("abc").unwrap();

        let mut asked = false;
        let outcome = search
            .run_lengths_eager(1, 4, &alphabet, None, |_, _| {
                asked = true;
                PartialDecision::Abort
            })
            .unwrap();
        assert!(!asked);
        let result = outcome.result().unwrap();
        assert_eq!(result.word, "cab");
        assert_eq!(result.collisions, 2);
    }

    #[test]
    fn test_eager_interrupt_continue_scans_partial() {
        let search = search(SearchTarget::new("0".repeat(32)), 2, 1024);
        let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz0123456789").unwrap();
        let stats = search.stats();

        let mut partial = 0usize;
        let outcome = search
            .eager_lengths(
                4,
                4,
                &alphabet,
                None,
                |_, materialized| {
                    partial = materialized.candidates.len();
                    PartialDecision::Continue
                },
                |generated| {
                    if generated >= PROGRESS_INTERVAL {
                        stats.interrupt();
                    }
                },
            )
            .unwrap();

        assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
        assert_eq!(partial, PROGRESS_INTERVAL);
        assert_eq!(outcome.candidates_tested(), partial as u64);
        assert!(stats.is_running());
    }

    #[test]
    fn test_eager_interrupt_abort_stops() {
        let search = search(SearchTarget::new("0".repeat(32)), 2, 1024);
        let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz0123456789").unwrap();
        let stats = search.stats();

        let outcome = search
            .eager_lengths(
                4,
                5,
                &alphabet,
                None,
                |_, _| PartialDecision::Abort,
                |generated| {
                    if generated >= PROGRESS_INTERVAL {
                        stats.interrupt();
                    }
                },
            )
            .unwrap();

        assert!(matches!(outcome, SearchOutcome::Stopped { candidates_tested: 0, .. }));
        assert!(!stats.is_running());
    }

    #[test]
    fn test_interrupt_after_enumeration_does_not_cut_next_length() {
        let search = search(SearchTarget::new(md5_hex(b"ba")), 2, 4);
        let alphabet = Alphabet::new("ab").unwrap();
        let stats = search.stats();

        let mut asked = false;
        let outcome = search
            .eager_lengths(
                1,
                2,
                &alphabet,
                None,
                |_, _| {
                    asked = true;
                    PartialDecision::Abort
                },
                |generated| {
                    // final report of length 1, after its enumeration is complete
                    if generated == 2 && stats.current_length() == 1 {
                        stats.interrupt();
                    }
                },
            )
            .unwrap();

        assert!(!asked);
        assert_eq!(outcome.result().unwrap().word, "ba");
    }

    #[test]
    fn test_wordlist_scan_keeps_run_clock() {
        let search = search(SearchTarget::new(md5_hex(b"x")), 1, 4);
        search.stats.begin();
        search.stats.set_phase(Phase::LoadingList);
        std::thread::sleep(Duration::from_millis(30));

        let words = vec!["w".to_string(), "x".to_string()];
        let outcome = search.scan_all(&words);
        assert_eq!(outcome.result().unwrap().word, "x");
        assert!(outcome.time_secs() >= 0.03);
    }

    #[test]
    fn test_with_progress_returns_run_result() {
        let search = search(SearchTarget::new(md5_hex(b"ab")), 2, 2);
        let alphabet = Alphabet::new("ab").unwrap();

        let mut calls = 0;
        let outcome = search.with_progress(
            Duration::from_millis(5),
            |s| s.run_lengths(1, 2, &alphabet, None),
            |_| calls += 1,
        );
        assert_eq!(outcome.unwrap().result().unwrap().word, "ab");
        assert!(calls >= 1);
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = SearchOutcome::Exhausted {
            candidates_tested: 3,
            time_secs: 0.5,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "exhausted");
        assert_eq!(json["candidates_tested"], 3);
    }
}
