//! Live search statistics

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use md5rev_candidates::{format_count, format_duration};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Ready = 0,
    LoadingList = 1,
    Generating = 2,
    Scanning = 3,
    /// Enumeration was interrupted and the caller is deciding what to do
    AwaitingDecision = 4,
    Done = 5,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Phase::LoadingList,
            2 => Phase::Generating,
            3 => Phase::Scanning,
            4 => Phase::AwaitingDecision,
            5 => Phase::Done,
            _ => Phase::Ready,
        }
    }
}

/// Thread-safe search statistics
#[derive(Debug)]
pub struct SearchStats {
    /// Total candidates tested
    pub candidates_tested: AtomicU64,
    /// Candidates materialized for the current length
    pub candidates_generated: AtomicU64,
    /// Size of the source being scanned (saturated at u64::MAX)
    source_size: AtomicU64,
    /// `candidates_tested` when the current source started
    source_base: AtomicU64,
    /// Candidate length of the current keyspace, 0 for word lists
    current_length: AtomicU64,
    /// Start time
    start_time: Mutex<Instant>,
    phase: AtomicU8,
    /// Whether search is running
    pub running: AtomicBool,
    /// Whether a match was found
    pub found: AtomicBool,
    /// Raised to cut an eager enumeration short
    pub enumeration_cancel: AtomicBool,
}

impl SearchStats {
    /// Create new stats
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reset counters and the clock for a new run.
    ///
    /// The `running` flag is left alone so a stop requested before the run
    /// starts still applies.
    pub fn begin(&self) {
        self.candidates_tested.store(0, Ordering::Relaxed);
        self.candidates_generated.store(0, Ordering::Relaxed);
        self.source_size.store(0, Ordering::Relaxed);
        self.source_base.store(0, Ordering::Relaxed);
        self.current_length.store(0, Ordering::Relaxed);
        self.found.store(false, Ordering::Relaxed);
        self.enumeration_cancel.store(false, Ordering::Relaxed);
        self.set_phase(Phase::Ready);
        if let Ok(mut start) = self.start_time.lock() {
            *start = Instant::now();
        }
    }

    /// Record the source about to be scanned
    pub fn begin_source(&self, length: usize, size: u128) {
        self.current_length.store(length as u64, Ordering::Relaxed);
        self.source_size
            .store(u64::try_from(size).unwrap_or(u64::MAX), Ordering::Relaxed);
        self.source_base
            .store(self.total_candidates(), Ordering::Relaxed);
    }

    /// Increment candidates tested by amount
    pub fn add_candidates(&self, count: u64) {
        self.candidates_tested.fetch_add(count, Ordering::Relaxed);
    }

    /// Get total candidates tested
    pub fn total_candidates(&self) -> u64 {
        self.candidates_tested.load(Ordering::Relaxed)
    }

    pub fn set_generated(&self, count: u64) {
        self.candidates_generated.store(count, Ordering::Relaxed);
    }

    /// Fraction of the current source already tested, in `0.0..=1.0`
    pub fn source_progress(&self) -> f64 {
        let size = self.source_size.load(Ordering::Relaxed);
        if size == 0 {
            return 0.0;
        }
        let done = self.total_candidates() - self.source_base.load(Ordering::Relaxed).min(self.total_candidates());
        (done as f64 / size as f64).min(1.0)
    }

    pub fn current_length(&self) -> usize {
        self.current_length.load(Ordering::Relaxed) as usize
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .lock()
            .map(|start| start.elapsed())
            .unwrap_or_default()
    }

    /// Get candidates per second
    pub fn candidates_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_candidates() as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Relaxed))
    }

    pub fn set_phase(&self, phase: Phase) {
        self.phase.store(phase as u8, Ordering::Relaxed);
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Stop the search
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Mark as found
    pub fn mark_found(&self) {
        self.found.store(true, Ordering::Relaxed);
        self.stop();
    }

    /// Check if found
    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Relaxed)
    }

    /// Operator interrupt (Ctrl-C).
    ///
    /// While an eager enumeration runs this only cuts the enumeration short,
    /// leaving the partial candidates to the caller; otherwise it stops the
    /// search.
    pub fn interrupt(&self) {
        if self.phase() == Phase::Generating {
            self.enumeration_cancel.store(true, Ordering::Relaxed);
        } else {
            self.stop();
        }
    }

    /// Get formatted stats string
    pub fn format(&self) -> String {
        match self.phase() {
            Phase::Generating => format!(
                "[Length {}][Generated {}/{}]",
                self.current_length(),
                format_count(self.candidates_generated.load(Ordering::Relaxed) as f64),
                format_count(self.source_size.load(Ordering::Relaxed) as f64),
            ),
            _ => {
                let rate = self.candidates_per_second();
                let progress = self.source_progress();
                let size = self.source_size.load(Ordering::Relaxed) as f64;
                let eta = if rate > 0.0 {
                    size * (1.0 - progress) / rate
                } else {
                    f64::INFINITY
                };

                format!(
                    "[{:.2} Mcand/s][Total {}][Length {} {:.1}%][Done in {}]",
                    rate / 1_000_000.0,
                    format_count(self.total_candidates() as f64),
                    self.current_length(),
                    progress * 100.0,
                    format_duration(eta)
                )
            }
        }
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            candidates_tested: AtomicU64::new(0),
            candidates_generated: AtomicU64::new(0),
            source_size: AtomicU64::new(0),
            source_base: AtomicU64::new(0),
            current_length: AtomicU64::new(0),
            start_time: Mutex::new(Instant::now()),
            phase: AtomicU8::new(Phase::Ready as u8),
            running: AtomicBool::new(true),
            found: AtomicBool::new(false),
            enumeration_cancel: AtomicBool::new(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_while_generating_only_cancels_enumeration() {
        let stats = SearchStats::new();
        stats.set_phase(Phase::Generating);
        stats.interrupt();
        assert!(stats.enumeration_cancel.load(Ordering::Relaxed));
        assert!(stats.is_running());
    }

    #[test]
    fn test_interrupt_while_scanning_stops() {
        let stats = SearchStats::new();
        stats.set_phase(Phase::Scanning);
        stats.interrupt();
        assert!(!stats.is_running());
    }

    #[test]
    fn test_source_progress() {
        let stats = SearchStats::new();
        stats.add_candidates(50);
        stats.begin_source(3, 200);
        stats.add_candidates(100);
        assert_eq!(stats.source_progress(), 0.5);
        assert_eq!(stats.current_length(), 3);
    }

    #[test]
    fn test_mark_found_stops() {
        let stats = SearchStats::new();
        stats.mark_found();
        assert!(stats.is_found());
        assert!(!stats.is_running());
    }

    #[test]
    fn test_begin_keeps_stop_request() {
        let stats = SearchStats::new();
        stats.add_candidates(10);
        stats.stop();
        stats.begin();
        assert_eq!(stats.total_candidates(), 0);
        assert!(!stats.is_running());
    }
}
