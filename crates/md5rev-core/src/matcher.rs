//! Iterated-MD5 hash matching

use serde::{Deserialize, Serialize};

use md5rev_crypto::DigestChain;

/// The digest to reach and how many hash rounds to try per candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTarget {
    /// Lowercase hex digest, compared byte for byte
    pub hash: String,
    /// Highest repetition count tried per candidate
    pub max_collisions: u32,
}

impl SearchTarget {
    /// Target a plain (single-round) MD5 digest
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            max_collisions: 1,
        }
    }

    pub fn with_max_collisions(mut self, max_collisions: u32) -> Self {
        self.max_collisions = max_collisions;
        self
    }
}

/// A matching candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Position of the candidate in its source
    pub index: u128,
    pub word: String,
    /// Repetition count that produced the target
    pub collisions: u32,
}

/// Checks candidates against a [`SearchTarget`]
#[derive(Debug, Clone)]
pub struct HashMatcher {
    target: SearchTarget,
}

impl HashMatcher {
    pub fn new(target: SearchTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &SearchTarget {
        &self.target
    }

    /// Lowest repetition count in `1..=max_collisions` whose digest equals the target
    pub fn matches(&self, word: &str) -> Option<u32> {
        let target = self.target.hash.as_bytes();
        let mut chain = DigestChain::new(word);
        (1..=self.target.max_collisions).find(|_| chain.next_hex() == target)
    }

    /// Sequential scan; the first matching candidate in order wins
    pub fn scan<I, S>(&self, candidates: I) -> Option<Hit>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .enumerate()
            .find_map(|(index, candidate)| {
                let word = candidate.as_ref();
                self.matches(word).map(|collisions| Hit {
                    index: index as u128,
                    word: word.to_string(),
                    collisions,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5rev_crypto::md5_iter;

    #[test]
    fn test_single_round_match() {
        let matcher = HashMatcher::new(SearchTarget::new("5f4dcc3b5aa765d61d8327deb882cf99"));
        assert_eq!(matcher.matches("password"), Some(1));
        assert_eq!(matcher.matches("Password"), None);
    }

    #[test]
    fn test_third_round_match() {
        let target = SearchTarget::new(md5_iter("abc", 3)).with_max_collisions(3);
        let matcher = HashMatcher::new(target);

        let hit = matcher.scan(["aaa", "abb", "abc", "acc"]).unwrap();
        assert_eq!(hit.word, "abc");
        assert_eq!(hit.collisions, 3);
        assert_eq!(hit.index, 2);
    }

    #[test]
    fn test_round_beyond_limit_not_found() {
        let target = SearchTarget::new(md5_iter("abc", 3)).with_max_collisions(2);
        let matcher = HashMatcher::new(target);
        assert_eq!(matcher.matches("abc"), None);
    }

    #[test]
    fn test_zero_max_collisions_never_matches() {
        let target = SearchTarget::new(md5_iter("abc", 1)).with_max_collisions(0);
        assert_eq!(HashMatcher::new(target).matches("abc"), None);
    }

    #[test]
    fn test_uppercase_target_never_matches() {
        let target = SearchTarget::new(md5_iter("abc", 1).to_uppercase());
        assert_eq!(HashMatcher::new(target).matches("abc"), None);
    }

    #[test]
    fn test_exhaustion_without_false_match() {
        let matcher = HashMatcher::new(SearchTarget::new("not-a-digest").with_max_collisions(4));
        assert!(matcher.scan(["a", "b", "c", "password"]).is_none());
    }

    #[test]
    fn test_first_candidate_wins_over_lower_round() {
        // The hex digest of "a" reaches the target in one round, "a" itself needs two
        let digest_of_a = md5_iter("a", 1);
        let matcher = HashMatcher::new(SearchTarget::new(md5_iter("a", 2)).with_max_collisions(2));

        assert_eq!(matcher.matches(&digest_of_a), Some(1));
        let hit = matcher.scan(["a".to_string(), digest_of_a]).unwrap();
        assert_eq!(hit.word, "a");
        assert_eq!(hit.collisions, 2);
    }
}
