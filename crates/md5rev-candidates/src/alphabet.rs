//! Candidate alphabets

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CandidateError;

/// Ordered characters used to build candidates.
///
/// Duplicates are kept: a repeated character simply yields repeated
/// candidates. Use [`Alphabet::deduplicated`] to opt out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from the characters of a string
    pub fn new(chars: &str) -> Result<Self, CandidateError> {
        Self::from_chars(chars.chars().collect())
    }

    /// Build an alphabet from a character vector
    pub fn from_chars(chars: Vec<char>) -> Result<Self, CandidateError> {
        if chars.is_empty() {
            return Err(CandidateError::EmptyAlphabet);
        }
        Ok(Self { chars })
    }

    /// Number of characters, duplicates included
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false, an alphabet cannot be built empty
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Copy of this alphabet keeping only the first occurrence of each character
    pub fn deduplicated(&self) -> Self {
        let mut seen = HashSet::with_capacity(self.chars.len());
        let chars = self
            .chars
            .iter()
            .copied()
            .filter(|c| seen.insert(*c))
            .collect();
        Self { chars }
    }

    /// Whether any character appears more than once
    pub fn has_duplicates(&self) -> bool {
        self.deduplicated().len() != self.len()
    }
}

impl FromStr for Alphabet {
    type Err = CandidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Alphabet {
    type Error = CandidateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.chars.into_iter().collect()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
