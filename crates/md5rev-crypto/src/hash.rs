//! MD5 digests and repeated hashing over hex output

use md5::{Digest, Md5};

/// Length of a lowercase hex MD5 digest
pub const HEX_DIGEST_LEN: usize = 32;

/// MD5 hash
pub fn md5(data: &[u8]) -> [u8; 16] {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// MD5 as a lowercase hex string
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(md5(data))
}

/// Iterated MD5: hash `word`, then re-hash the hex digest `times - 1` more times.
///
/// `times == 0` returns the word unchanged.
pub fn md5_iter(word: &str, times: u32) -> String {
    if times == 0 {
        return word.to_string();
    }
    let mut chain = DigestChain::new(word);
    for _ in 1..times {
        chain.next_hex();
    }
    String::from_utf8_lossy(chain.next_hex()).into_owned()
}

/// Successive digests of a word without reallocating between rounds.
///
/// The first call to [`DigestChain::next_hex`] yields `md5(word)`, each later
/// call yields the MD5 of the previous hex digest.
pub struct DigestChain<'a> {
    word: &'a [u8],
    started: bool,
    buf: [u8; HEX_DIGEST_LEN],
}

impl<'a> DigestChain<'a> {
    pub fn new(word: &'a str) -> Self {
        Self {
            word: word.as_bytes(),
            started: false,
            buf: [0u8; HEX_DIGEST_LEN],
        }
    }

    /// Advance one round and return the current lowercase hex digest (ASCII)
    pub fn next_hex(&mut self) -> &[u8] {
        let digest = if self.started {
            md5(&self.buf)
        } else {
            self.started = true;
            md5(self.word)
        };
        // buf is exactly twice the digest length, so encoding cannot fail
        let _ = hex::encode_to_slice(digest, &mut self.buf);
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_vectors() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(md5_hex(b"password"), "5f4dcc3b5aa765d61d8327deb882cf99");
    }

    #[test]
    fn test_single_iteration_is_plain_md5() {
        assert_eq!(md5_iter("password", 1), "5f4dcc3b5aa765d61d8327deb882cf99");
    }

    #[test]
    fn test_iterations_compose() {
        for word in ["", "abc", "hello world", "пароль"] {
            for r in 1..5 {
                assert_eq!(md5_iter(word, r + 1), md5_hex(md5_iter(word, r).as_bytes()));
            }
        }
    }

    #[test]
    fn test_zero_iterations_returns_word() {
        assert_eq!(md5_iter("abc", 0), "abc");
    }

    #[test]
    fn test_digest_chain_matches_md5_iter() {
        let mut chain = DigestChain::new("abc");
        for r in 1..=4 {
            assert_eq!(chain.next_hex(), md5_iter("abc", r).as_bytes());
        }
    }
}
