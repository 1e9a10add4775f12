//! md5rev Crypto Primitives
//!
//! MD5 digests and the iterated-digest chain used by the search engine.

pub mod hash;

pub use self::hash::{md5, md5_hex, md5_iter, DigestChain, HEX_DIGEST_LEN};

// Re-export dependencies for use by other crates
pub use hex;
