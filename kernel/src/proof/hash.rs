//! Content hashing with domain separation.
//!
//! Algorithm: SHA-256 over `domain || data`. Every domain prefix is
//! null-terminated so that no prefix is a prefix of another.

use sha2::{Digest, Sha256};

/// A domain-separated digest rendered as `sha256:<hex>`.
///
/// Values built by [`canonical_hash`] or accepted by [`ContentHash::parse`]
/// always hold a non-empty algorithm and a non-empty digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Accept a rendered `algorithm:digest` string, e.g. one read back from
    /// a persisted report.
    #[must_use]
    pub fn parse(rendered: &str) -> Option<Self> {
        match rendered.split_once(':') {
            Some((alg, digest)) if !alg.is_empty() && !digest.is_empty() => {
                Some(Self(rendered.to_owned()))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        self.0.split_once(':').map_or("", |(alg, _)| alg)
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        self.0.split_once(':').map_or("", |(_, digest)| digest)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain prefix for search report hashing.
pub const DOMAIN_SEARCH_REPORT: &[u8] = b"WAYMARK::SEARCH_REPORT::V1\0";

/// Domain prefix for run configuration hashing.
pub const DOMAIN_SEARCH_CONFIG: &[u8] = b"WAYMARK::SEARCH_CONFIG::V1\0";

/// Domain prefix for plan hashing (operator name sequence + cost).
pub const DOMAIN_PLAN: &[u8] = b"WAYMARK::PLAN::V1\0";

/// Compute the canonical hash of `data` under `domain`.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let digest = Sha256::new().chain_update(domain).chain_update(data).finalize();
    ContentHash(format!("sha256:{}", hex::encode(digest)))
}
