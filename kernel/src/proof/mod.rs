//! Proof module: canonical JSON bytes and content hashing of artifacts.

pub mod canon;
pub mod hash;
