//! SHA-256 digests of canonical values.
//!
//! Digests are lowercase hex (64 characters) and depend only on the UTF-8
//! bytes of the canonical value, so the same person hashes to the same key in
//! every run and on every platform.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// What to do with a present-but-empty canonical value.
///
/// The two platforms accept either, but the produced files differ:
/// `Absent` leaves the hashed cell blank (e.g. a one-word name has no
/// last-name digest), `Digest` emits the digest of the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValuePolicy {
    /// Empty strings hash to an absent digest.
    #[default]
    Absent,
    /// Empty strings hash like any other value.
    Digest,
}

/// Lowercase hex SHA-256 of `value`'s UTF-8 bytes.
pub fn sha256_hex(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    format!("{digest:x}")
}

/// Hash with the default [`EmptyValuePolicy::Absent`].
pub fn hash_value(value: Option<&str>) -> Option<String> {
    hash_with_policy(value, EmptyValuePolicy::default())
}

/// Hash a canonical value. Absent stays absent; empty follows `policy`.
pub fn hash_with_policy(value: Option<&str>, policy: EmptyValuePolicy) -> Option<String> {
    match (value?, policy) {
        ("", EmptyValuePolicy::Absent) => None,
        (v, _) => Some(sha256_hex(v)),
    }
}
