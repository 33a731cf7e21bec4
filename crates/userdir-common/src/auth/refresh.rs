//! Opaque refresh secrets and their fingerprints
//!
//! A refresh secret is pure entropy, never signed and never stored: the store
//! only ever sees its SHA-256 fingerprint, which is what makes a leaked store
//! dump useless for session takeover.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Entropy per refresh secret (256 bits)
const REFRESH_SECRET_BYTES: usize = 32;

/// Generate a cryptographically random refresh secret, hex encoded
#[must_use]
pub fn generate_refresh_secret() -> String {
    let mut bytes = [0u8; REFRESH_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// One-way digest of a secret, safe to persist as a lookup key
#[must_use]
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(digest)
}
