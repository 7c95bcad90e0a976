//! Opaque refresh tokens.
//!
//! Raw tokens leave the process exactly once, in the login or refresh
//! response. Only their SHA-256 digest is ever persisted.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Random bytes per refresh token (512 bits).
const TOKEN_BYTES: usize = 64;

/// Generates a cryptographically random, hex-encoded opaque token.
#[must_use]
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hashes a token for at-rest storage and equality lookup.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
