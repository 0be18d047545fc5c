//! Short share-id generation.
//!
//! Every project carries an 8-character share id drawn from a fixed 70-symbol
//! alphabet. The id is user-facing (copy-to-clipboard sharing) and must be
//! unique within the store; internal identity uses [`uuid::Uuid`] instead.

use std::collections::HashSet;

use rand::Rng;

/// Alphabet for share ids: A–Z, a–z, 0–9 and 8 symbol characters (70 total).
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Length of a share id in characters.
pub const SHARE_ID_LEN: usize = 8;

/// Generate one 8-character id, sampled uniformly with replacement from
/// [`ALPHABET`].
pub fn generate_short_id() -> String {
    let mut rng = rand::thread_rng();
    (0..SHARE_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generate a share id not already present in `existing`.
///
/// Retries until a free id is found. With 70^8 possible ids a collision is
/// already negligible at any realistic store size, so no retry cap is applied;
/// collisions are logged at debug level for diagnostics.
pub fn generate_unique_project_id(existing: &HashSet<String>) -> String {
    loop {
        let candidate = generate_short_id();
        if !existing.contains(&candidate) {
            return candidate;
        }
        tracing::debug!(id = %candidate, "share id collision, regenerating");
    }
}
