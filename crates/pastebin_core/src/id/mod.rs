//! Short, URL-safe identifiers for new pastes.

use crate::constants::PASTE_ID_LENGTH;
use rand::Rng;

/// URL-safe alphabet (64 symbols, 6 bits of entropy each).
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a fresh paste id from the thread-local CSPRNG.
///
/// Uniqueness is not checked here; the store's primary key rejects the
/// (astronomically unlikely) collision.
///
/// # Returns
/// A [`PASTE_ID_LENGTH`]-character identifier.
pub fn generate_id() -> String {
    generate_id_with(&mut rand::thread_rng())
}

/// Generate a paste id from a caller-supplied RNG.
///
/// # Returns
/// A [`PASTE_ID_LENGTH`]-character identifier drawn from `rng`.
pub fn generate_id_with<R: Rng>(rng: &mut R) -> String {
    (0..PASTE_ID_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Whether `candidate` has the shape of a generated id.
pub fn is_valid_id(candidate: &str) -> bool {
    candidate.len() == PASTE_ID_LENGTH && candidate.bytes().all(|b| ALPHABET.contains(&b))
}
