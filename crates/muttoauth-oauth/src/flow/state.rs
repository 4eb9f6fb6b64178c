//! State nonce generation for authorization requests.

use rand::Rng;

/// Letters a state nonce is drawn from.
pub const STATE_ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of the state nonce sent with each authorization request.
pub const STATE_LEN: usize = 16;

/// Returns `len` ASCII letters drawn uniformly from [`STATE_ALPHABET`].
pub fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(STATE_ALPHABET[rng.gen_range(0..STATE_ALPHABET.len())]))
        .collect()
}
