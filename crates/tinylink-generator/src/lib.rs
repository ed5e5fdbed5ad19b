pub mod random;

pub use random::RandomGenerator;

use rand::Rng;

/// Characters aliases are drawn from: `A-Z`, `a-z`, then `0-9`.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Alias length used when none is configured.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Trait for generating aliases.
///
/// Implementations are pure generators that don't interact with storage.
/// Generated aliases are not guaranteed to be unique; collisions are
/// detected by the store on save.
pub trait Generator: Send + Sync + 'static {
    /// Generates a new candidate alias.
    fn generate(&self) -> String;
}

/// Draws `length` characters uniformly and independently from [`ALPHABET`].
pub fn generate<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
