use crate::{Generator, DEFAULT_ALIAS_LENGTH};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A [`Generator`] producing fixed-length random aliases.
///
/// The random source is owned by the generator, so a seeded source makes the
/// alias sequence reproducible.
#[derive(Debug)]
pub struct RandomGenerator<R = StdRng> {
    rng: Mutex<R>,
    length: usize,
}

impl RandomGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    pub fn new(length: usize) -> Self {
        Self::with_rng(StdRng::from_os_rng(), length)
    }
}

impl Default for RandomGenerator<StdRng> {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH)
    }
}

impl<R: RngCore> RandomGenerator<R> {
    /// Creates a generator drawing from the given random source.
    pub fn with_rng(rng: R, length: usize) -> Self {
        Self {
            rng: Mutex::new(rng),
            length,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl<R: RngCore + Send + 'static> Generator for RandomGenerator<R> {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock();
        crate::generate(&mut *rng, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALPHABET;

    #[test]
    fn generates_configured_length() {
        let generator = RandomGenerator::new(8);

        for _ in 0..100 {
            let alias = generator.generate();
            assert_eq!(alias.len(), 8);
            assert!(alias.bytes().all(|c| ALPHABET.contains(&c)));
        }
    }

    #[test]
    fn default_uses_default_length() {
        let generator = RandomGenerator::default();
        assert_eq!(generator.length(), DEFAULT_ALIAS_LENGTH);
        assert_eq!(generator.generate().len(), DEFAULT_ALIAS_LENGTH);
    }

    #[test]
    fn seeded_generators_agree() {
        let first = RandomGenerator::with_rng(StdRng::seed_from_u64(99), 10);
        let second = RandomGenerator::with_rng(StdRng::seed_from_u64(99), 10);

        for _ in 0..10 {
            assert_eq!(first.generate(), second.generate());
        }
    }

    #[test]
    fn successive_aliases_differ() {
        let generator = RandomGenerator::with_rng(StdRng::seed_from_u64(5), 12);
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
