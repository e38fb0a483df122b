use crate::Generator;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snip_core::shortcode::{ALPHABET, CODE_LENGTH};
use snip_core::ShortCode;

/// Draws each character of a code uniformly from the 62-symbol alphabet.
///
/// By default the thread-local RNG is used. A seeded generator produces a
/// reproducible sequence, which is handy in tests.
#[derive(Debug, Default)]
pub struct RandomGenerator {
    seeded: Option<Mutex<StdRng>>,
}

impl RandomGenerator {
    /// Creates a generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self { seeded: None }
    }

    /// Creates a generator whose output is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

fn sample_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code = match &self.seeded {
            Some(rng) => sample_code(&mut *rng.lock()),
            None => sample_code(&mut rand::rng()),
        };
        ShortCode::new_unchecked(code)
    }
}
