//! Small helpers over an injected random source.
//!
//! Every random-consuming function in the engine takes `&mut R` where
//! `R: Rng + ?Sized`, so a seeded [`ChaCha8Rng`](rand_chacha::ChaCha8Rng)
//! reproduces any run exactly.

use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 9;

/// Uniform integer in `min..=max`.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform float in `[0, 1)`.
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// True with probability `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    unit(rng) < p
}

/// Uniformly chosen element of a non-empty slice.
///
/// # Panics
///
/// Panics if `items` is empty. Callers only pass fixed vocabularies.
pub fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Random nine-character base-36 identifier.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LENGTH)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_is_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let v = roll(&mut rng, -2, 9);
            assert!((-2..=9).contains(&v));
            seen_min |= v == -2;
            seen_max |= v == 9;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_roll_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(roll(&mut rng, 5, 5), 5);
        assert_eq!(roll(&mut rng, 5, 3), 5);
    }

    #[test]
    fn test_random_id_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let id = random_id(&mut rng);
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(id, random_id(&mut rng));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(roll(&mut a, 0, 1000), roll(&mut b, 0, 1000));
        }
    }
}
