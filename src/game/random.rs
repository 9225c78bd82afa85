use rand::{Rng, RngCore};

/// Uniform integer source used for spawn points and headings
pub trait RandomSource {
    /// A value in `[0, n)`; `n` must be non-zero
    fn below(&mut self, n: usize) -> usize;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn below(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_below_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for n in 1..50 {
            assert!(rng.below(n) < n);
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let xs: Vec<usize> = (0..16).map(|_| a.below(100)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.below(100)).collect();
        assert_eq!(xs, ys);
    }
}
