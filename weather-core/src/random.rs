use rand::Rng;

/// Source of uniform draws used when synthesizing weather.
///
/// Every [`rand::Rng`] is a `RandomSource`; tests substitute fixed sources to
/// pin synthesized values to the edges of their ranges.
pub trait RandomSource {
    /// Uniform float in `[low, high]`.
    fn float_in(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high]`.
    fn int_in(&mut self, low: i32, high: i32) -> i32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn float_in(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }

    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn rng_draws_stay_inclusive() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let f = rng.float_in(-2.0, 5.0);
            assert!((-2.0..=5.0).contains(&f));
            let i = rng.int_in(40, 90);
            assert!((40..=90).contains(&i));
        }
    }

    #[test]
    fn degenerate_range_returns_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(rng.int_in(3, 3), 3);
        assert_eq!(rng.float_in(1.5, 1.5), 1.5);
    }
}
