//! Random sources used for geometry, colours and operands
//!
//! Every draw is fallible. Callers decide locally whether a failure falls back
//! to a default value or drops the element being built.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors reported by a random source
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RandomError {
    /// The underlying entropy source could not be used
    #[error("random source unavailable")]
    Unavailable,

    /// `int_below` was called with an upper bound of zero
    #[error("empty range: upper bound must be positive, got {upper}")]
    EmptyRange { upper: usize },
}

/// Capability for drawing uniform random values
pub trait RandomSource {
    /// Uniform integer in `[0, upper)`
    fn int_below(&mut self, upper: usize) -> Result<usize, RandomError>;

    /// Uniform real in `[low, high)`; returns `low` when the range is empty
    fn float_in(&mut self, low: f64, high: f64) -> Result<f64, RandomError>;
}

/// Adapter exposing any `rand` generator as a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible output
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn int_below(&mut self, upper: usize) -> Result<usize, RandomError> {
        if upper == 0 {
            return Err(RandomError::EmptyRange { upper });
        }
        Ok(self.rng.random_range(0..upper))
    }

    fn float_in(&mut self, low: f64, high: f64) -> Result<f64, RandomError> {
        if low.is_nan() || high.is_nan() || low >= high {
            return Ok(low);
        }
        Ok(self.rng.random_range(low..high))
    }
}

/// Cryptographically secure source seeded from the operating system
///
/// If the OS refuses to provide entropy every draw fails with
/// [`RandomError::Unavailable`].
#[derive(Debug)]
pub struct SecureRandom {
    inner: Option<RngSource<StdRng>>,
}

impl SecureRandom {
    pub fn new() -> Self {
        match StdRng::try_from_os_rng() {
            Ok(rng) => Self {
                inner: Some(RngSource::new(rng)),
            },
            Err(err) => {
                log::warn!("OS entropy source unavailable, random draws will fail: {}", err);
                Self { inner: None }
            }
        }
    }

    /// Whether draws can succeed
    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for SecureRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SecureRandom {
    fn int_below(&mut self, upper: usize) -> Result<usize, RandomError> {
        match &mut self.inner {
            Some(source) => source.int_below(upper),
            None => Err(RandomError::Unavailable),
        }
    }

    fn float_in(&mut self, low: f64, high: f64) -> Result<f64, RandomError> {
        match &mut self.inner {
            Some(source) => source.float_in(low, high),
            None => Err(RandomError::Unavailable),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::{RandomError, RandomSource};

    /// Source whose every draw fails
    pub struct FailingSource;

    impl RandomSource for FailingSource {
        fn int_below(&mut self, _upper: usize) -> Result<usize, RandomError> {
            Err(RandomError::Unavailable)
        }

        fn float_in(&mut self, _low: f64, _high: f64) -> Result<f64, RandomError> {
            Err(RandomError::Unavailable)
        }
    }

    /// Source replaying unit fractions in `[0, 1)`, failing once exhausted
    ///
    /// `float_in(lo, hi)` yields `lo + u * (hi - lo)`, `int_below(n)` yields
    /// `floor(u * n)`.
    pub struct ScriptedSource {
        values: VecDeque<f64>,
    }

    impl ScriptedSource {
        pub fn new(values: &[f64]) -> Self {
            Self {
                values: values.iter().copied().collect(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.values.len()
        }
    }

    impl RandomSource for ScriptedSource {
        fn int_below(&mut self, upper: usize) -> Result<usize, RandomError> {
            let u = self.values.pop_front().ok_or(RandomError::Unavailable)?;
            Ok(((u * upper as f64) as usize).min(upper.saturating_sub(1)))
        }

        fn float_in(&mut self, low: f64, high: f64) -> Result<f64, RandomError> {
            let u = self.values.pop_front().ok_or(RandomError::Unavailable)?;
            Ok(low + u * (high - low))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_below_stays_in_range() {
        let mut rng = RngSource::seeded(1);
        for _ in 0..200 {
            let v = rng.int_below(3).unwrap();
            assert!(v < 3);
        }
    }

    #[test]
    fn test_int_below_zero_is_error() {
        let mut rng = RngSource::seeded(1);
        assert_eq!(
            rng.int_below(0),
            Err(RandomError::EmptyRange { upper: 0 })
        );
    }

    #[test]
    fn test_float_in_stays_in_range() {
        let mut rng = RngSource::seeded(2);
        for _ in 0..200 {
            let v = rng.float_in(-3.0, 3.0).unwrap();
            assert!((-3.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_float_in_empty_range_returns_low() {
        let mut rng = RngSource::seeded(3);
        assert_eq!(rng.float_in(5.0, 5.0), Ok(5.0));
        assert_eq!(rng.float_in(5.0, 1.0), Ok(5.0));
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.float_in(0.0, 100.0), b.float_in(0.0, 100.0));
        }
    }

    #[test]
    fn test_secure_random_draws() {
        let mut rng = SecureRandom::new();
        if rng.is_available() {
            let v = rng.float_in(1.0, 4.0).unwrap();
            assert!((1.0..4.0).contains(&v));
        } else {
            assert_eq!(rng.int_below(10), Err(RandomError::Unavailable));
        }
    }
}
