/*!
 * Pool of random half-open ranges over `[0, max_value)`.
 * Pool is built once, sorted ascending by lower bound, and never modified afterwards.
 */

use log::debug;
use rand::Rng;

use crate::counter;
use crate::error::{Error, Result};

/// Source of uniform random integers used for both pool construction and sampling.
pub trait RandomSource {
    /// Draws uniform integer from `[0, n)`.
    fn below(&mut self, n: u32) -> Result<u32>;
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, n: u32) -> Result<u32> {
        if n == 0 {
            return Err(Error::InvalidInput("argument 'n' must be a positive integer".into()));
        }
        Ok(self.gen_range(0, n))
    }
}

/// Half-open range `[min, max)`, `min < max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    min: u32,
    max: u32,
}

impl Range {
    /// Creates range from two distinct bounds given in any order.
    #[allow(dead_code)]
    pub fn new(a: u32, b: u32) -> Result<Self> {
        if a == b {
            return Err(Error::InvalidInput(format!("range bounds must differ, got {} twice", a)));
        }
        Ok(Range { min: a.min(b), max: a.max(b) })
    }

    /// Draws random range from `[0, max_value)`, returning it together with number of equal-bound draws thrown away.
    fn draw<R: RandomSource + ?Sized>(rng: &mut R, max_value: u32) -> Result<(Self, u64)> {
        if max_value < 2 {
            return Err(Error::InvalidInput(format!(
                "argument 'max_value' must allow two distinct values, got {}", max_value)));
        }
        let mut redraws = 0;
        loop {
            let a = rng.below(max_value)?;
            let b = rng.below(max_value)?;
            if a != b {
                return Ok((Range { min: a.min(b), max: a.max(b) }, redraws));
            }
            redraws += 1;
        }
    }

    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// True when `min <= value < max`.
    #[inline]
    pub fn encloses(&self, value: u32) -> bool {
        self.min <= value && value < self.max
    }
}

/// Immutable collection of ranges sorted ascending by `min`.
#[derive(Debug, Clone)]
pub struct RangePool {
    ranges: Vec<Range>,
}

impl RangePool {
    /// Generates `n` random ranges over `[0, max_value)` and sorts them.
    /// Randomness is taken from the shared `rng`, which is later used by the sampling loop.
    pub fn construct<R: RandomSource + ?Sized>(n: usize, max_value: u32, rng: &mut R) -> Result<Self> {
        if n < 1 {
            return Err(Error::InvalidArgument("number of ranges must be greater than 0".into()));
        }
        if n > crate::RANGES_CEILING {
            return Err(Error::InvalidArgument(format!("maximum number of ranges is: {}", crate::RANGES_CEILING)));
        }
        if max_value == 0 {
            return Err(Error::InvalidArgument("maximum range value must be greater than 0".into()));
        }

        let mut ranges = Vec::new();
        ranges.try_reserve_exact(n).map_err(|_| Error::Allocation { ranges: n })?;
        let mut redraws = 0;
        for _ in 0..n {
            let (range, r) = Range::draw(rng, max_value)?;
            redraws += r;
            ranges.push(range);
        }
        debug!("Generated {} ranges over [0, {}), {} equal draws discarded", n, max_value, redraws);

        Ok(Self::from_ranges(ranges))
    }

    /// Builds pool from already generated ranges. Order of `ranges` is irrelevant.
    pub fn from_ranges(mut ranges: Vec<Range>) -> Self {
        // Stable sort; ranges sharing `min` keep generation order.
        ranges.sort_by_key(|r| r.min);
        RangePool { ranges }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Ranges in ascending `min` order.
    #[allow(dead_code)]
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Number of ranges in pool enclosing `value`.
    pub fn count_enclosing(&self, value: u32) -> usize {
        counter::count_enclosing(value, &self.ranges)
    }

    /// Smallest `min` and largest `max` in pool.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        let lo = self.ranges.first()?.min;
        let hi = self.ranges.iter().map(|r| r.max).max()?;
        Some((lo, hi))
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
/// Tests
///

#[cfg(test)]
mod tests {
    use super::*;

    include!("test_common.inc.rs");

    /// Replays fixed list of draws, used to force equal-bound redraws.
    struct Scripted(Vec<u32>);

    impl RandomSource for Scripted {
        fn below(&mut self, n: u32) -> Result<u32> {
            let v = self.0.remove(0);
            assert!(v < n);
            Ok(v)
        }
    }

    #[test]
    fn new_orders_bounds() {
        let r = Range::new(9, 3).unwrap();
        assert_eq!((r.min(), r.max()), (3, 9));
        assert!(Range::new(4, 4).is_err());
    }

    #[test]
    fn encloses_is_half_open() {
        let r = Range::new(10, 20).unwrap();
        assert!(!r.encloses(9));
        assert!(r.encloses(10));
        assert!(r.encloses(19));
        assert!(!r.encloses(20));
    }

    #[test]
    fn generate_redraws_equal_bounds() {
        let mut rng = Scripted(vec![5, 5, 7, 7, 8, 2]);
        let (range, redraws) = Range::draw(&mut rng, 10).unwrap();
        assert_eq!((range.min(), range.max()), (2, 8));
        assert_eq!(redraws, 2);
        assert!(rng.0.is_empty());
    }

    #[test]
    fn generate_rejects_degenerate_span() {
        let mut rng = seeded(1);
        assert!(matches!(Range::draw(&mut rng, 1), Err(Error::InvalidInput(_))));
        assert!(matches!(Range::draw(&mut rng, 0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn below_rejects_empty_span() {
        let mut rng = seeded(1);
        assert!(matches!(rng.below(0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn generated_ranges_are_valid() {
        let mut rng = seeded(7);
        for max_value in &[2u32, 3, 10, 1000, crate::MAX_VALUE] {
            for _ in 0..500 {
                let (r, _) = Range::draw(&mut rng, *max_value).unwrap();
                assert!(r.min() < r.max());
                assert!(r.max() < *max_value);
            }
        }
    }

    #[test]
    fn pool_has_n_sorted_ranges() {
        let mut rng = seeded(42);
        for n in &[1usize, 2, 42, 1000] {
            let pool = RangePool::construct(*n, crate::MAX_VALUE, &mut rng).unwrap();
            assert_eq!(pool.len(), *n);
            assert!(pool.ranges().windows(2).all(|w| w[0].min() <= w[1].min()));
            assert!(pool.ranges().iter().all(|r| r.min() < r.max() && r.max() < crate::MAX_VALUE));
        }
    }

    #[test]
    fn pool_rejects_bad_parameters() {
        let mut rng = seeded(3);
        assert!(matches!(RangePool::construct(0, 100, &mut rng), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            RangePool::construct(crate::RANGES_CEILING + 1, 100, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(RangePool::construct(5, 0, &mut rng), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn from_ranges_is_stable_on_equal_min() {
        let input = vec![
            Range::new(5, 9).unwrap(),
            Range::new(1, 2).unwrap(),
            Range::new(5, 6).unwrap(),
            Range::new(5, 7).unwrap(),
        ];
        let pool = RangePool::from_ranges(input);
        let maxes: Vec<u32> = pool.ranges().iter().map(|r| r.max()).collect();
        assert_eq!(maxes, vec![2, 9, 6, 7]);
        assert_eq!(pool.bounds(), Some((1, 9)));
    }

    #[test]
    fn small_span_still_produces_n_ranges() {
        // Only one distinct range exists over [0, 2).
        let mut rng = seeded(11);
        let pool = RangePool::construct(50, 2, &mut rng).unwrap();
        assert_eq!(pool.len(), 50);
        assert!(pool.ranges().iter().all(|r| *r == Range::new(0, 1).unwrap()));
        assert_eq!(pool.count_enclosing(0), 50);
        assert_eq!(pool.count_enclosing(1), 0);
    }
}
