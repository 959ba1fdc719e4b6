    // Helpers shared by test modules, pulled in with include!().

    #[allow(unused_imports)]
    use rand::{rngs::StdRng, SeedableRng};

    /// Reproducible random source.
    #[allow(dead_code)]
    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Reference count: every range checked, no ordering assumed.
    #[allow(dead_code)]
    fn brute_force_count(value: u32, ranges: &[crate::range_pool::Range]) -> usize {
        ranges.iter().filter(|r| r.encloses(value)).count()
    }
