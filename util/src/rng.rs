use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand_xorshift::XorShiftRng;

/// Construct a throwaway random number generator seeded by a noise value.
///
/// Good for short-term use in immutable contexts given a varying source of
/// noise like map position coordinates.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

pub trait RngExt {
    fn one_chance_in(&mut self, n: usize) -> bool;

    /// Random integer in `lo..=hi` biased towards the middle of the range.
    fn triangular(&mut self, lo: i32, hi: i32) -> i32;
}

impl<T: Rng + ?Sized> RngExt for T {
    fn one_chance_in(&mut self, n: usize) -> bool {
        if n == 0 {
            return false;
        }
        self.gen_range(0..n) == 0
    }

    fn triangular(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi);
        (self.gen_range(lo..=hi) + self.gen_range(lo..=hi)) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_stable() {
        let a: u32 = srng("xyzzy").gen();
        let b: u32 = srng("xyzzy").gen();
        let c: u32 = srng("plugh").gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn chances() {
        let mut rng = srng(&123u64);
        assert!(!rng.one_chance_in(0));
        for _ in 0..100 {
            assert!(rng.one_chance_in(1));
        }
    }

    #[test]
    fn triangular_stays_in_range() {
        let mut rng = srng(&9u64);
        for _ in 0..1000 {
            let n = rng.triangular(2, 9);
            assert!((2..=9).contains(&n));
        }
        assert_eq!(rng.triangular(5, 5), 5);
    }
}
