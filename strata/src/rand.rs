//! Deterministic pseudo-random number generator used by generation and simulation.
//!
//! This is the 48-bit linear congruential generator popularized by `java.util.Random`,
//! kept here because every draw must be reproducible from seed material alone: the
//! generator is reseeded from chunk or column coordinates before use and never draws
//! from any ambient entropy source.

use std::num::Wrapping;


const MULTIPLIER: Wrapping<i64> = Wrapping(0x5DEECE66D);
const ADDEND: Wrapping<i64> = Wrapping(0xB);
const MASK: Wrapping<i64> = Wrapping((1 << 48) - 1);

const FLOAT_DIV: f32 = (1u32 << 24) as f32;
const DOUBLE_DIV: f64 = (1u64 << 53) as f64;


#[inline]
fn initial_scramble(seed: i64) -> Wrapping<i64> {
    (Wrapping(seed) ^ MULTIPLIER) & MASK
}


/// A reseedable 48-bit LCG random source.
#[derive(Debug, Clone)]
pub struct LcgRandom {
    state: Wrapping<i64>,
}

impl LcgRandom {

    #[inline]
    pub fn new(seed: i64) -> LcgRandom {
        LcgRandom { state: initial_scramble(seed) }
    }

    #[inline]
    pub fn set_seed(&mut self, seed: i64) {
        self.state = initial_scramble(seed);
    }

    #[inline]
    fn next(&mut self, bits: u8) -> i32 {
        self.state = (self.state * MULTIPLIER + ADDEND) & MASK;
        (self.state.0 as u64 >> (48 - bits)) as i32
    }

    #[inline]
    pub fn next_int(&mut self) -> i32 {
        self.next(32)
    }

    /// Uniform integer in `0..bound`, `bound` must be strictly positive.
    pub fn next_int_bounded(&mut self, bound: i32) -> i32 {

        if (bound & -bound) == bound {
            (((bound as i64).wrapping_mul(self.next(31) as i64)) >> 31) as i32
        } else {

            let mut bits;
            let mut val;

            loop {
                bits = self.next(31);
                val = bits.rem_euclid(bound);
                if bits - val + (bound - 1) >= 0 {
                    break;
                }
            }

            val

        }

    }

    /// A fair coin flip.
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.next(1) != 0
    }

    /// Get the next pseudo-random single-precision float in `0.0..1.0`.
    pub fn next_float(&mut self) -> f32 {
        self.next(24) as f32 / FLOAT_DIV
    }

    /// Get the next pseudo-random double-precision float in `0.0..1.0`.
    pub fn next_double(&mut self) -> f64 {
        let high = (self.next(26) as i64) << 27;
        let low = self.next(27) as i64;
        (high.wrapping_add(low) as f64) / DOUBLE_DIV
    }

}
