//! Deterministic Random Number Generator
//!
//! 32-bit xorshift (shifts 13/17/5). Every random decision in a match is
//! drawn from one of these, owned by the generation context.
//! Given the same seed, produces the identical sequence on all platforms.

use serde::{Serialize, Deserialize};

use crate::error::{SimError, SimResult};

/// Replacement for a zero seed. Xorshift maps 0 to 0 forever.
pub const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

/// 2^32 as a float, the divisor that maps a `u32` draw into [0, 1).
const U32_RANGE: f64 = 4_294_967_296.0;

/// Deterministic PRNG using the 32-bit xorshift transform.
///
/// # Example
///
/// ```
/// use tactical_telemetry::core::rng::XorShiftRng;
///
/// let mut a = XorShiftRng::new(2026);
/// let mut b = XorShiftRng::new(2026);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShiftRng {
    state: u32,
}

impl Default for XorShiftRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl XorShiftRng {
    /// Create a new RNG from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Advance the state and return the raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next float in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / U32_RANGE
    }

    /// Float in [lo, hi).
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Integer in [lo, hi], both ends inclusive.
    ///
    /// `lo >= hi` returns `lo` but still consumes one draw, so the stream
    /// position does not depend on the bounds.
    #[inline]
    pub fn uniform_int(&mut self, lo: i64, hi: i64) -> i64 {
        let draw = self.next_f64();
        if lo >= hi {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        (lo + (draw * span).floor() as i64).min(hi)
    }

    /// Returns true with the given probability.
    ///
    /// Probabilities outside [0, 1] are not clamped; they simply saturate
    /// the outcome.
    #[inline]
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Pick one element uniformly.
    ///
    /// Fails with [`SimError::EmptyChoice`] on an empty slice without
    /// consuming a draw.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> SimResult<&'a T> {
        if items.is_empty() {
            return Err(SimError::EmptyChoice("candidate set"));
        }
        let idx = self.uniform_int(0, items.len() as i64 - 1) as usize;
        Ok(&items[idx])
    }

    /// Current state (for checkpointing/debugging).
    pub fn state(&self) -> u32 {
        self.state
    }
}

// =============================================================================
// TESTS
// =============================================================================
