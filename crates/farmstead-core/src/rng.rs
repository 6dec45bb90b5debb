//! Deterministic PRNG for world generation (spawn cells, ground rotation).
//!
//! Uses the SplitMix64 algorithm: fast, 8 bytes of state, excellent
//! statistical properties, and trivially serializable.

use serde::{Deserialize, Serialize};

/// SplitMix64 pseudo-random number generator.
///
/// Seeded once at world construction so a given seed always produces the
/// same spawn layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform index into a slice of length `len`. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty range");
        (self.next_u64() % len as u64) as usize
    }

    /// Uniform number of quarter turns (0..4), used for ground-tile rotation.
    pub fn quarter_turns(&mut self) -> u32 {
        (self.next_u64() % 4) as u32
    }

    /// Uniform value in [0, 1) as f32, used for random headings.
    pub fn unit_f32(&mut self) -> f32 {
        // Top 24 bits give full f32 mantissa coverage.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Get the internal state (for diagnostics).
    pub fn state(&self) -> u64 {
        self.state
    }
}
