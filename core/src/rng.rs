//! Deterministic random number generation.
//!
//! RULE: Nothing in the data core may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed a table was generated with.
//!
//! Each generator gets its own RNG stream, seeded deterministically
//! from (master_seed XOR generator_index). This means:
//!   - Adding a new generator never changes existing generators' streams.
//!   - Each generator's stream is fully reproducible in isolation.

use crate::types::Seed;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single generator.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a generator RNG from the master seed and a stable
    /// generator index. The index must never change once assigned.
    pub fn new(master_seed: Seed, generator_index: u64) -> Self {
        let derived_seed = master_seed ^ (generator_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a u64 in [lo, hi] inclusive.
    pub fn next_u64_in(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(hi >= lo, "hi must be >= lo");
        lo + self.next_u64_below(hi - lo + 1)
    }

    /// Roll a float uniformly in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Sample a Gaussian with the given mean and standard deviation.
    /// Box–Muller over two uniform draws; always consumes exactly two
    /// draws from the stream so replay stays aligned.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// All generator RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: Seed,
}

impl RngBank {
    pub fn new(master_seed: Seed) -> Self {
        Self { master_seed }
    }

    pub fn for_generator(&self, slot: GeneratorSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable generator slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every generator's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GeneratorSlot {
    Kpi = 0,
    Geo = 1,
    // Add new generators here — append only.
}

impl GeneratorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kpi => "kpi",
            Self::Geo => "geo",
        }
    }
}
