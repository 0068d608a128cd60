//! Random sources for procedural generation.
//! Generators take any `rand::Rng`; production seeds from entropy, tests seed explicitly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Instances per debris cluster are drawn from `[SCATTER_COUNT_MIN, SCATTER_COUNT_MAX)`.
pub const SCATTER_COUNT_MIN: usize = 25;
pub const SCATTER_COUNT_MAX: usize = 50;

/// Nondeterministic generator for production scene builds.
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Deterministic generator for reproducible builds and tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Randomized instance count for one scatter cluster.
pub fn scatter_count<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.gen_range(SCATTER_COUNT_MIN..SCATTER_COUNT_MAX)
}

/// Uniform noise in `[-amplitude/2, amplitude/2]`. Zero or negative amplitude yields 0.
pub fn centered_jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    if amplitude > 0.0 {
        let half = amplitude * 0.5;
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}

/// Uniform sample in `[a, b]` regardless of argument order.
pub fn uniform_between<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}
