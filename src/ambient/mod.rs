//! Background generators. Independent of entity poses; each owns a seeded random source so a
//! given scene seed always produces the same field.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) mod nebula;
pub(crate) mod stars;
pub(crate) mod streaks;

pub(crate) const NEBULA_SALT: u64 = 0x6e65_6275_6c61_0001;
pub(crate) const STREAK_SALT: u64 = 0x7374_7265_616b_0002;
pub(crate) const STAR_SALT: u64 = 0x7374_6172_7300_0003;

pub(crate) fn seeded_rng(seed: u64, salt: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ salt)
}

/// Uniform sample in `[-span / 2, span / 2)`.
pub(crate) fn spread(rng: &mut StdRng, span: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * span
}

/// Uniform sample in `[lo, hi)`.
pub(crate) fn pick(rng: &mut StdRng, [lo, hi]: [f64; 2]) -> f64 {
    lo + rng.random::<f64>() * (hi - lo)
}

#[cfg(test)]
#[path = "../../tests/unit/ambient/mod.rs"]
mod tests;
