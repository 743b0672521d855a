//! Random draws and candidate point generation.
//!
//! Every draw goes through an explicit [`RngCore`] supplied by the caller; nothing in
//! the crate touches a process-global generator, so a seeded source reproduces a run.
use mint::Vector2;
use rand::Rng as RngCore;

pub mod annulus;

pub use annulus::AnnulusSampling;

/// Trait for candidate point generation.
pub trait PointSampling: Send + Sync {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
///
/// Only the top 24 bits are used so the quotient is exact in `f32` and never
/// rounds up to 1.0.
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// Uniform draw from `[lo, hi]`, collapsing to `lo` when the range is empty.
#[inline]
pub fn rand_range(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    let u = rand01(rng);
    if hi <= lo {
        return lo;
    }
    (lo + u * (hi - lo)).min(hi)
}

/// Uniform draw from `[-radius, radius]`.
#[inline]
pub fn rand_signed(rng: &mut dyn RngCore, radius: f32) -> f32 {
    rand_range(rng, -radius, radius)
}

/// Uniform index into a collection of `len` items. Returns `None` for an empty collection.
#[inline]
pub fn rand_index(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let i = (rand01(rng) * len as f32) as usize;
    Some(i.min(len - 1))
}

/// Bernoulli trial with success probability `p`.
#[inline]
pub fn chance(rng: &mut dyn RngCore, p: f32) -> bool {
    rand01(rng) < p
}
