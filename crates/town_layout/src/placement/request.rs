//! Placement requests and the retry policy applied to them.
use glam::{Vec2, Vec3};
use rand::Rng as RngCore;

use crate::collision::DEFAULT_TOLERANCE;
use crate::error::{Error, Result};
use crate::host::MeshHandle;
use crate::sampling::rand_signed;

/// Default number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Default growth of the jitter window per retry, in world units.
pub const DEFAULT_JITTER_STEP: f32 = 20.0;

/// Everything needed to place one object.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    /// Mesh to spawn.
    pub mesh: MeshHandle,
    /// Requested position. `z` is passed through to the host unchanged.
    pub position: Vec3,
    /// Yaw in degrees.
    pub yaw_degrees: f32,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Label applied to the spawned object.
    pub label: String,
    /// Number of attempts before the request is dropped.
    pub max_attempts: usize,
}

impl PlacementRequest {
    /// Request at ground level with identity scale, no rotation and default attempts.
    pub fn new(mesh: MeshHandle, position: Vec2, label: impl Into<String>) -> Self {
        Self {
            mesh,
            position: position.extend(0.0),
            yaw_degrees: 0.0,
            scale: Vec3::ONE,
            label: label.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.position.z = z;
        self
    }

    pub fn with_yaw(mut self, yaw_degrees: f32) -> Self {
        self.yaw_degrees = yaw_degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Planar footprint size of the request's mesh under its scale.
    pub fn footprint_size(&self) -> Vec2 {
        self.mesh.footprint_size(self.scale)
    }
}

/// Collision tolerance and widening-jitter retry settings.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    /// Margin added around candidates before testing against committed footprints.
    pub tolerance: f32,
    /// Jitter window half-width added per retry.
    pub jitter_step: f32,
    /// Attempts used by requests built from this policy.
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            jitter_step: DEFAULT_JITTER_STEP,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_jitter_step(mut self, jitter_step: f32) -> Self {
        self.jitter_step = jitter_step;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Half-width of the jitter window for `attempt`. Attempt 0 has no jitter.
    #[inline]
    pub fn jitter_radius(&self, attempt: usize) -> f32 {
        self.jitter_step * attempt as f32
    }

    /// Offset applied to the requested position on `attempt`.
    ///
    /// Attempt 0 returns zero without drawing from `rng`.
    pub fn jitter_offset(&self, attempt: usize, rng: &mut dyn RngCore) -> Vec2 {
        if attempt == 0 {
            return Vec2::ZERO;
        }
        let r = self.jitter_radius(attempt);
        let x = rand_signed(rng, r);
        let y = rand_signed(rng, r);
        Vec2::new(x, y)
    }

    /// Validates the policy, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() {
            return Err(Error::InvalidConfig("tolerance must be finite".into()));
        }
        if !self.jitter_step.is_finite() || self.jitter_step < 0.0 {
            return Err(Error::InvalidConfig("jitter_step must be >= 0".into()));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::test_rng::FixedRng;

    #[test]
    fn jitter_radius_grows_linearly() {
        let policy = RetryPolicy::default();
        for k in 0..6 {
            assert_eq!(policy.jitter_radius(k), 20.0 * k as f32);
        }
    }

    #[test]
    fn first_attempt_has_no_jitter_and_draws_nothing() {
        struct PanicRng;
        impl rand::TryRng for PanicRng {
            type Error = core::convert::Infallible;
            fn try_next_u32(&mut self) -> core::result::Result<u32, Self::Error> {
                panic!("attempt 0 must not draw")
            }
            fn try_next_u64(&mut self) -> core::result::Result<u64, Self::Error> {
                panic!("attempt 0 must not draw")
            }
            fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), Self::Error> {
                panic!("attempt 0 must not draw")
            }
        }
        let policy = RetryPolicy::default();
        assert_eq!(policy.jitter_offset(0, &mut PanicRng), Vec2::ZERO);
    }

    #[test]
    fn jitter_offset_reaches_window_edge() {
        let policy = RetryPolicy::default();
        let mut rng = FixedRng { value: 0 };
        assert_eq!(policy.jitter_offset(3, &mut rng), Vec2::splat(-60.0));
    }

    #[test]
    fn request_builder_sets_fields() {
        let mesh = MeshHandle::centered("Tavern", Vec3::new(300.0, 200.0, 400.0));
        let req = PlacementRequest::new(mesh, Vec2::new(10.0, 20.0), "Tavern")
            .with_z(1.0)
            .with_yaw(135.0)
            .with_uniform_scale(2.0)
            .with_max_attempts(2);
        assert_eq!(req.position, Vec3::new(10.0, 20.0, 1.0));
        assert_eq!(req.yaw_degrees, 135.0);
        assert_eq!(req.max_attempts, 2);
        assert_eq!(req.footprint_size(), Vec2::new(600.0, 400.0));
    }

    #[test]
    fn validate_rejects_bad_policy() {
        assert!(RetryPolicy::default().validate().is_ok());
        assert!(RetryPolicy::default()
            .with_max_attempts(0)
            .validate()
            .is_err());
        assert!(RetryPolicy::default()
            .with_jitter_step(-1.0)
            .validate()
            .is_err());
        assert!(RetryPolicy::default()
            .with_tolerance(f32::NAN)
            .validate()
            .is_err());
    }
}
